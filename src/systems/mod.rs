//! Engine systems.
//!
//! Submodules overview
//! - [`active`] – publish active-state changes
//! - [`alive`] – kill / revive entities and clean up corpses
//! - [`expireclean`] – attach, tick, expire and detach [`ExpireClean`](crate::components::expireclean::ExpireClean)
//! - [`mastertimer`] – advance the timer service and emit timer events
//! - [`scenario`] – spawn scenario entities and apply timed activation
//! - [`time`] – update simulation time and delta

pub mod active;
pub mod alive;
pub mod expireclean;
pub mod mastertimer;
pub mod scenario;
pub mod time;
