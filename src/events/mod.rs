//! Event types used by the engine.
//!
//! Events are triggered on the world and handled by observers, so that the
//! publisher of a change does not need to know who listens.
//!
//! Submodules:
//! - [`active`] – an entity became active or inactive
//! - [`alive`] – an entity died or was revived
//! - [`expireclean`] – an entity's expire timer ran out
//! - [`timer`] – a one-shot action of the master timer fired
pub mod active;
pub mod alive;
pub mod expireclean;
pub mod timer;
