//! ECS resources made available to systems.
//!
//! Overview
//! - `expirestats` – counters of expired entities
//! - `mastertimer` – one-shot delayed actions keyed by handle
//! - `simconfig` – INI-backed simulation settings
//! - `worldtime` – simulation time and delta
pub mod expirestats;
pub mod mastertimer;
pub mod simconfig;
pub mod worldtime;
