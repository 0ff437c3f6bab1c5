//! ECS components for entities.
//!
//! Submodules overview:
//! - [`active`] – observable "in the world" flag of an entity
//! - [`alive`] – alive / dead state used for corpses
//! - [`expireclean`] – removes an entity after a duration, optionally fading it
//! - [`scenario`] – JSON scenario data and timed activation changes
//! - [`view`] – visual opacity of an entity

pub mod active;
pub mod alive;
pub mod expireclean;
pub mod scenario;
pub mod view;
