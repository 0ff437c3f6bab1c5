//! Expire-clean library.
//!
//! This module exposes the ECS components, resources, systems, and events
//! that remove entities from the world after a delay, for use in integration
//! tests and as a reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
