//! Expiry notification for [`ExpireClean`](crate::components::expireclean::ExpireClean).
//!
//! The [`ExpiredEvent`] is triggered right before an expired entity is
//! despawned, so observers can still read the entity's components through
//! deferred commands or spawn follow-up effects at its position.

use bevy_ecs::prelude::*;

/// Event emitted when an entity's expire-clean timer runs out.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiredEvent {
    /// The entity being removed from the world.
    pub entity: Entity,
}
