//! Death and revival notifications.
//!
//! Triggered by [`kill_entity`](crate::systems::alive::kill_entity) and
//! [`revive_entity`](crate::systems::alive::revive_entity) when the
//! [`Alive`](crate::components::alive::Alive) flag of an entity actually flips.

use bevy_ecs::prelude::*;

/// Event emitted when an alive entity is killed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathEvent {
    /// The entity that died.
    pub entity: Entity,
    /// The entity responsible for the death.
    pub killer: Entity,
}

/// Event emitted when a dead entity is brought back.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviveEvent {
    /// The entity that came back.
    pub entity: Entity,
    /// The entity that revived it (the entity itself when self-revived).
    pub caller: Entity,
}
