//! Alive / dead state for entities.
//!
//! The [`Alive`] component adds knowledge about whether an entity is alive.
//! Flip it with [`kill_entity`](crate::systems::alive::kill_entity) and
//! [`revive_entity`](crate::systems::alive::revive_entity) so that
//! [`DeathEvent`](crate::events::alive::DeathEvent) and
//! [`ReviveEvent`](crate::events::alive::ReviveEvent) are triggered.
//!
//! A common pattern is to give dead entities an
//! [`ExpireClean`](crate::components::expireclean::ExpireClean) so corpses fade
//! out and disappear.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alive {
    pub value: bool,
}

impl Alive {
    pub fn new(value: bool) -> Self {
        Alive { value }
    }

    pub fn is_alive(&self) -> bool {
        self.value
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }
}

impl Default for Alive {
    fn default() -> Self {
        Alive { value: true }
    }
}
