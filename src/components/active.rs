//! Active flag of an entity.
//!
//! An entity is "in the world" while its [`Active`] flag is true. Systems that
//! simulate per-frame behavior skip inactive entities. Entities without the
//! component are treated as active.
//!
//! The flag is observable: change it with
//! [`set_entity_active`](crate::systems::active::set_entity_active) (or the
//! [`ActiveCommandsExt`](crate::systems::active::ActiveCommandsExt) command)
//! and an [`ActiveChangedEvent`](crate::events::active::ActiveChangedEvent) is
//! triggered for every real transition. Writing the field directly bypasses
//! the notification.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Active {
    pub value: bool,
}

impl Active {
    pub fn new(value: bool) -> Self {
        Active { value }
    }

    pub fn is_active(&self) -> bool {
        self.value
    }
}

impl Default for Active {
    fn default() -> Self {
        Active { value: true }
    }
}

/// Whether an entity with an optional [`Active`] component should be simulated.
pub fn is_entity_active(active: Option<&Active>) -> bool {
    active.is_none_or(|a| a.value)
}
