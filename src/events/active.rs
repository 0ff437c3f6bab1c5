//! Active-state change notifications.
//!
//! An [`ActiveChangedEvent`] is triggered every time an entity's
//! [`Active`](crate::components::active::Active) flag flips. Setting the flag
//! to the value it already has does not notify anyone.
//!
//! # Related
//!
//! - [`crate::systems::active::set_entity_active`] – the only writer that notifies
//! - [`crate::systems::expireclean::expire_clean_active_observer`] – a subscriber

use bevy_ecs::prelude::*;

/// Event emitted when an entity becomes active or inactive.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChangedEvent {
    /// The entity whose flag changed.
    pub entity: Entity,
    /// The new value of the flag.
    pub active: bool,
}
