//! Active-state writes with change notification.
//!
//! [`set_entity_active`] is the publisher side of the entity's observable
//! active flag: it updates the [`Active`] component and triggers an
//! [`ActiveChangedEvent`] when the value really changes. Subscribers are plain
//! observers on that event (see
//! [`expire_clean_active_observer`](crate::systems::expireclean::expire_clean_active_observer)).
//!
//! From inside a system, where there is no `&mut World`, use
//! [`ActiveCommandsExt::set_active`] to queue the same operation.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::active::Active;
use crate::events::active::ActiveChangedEvent;

/// Set the active flag of `entity` and notify subscribers on a transition.
///
/// Entities without an [`Active`] component count as active; the component is
/// inserted on first write. Returns `true` when the flag changed. Despawned
/// entities are ignored.
pub fn set_entity_active(world: &mut World, entity: Entity, active: bool) -> bool {
    {
        let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
            return false;
        };
        let previous = entity_mut.get::<Active>().is_none_or(|a| a.value);
        match entity_mut.get_mut::<Active>() {
            Some(mut flag) => flag.value = active,
            None => {
                entity_mut.insert(Active::new(active));
            }
        }
        if previous == active {
            return false;
        }
    }

    debug!("{:?} active -> {}", entity, active);
    world.trigger(ActiveChangedEvent { entity, active });
    true
}

/// Queue active-state changes from systems and observers.
pub trait ActiveCommandsExt {
    fn set_active(&mut self, entity: Entity, active: bool);
}

impl ActiveCommandsExt for Commands<'_, '_> {
    fn set_active(&mut self, entity: Entity, active: bool) {
        self.queue(move |world: &mut World| {
            set_entity_active(world, entity, active);
        });
    }
}
