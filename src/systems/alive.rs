//! Kill / revive operations and the corpse cleanup observer.
//!
//! [`kill_entity`] and [`revive_entity`] flip the [`Alive`] flag and trigger
//! [`DeathEvent`] / [`ReviveEvent`] only when the state actually changes.
//! [`corpse_expire_observer`] reacts to deaths by giving the dead entity a
//! fading [`ExpireClean`] so it disappears after a while.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::alive::Alive;
use crate::components::expireclean::ExpireClean;
use crate::components::view::View;
use crate::events::alive::{DeathEvent, ReviveEvent};
use crate::resources::simconfig::SimConfig;

/// Kill an alive entity. Returns `true` if it was alive.
pub fn kill_entity(world: &mut World, entity: Entity, killer: Entity) -> bool {
    let Some(mut alive) = world.get_mut::<Alive>(entity) else {
        return false;
    };
    if alive.is_dead() {
        return false;
    }
    alive.value = false;

    world.trigger(DeathEvent { entity, killer });
    true
}

/// Revive a dead entity on behalf of `caller`. Returns `true` if it was dead.
pub fn revive_entity(world: &mut World, entity: Entity, caller: Entity) -> bool {
    let Some(mut alive) = world.get_mut::<Alive>(entity) else {
        return false;
    };
    if alive.is_alive() {
        return false;
    }
    alive.value = true;

    world.trigger(ReviveEvent { entity, caller });
    true
}

/// Revive a dead entity, naming the entity itself as the caller.
pub fn revive_entity_self(world: &mut World, entity: Entity) -> bool {
    revive_entity(world, entity, entity)
}

/// Observer that schedules removal of dead entities.
///
/// Inserts an opacity-animated [`ExpireClean`] using
/// [`SimConfig::corpse_expire`] and a [`View`] if the entity has none. An
/// `ExpireClean` the entity already had is replaced and its timer cancelled.
pub fn corpse_expire_observer(
    trigger: On<DeathEvent>,
    config: Res<SimConfig>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let expire = match ExpireClean::new(config.corpse_expire) {
        Ok(expire) => expire.animate_opacity(),
        Err(e) => {
            warn!("corpse of {:?} will not be cleaned: {}", event.entity, e);
            return;
        }
    };
    debug!(
        "{:?} killed by {:?}, removing in {:.2}s",
        event.entity, event.killer, config.corpse_expire
    );
    if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
        entity_commands.insert_if_new(View::default()).insert(expire);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_kill_and_revive_fire_once() {
        let mut world = World::new();
        let deaths = Arc::new(Mutex::new(Vec::new()));
        let revives = Arc::new(Mutex::new(Vec::new()));
        let d = deaths.clone();
        let r = revives.clone();
        world.add_observer(move |trigger: On<DeathEvent>| {
            d.lock().unwrap().push(*trigger.event());
        });
        world.add_observer(move |trigger: On<ReviveEvent>| {
            r.lock().unwrap().push(*trigger.event());
        });
        world.flush();

        let killer = world.spawn_empty().id();
        let victim = world.spawn(Alive::default()).id();

        assert!(kill_entity(&mut world, victim, killer));
        assert!(!kill_entity(&mut world, victim, killer));
        assert!(world.get::<Alive>(victim).unwrap().is_dead());

        assert!(revive_entity_self(&mut world, victim));
        assert!(!revive_entity_self(&mut world, victim));
        assert!(world.get::<Alive>(victim).unwrap().is_alive());

        assert_eq!(
            *deaths.lock().unwrap(),
            vec![DeathEvent {
                entity: victim,
                killer
            }]
        );
        assert_eq!(
            *revives.lock().unwrap(),
            vec![ReviveEvent {
                entity: victim,
                caller: victim
            }]
        );
    }

    #[test]
    fn test_entity_without_alive_cannot_be_killed() {
        let mut world = World::new();
        let killer = world.spawn_empty().id();
        let rock = world.spawn_empty().id();
        assert!(!kill_entity(&mut world, rock, killer));
        assert!(!revive_entity(&mut world, rock, killer));
    }

    #[test]
    fn test_corpse_gets_expire_clean() {
        let mut world = World::new();
        let mut config = SimConfig::new();
        config.corpse_expire = 1.5;
        world.insert_resource(config);
        world.add_observer(corpse_expire_observer);
        world.flush();

        let killer = world.spawn_empty().id();
        let victim = world.spawn((Alive::default(), View::new(0.9))).id();
        kill_entity(&mut world, victim, killer);
        world.flush();

        let ec = world.get::<ExpireClean>(victim).unwrap();
        assert_eq!(ec.expire(), 1.5);
        assert!(ec.is_animating());
        // existing view is kept
        assert_eq!(world.get::<View>(victim).unwrap().opacity(), 0.9);
    }
}
