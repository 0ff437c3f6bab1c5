//! Scenario spawning and timed activation.
//!
//! [`spawn_scenario`] turns [`ScenarioData`] into entities carrying
//! [`Active`], [`View`] and [`ExpireClean`]. Entries with activation times get
//! a [`ScenarioToggles`] component, consumed by [`scenario_toggle_system`],
//! which flips the active flag through
//! [`ActiveCommandsExt`](crate::systems::active::ActiveCommandsExt) so that
//! subscribers are notified.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::active::Active;
use crate::components::expireclean::ExpireClean;
use crate::components::scenario::{ActiveToggle, ScenarioData, ScenarioToggles};
use crate::components::view::View;
use crate::resources::worldtime::WorldTime;
use crate::systems::active::ActiveCommandsExt;

/// Spawn every valid entity of the scenario. Invalid entries are skipped.
pub fn spawn_scenario(world: &mut World, data: &ScenarioData) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(data.entities.len());
    for (index, entry) in data.entities.iter().enumerate() {
        let name = entry
            .name
            .clone()
            .unwrap_or_else(|| format!("entity#{}", index));

        let mut expire = match ExpireClean::new(entry.expire) {
            Ok(expire) => expire,
            Err(e) => {
                warn!("Skipping scenario entry '{}': {}", name, e);
                continue;
            }
        };
        if entry.animate_opacity {
            expire = expire.animate_opacity();
        }

        let mut entity = world.spawn((Active::new(entry.active), View::default(), expire));

        let toggles: Vec<ActiveToggle> = entry
            .activate_at
            .map(|at| ActiveToggle { at, active: true })
            .into_iter()
            .chain(
                entry
                    .deactivate_at
                    .map(|at| ActiveToggle { at, active: false }),
            )
            .collect();
        if !toggles.is_empty() {
            entity.insert(ScenarioToggles::new(toggles));
        }

        let id = entity.id();
        info!(
            "Spawned '{}' as {:?}: expire={}s fade={} active={}",
            name, id, entry.expire, entry.animate_opacity, entry.active
        );
        spawned.push(id);
    }
    spawned
}

/// Apply scenario activation changes whose time has come.
///
/// Toggle times are compared with the start of the current frame, the same
/// instant the master timer reads when a timer is scheduled during the frame.
pub fn scenario_toggle_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut ScenarioToggles)>,
    mut commands: Commands,
) {
    let frame_start = world_time.elapsed - world_time.delta;
    for (entity, mut toggles) in query.iter_mut() {
        while let Some(toggle) = toggles.pop_due(frame_start) {
            commands.set_active(entity, toggle.active);
        }
        if toggles.is_empty() {
            commands.entity(entity).remove::<ScenarioToggles>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::time::update_world_time;

    #[test]
    fn test_spawn_skips_invalid_entries() {
        let mut world = World::new();
        let data = ScenarioData::from_json(
            r#"{ "entities": [ { "expire": -1.0 }, { "expire": 1.0, "animate_opacity": true } ] }"#,
        )
        .unwrap();

        let spawned = spawn_scenario(&mut world, &data);
        assert_eq!(spawned.len(), 1);
        let ec = world.get::<ExpireClean>(spawned[0]).unwrap();
        assert!(ec.is_animating());
        assert!(world.get::<Active>(spawned[0]).unwrap().value);
        assert!(world.get::<ScenarioToggles>(spawned[0]).is_none());
    }

    #[test]
    fn test_toggles_flip_active_flag() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let data = ScenarioData::from_json(
            r#"{ "entities": [ { "expire": 5.0, "active": false,
                 "activate_at": 0.5, "deactivate_at": 1.0 } ] }"#,
        )
        .unwrap();
        let e = spawn_scenario(&mut world, &data)[0];

        let mut schedule = Schedule::default();
        schedule.add_systems(scenario_toggle_system);

        // frames start at 0.0 and 0.25
        for _ in 0..2 {
            update_world_time(&mut world, 0.25);
            schedule.run(&mut world);
            assert!(!world.get::<Active>(e).unwrap().value);
        }

        // frame starting at 0.5
        update_world_time(&mut world, 0.25);
        schedule.run(&mut world);
        assert!(world.get::<Active>(e).unwrap().value);

        // frame starting at 0.75
        update_world_time(&mut world, 0.5);
        schedule.run(&mut world);
        assert!(world.get::<Active>(e).unwrap().value);

        // frame starting at 1.25
        update_world_time(&mut world, 0.5);
        schedule.run(&mut world);
        assert!(!world.get::<Active>(e).unwrap().value);
        assert!(world.get::<ScenarioToggles>(e).is_none());
    }
}
