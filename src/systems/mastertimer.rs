//! Timer service update system.
//!
//! [`update_master_timer`] advances the [`MasterTimer`] by the scaled frame
//! delta and triggers a [`TimerEvent`] for every action that reached its
//! deadline. Observers run when the system's commands are applied, still
//! within the same frame.

use bevy_ecs::prelude::*;

use crate::events::timer::TimerEvent;
use crate::resources::mastertimer::MasterTimer;
use crate::resources::worldtime::WorldTime;

/// Advance the timer service and emit events for fired actions.
pub fn update_master_timer(
    world_time: Res<WorldTime>,
    mut timer: ResMut<MasterTimer>,
    mut commands: Commands,
) {
    for fired in timer.advance(world_time.delta) {
        commands.trigger(TimerEvent {
            entity: fired.entity,
            handle: fired.handle,
            signal: fired.signal,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_fired_actions_become_events() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.5,
            ..Default::default()
        });
        world.insert_resource(MasterTimer::new());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        world.add_observer(move |trigger: On<TimerEvent>| {
            seen_clone.lock().unwrap().push(trigger.event().clone());
        });
        world.flush();

        let e = world.spawn_empty().id();
        let handle = world
            .resource_mut::<MasterTimer>()
            .run_once_after(e, "ping", 1.0);

        let mut schedule = Schedule::default();
        schedule.add_systems(update_master_timer);

        schedule.run(&mut world);
        assert!(seen.lock().unwrap().is_empty());

        schedule.run(&mut world);
        schedule.run(&mut world);
        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![TimerEvent {
                entity: e,
                handle,
                signal: "ping".to_string()
            }]
        );
    }
}
