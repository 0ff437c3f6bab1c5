//! World and schedule setup.
//!
//! [`build_world`] creates an ECS world with every resource and observer the
//! expire-clean behavior needs. [`build_schedule`] returns the per-frame
//! schedule with the systems in the order they must run. [`step`] advances
//! one frame.
//!
//! ```ignore
//! let mut world = build_world(SimConfig::new());
//! let mut update = build_schedule(&mut world);
//! world.spawn(ExpireClean::new(2.0)?.animate_opacity());
//! for _ in 0..120 {
//!     step(&mut world, &mut update, 1.0 / 60.0);
//! }
//! ```

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;

use crate::resources::expirestats::ExpireStats;
use crate::resources::mastertimer::MasterTimer;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::alive::corpse_expire_observer;
use crate::systems::expireclean::{
    expire_clean_active_observer, expire_clean_system, expire_clean_timer_observer,
    expire_stats_observer,
};
use crate::systems::mastertimer::update_master_timer;
use crate::systems::scenario::scenario_toggle_system;
use crate::systems::time::update_world_time;

/// Create a world with resources and observers registered.
pub fn build_world(config: SimConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(MasterTimer::new());
    world.insert_resource(ExpireStats::default());
    world.insert_resource(config);

    world.spawn(Observer::new(expire_clean_active_observer));
    world.spawn(Observer::new(expire_clean_timer_observer));
    world.spawn(Observer::new(expire_stats_observer));
    world.spawn(Observer::new(corpse_expire_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();
    world
}

/// Build the per-frame schedule.
///
/// The expire-clean tick runs before the timer service advances, so a timer
/// scheduled by the fallback path counts the frame it was scheduled in, and so
/// does its fade.
pub fn build_schedule(world: &mut World) -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            scenario_toggle_system,
            expire_clean_system,
            update_master_timer,
        )
            .chain(),
    );
    update
        .initialize(world)
        .expect("Failed to initialize schedule");
    update
}

/// Advance the world by one frame of `dt` unscaled seconds.
pub fn step(world: &mut World, update: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    update.run(world);
    world.clear_trackers(); // Clear changed components for next frame
}
