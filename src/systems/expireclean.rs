//! Expire-clean systems and observers.
//!
//! These drive the [`ExpireClean`] component through its lifecycle:
//!
//! - [`expire_clean_active_observer`] – schedules/cancels on active-state changes
//! - [`expire_clean_system`] – per-frame tick (fallback scheduling and fade)
//! - [`expire_clean_timer_observer`] – removes the entity when its timer fires
//! - [`expire_stats_observer`] – counts expiries into [`ExpireStats`]
//!
//! # System Flow
//!
//! Each frame, in order:
//!
//! 1. `expire_clean_system` schedules missing timers and advances fades
//! 2. [`update_master_timer`](crate::systems::mastertimer::update_master_timer)
//!    fires due timers; `expire_clean_timer_observer` despawns their entities
//!
//! Attaching and detaching are not systems: the component's own insert and
//! replace hooks handle them the moment the component changes.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::active::{Active, is_entity_active};
use crate::components::expireclean::{EXPIRE_CLEAN_SIGNAL, ExpireClean};
use crate::components::view::View;
use crate::events::active::ActiveChangedEvent;
use crate::events::expireclean::ExpiredEvent;
use crate::events::timer::TimerEvent;
use crate::resources::expirestats::ExpireStats;
use crate::resources::mastertimer::MasterTimer;
use crate::resources::worldtime::WorldTime;

/// Active-state subscriber for entities carrying an [`ExpireClean`].
pub fn expire_clean_active_observer(
    trigger: On<ActiveChangedEvent>,
    mut query: Query<&mut ExpireClean>,
    mut timer: ResMut<MasterTimer>,
) {
    let event = trigger.event();
    if let Ok(mut expire) = query.get_mut(event.entity) {
        expire.on_active_changed(event.entity, event.active, &mut timer);
    }
}

/// Per-frame tick for attached components on active entities.
///
/// Inactive entities are not ticked, so their fade and fallback scheduling
/// are on hold until they are activated again.
pub fn expire_clean_system(
    world_time: Res<WorldTime>,
    mut timer: ResMut<MasterTimer>,
    mut query: Query<(Entity, &mut ExpireClean, Option<&Active>, Option<&mut View>)>,
) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for (entity, mut expire, active, mut view) in query.iter_mut() {
        if !expire.is_attached() || !is_entity_active(active) {
            continue;
        }
        expire.on_tick(entity, dt, &mut timer, view.as_deref_mut());
    }
}

/// Removes entities whose expire timer fired.
///
/// Events with another signal, for entities that no longer carry the
/// component, or for a handle that is not the component's current one are
/// ignored.
pub fn expire_clean_timer_observer(
    trigger: On<TimerEvent>,
    mut query: Query<&mut ExpireClean>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.signal != EXPIRE_CLEAN_SIGNAL {
        return;
    }
    let Ok(mut expire) = query.get_mut(event.entity) else {
        return;
    };
    if !expire.on_timer_fired(event.handle) {
        debug!(
            "ignoring stale expire timer {:?} of {:?}",
            event.handle, event.entity
        );
        return;
    }

    debug!("{:?} expired after {:.3}s", event.entity, expire.expire());
    commands.trigger(ExpiredEvent {
        entity: event.entity,
    });
    commands.entity(event.entity).try_despawn();
}

/// Count expiries.
pub fn expire_stats_observer(_trigger: On<ExpiredEvent>, stats: Option<ResMut<ExpireStats>>) {
    if let Some(mut stats) = stats {
        stats.expired += 1;
    }
}
