//! Timer expiration events.
//!
//! When an action scheduled on the [`MasterTimer`](crate::resources::mastertimer::MasterTimer)
//! reaches its deadline, a [`TimerEvent`] is triggered. Observers match on the
//! `signal` (and usually the `handle`) to decide whether the event is theirs.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<TimerEvent>, mut commands: Commands| {
//!     let event = trigger.event();
//!     match event.signal.as_str() {
//!         "explode" => {
//!             commands.entity(event.entity).try_despawn();
//!         }
//!         _ => {}
//!     }
//! });
//! ```
//!
//! # Related
//!
//! - [`crate::resources::mastertimer::MasterTimer`] – the timer service
//! - [`crate::systems::mastertimer::update_master_timer`] – the system that emits these events

use bevy_ecs::prelude::*;

use crate::resources::mastertimer::TimerHandle;

/// Event emitted when a scheduled one-shot action fires.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity the action was scheduled for.
    pub entity: Entity,
    /// Handle returned when the action was scheduled.
    pub handle: TimerHandle,
    /// The signal name given at schedule time.
    pub signal: String,
}
