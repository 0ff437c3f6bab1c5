//! One-shot timer service.
//!
//! [`MasterTimer`] keeps a table of actions scheduled to fire once after a
//! delay, measured in scaled world time. Each action belongs to an entity and
//! carries a signal name so observers can tell who scheduled it. When the
//! [`update_master_timer`](crate::systems::mastertimer::update_master_timer)
//! system advances the clock past an action's deadline, the action is removed
//! and a [`TimerEvent`](crate::events::timer::TimerEvent) is triggered.
//!
//! Handles are never reused, so a stale handle can always be cancelled safely:
//! it simply no longer matches anything.
//!
//! # Example
//!
//! ```ignore
//! let handle = timer.run_once_after(entity, "explode", 1.5);
//! // later, if the bomb is defused
//! timer.cancel(handle);
//! ```

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Opaque handle to a scheduled one-shot action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledAction {
    entity: Entity,
    signal: String,
    deadline: f64,
}

/// An action that reached its deadline during [`MasterTimer::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub entity: Entity,
    pub signal: String,
}

/// Engine-wide scheduler of one-shot delayed actions.
#[derive(Resource, Debug, Default)]
pub struct MasterTimer {
    now: f64,
    next_id: u64,
    actions: FxHashMap<TimerHandle, ScheduledAction>,
}

impl MasterTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current timer clock in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `signal` for `entity` to fire once after `seconds`.
    ///
    /// Negative delays are clamped to zero, so the action fires on the next
    /// [`advance`](Self::advance).
    pub fn run_once_after(
        &mut self,
        entity: Entity,
        signal: impl Into<String>,
        seconds: f32,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.actions.insert(
            handle,
            ScheduledAction {
                entity,
                signal: signal.into(),
                deadline: self.now + seconds.max(0.0) as f64,
            },
        );
        handle
    }

    /// Cancel a pending action.
    ///
    /// Returns `false` when the handle already fired, was already cancelled,
    /// or never existed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.actions.remove(&handle).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.actions.contains_key(&handle)
    }

    /// Seconds left before `handle` fires, if it is still pending.
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.actions
            .get(&handle)
            .map(|action| (action.deadline - self.now).max(0.0) as f32)
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of pending actions belonging to `entity`.
    pub fn pending_for(&self, entity: Entity) -> usize {
        self.actions
            .values()
            .filter(|action| action.entity == entity)
            .count()
    }

    /// Move the clock forward by `delta` seconds and pop every action whose
    /// deadline was reached, earliest first.
    pub fn advance(&mut self, delta: f32) -> SmallVec<[FiredTimer; 8]> {
        self.now += delta.max(0.0) as f64;
        let now = self.now;

        let mut due: SmallVec<[(f64, TimerHandle); 8]> = self
            .actions
            .iter()
            .filter(|(_, action)| action.deadline <= now)
            .map(|(handle, action)| (action.deadline, *handle))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        due.into_iter()
            .filter_map(|(_, handle)| {
                self.actions.remove(&handle).map(|action| FiredTimer {
                    handle,
                    entity: action.entity,
                    signal: action.signal,
                })
            })
            .collect()
    }
}
