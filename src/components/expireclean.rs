//! Expire-clean component: removes an entity from the world after a duration.
//!
//! Useful for special effects, corpses, debris and any other temporary
//! entity. Unlike a countdown that starts at spawn, the expire timer starts
//! when the entity becomes active in the world, and it is cancelled if the
//! entity is deactivated before it expires.
//!
//! # How It Works
//!
//! 1. `ExpireClean` is inserted on an entity. Nothing is scheduled yet. The
//!    component's `on_insert` hook calls [`ExpireClean::on_attach`], which
//!    subscribes it to its entity's active-state changes. This also happens
//!    when a new `ExpireClean` replaces an existing one.
//! 2. The timer is scheduled on the [`MasterTimer`] either when the entity
//!    becomes active ([`expire_clean_active_observer`]) or on the first
//!    frame tick if the entity was already active ([`expire_clean_system`]).
//!    The scheduling tick already counts toward the fade, like it counts
//!    toward the timer.
//! 3. If the entity is deactivated, the pending timer is cancelled.
//! 4. When the timer fires, [`expire_clean_timer_observer`] triggers an
//!    [`ExpiredEvent`] and despawns the entity.
//! 5. If the component is removed or replaced, or the entity is despawned by
//!    other code, the `on_replace` hook cancels that component's own pending
//!    timer. A fired timer was already consumed, so it is never cancelled.
//!
//! With [`ExpireClean::animate_opacity`], the entity's [`View`] fades linearly
//! from opaque to transparent over the expire window.
//!
//! # Example
//!
//! ```ignore
//! let fx = ExpireClean::new(0.75)?.animate_opacity();
//! world.spawn((View::default(), fx));
//! ```
//!
//! [`MasterTimer`]: crate::resources::mastertimer::MasterTimer
//! [`expire_clean_active_observer`]: crate::systems::expireclean::expire_clean_active_observer
//! [`expire_clean_system`]: crate::systems::expireclean::expire_clean_system
//! [`expire_clean_timer_observer`]: crate::systems::expireclean::expire_clean_timer_observer
//! [`ExpiredEvent`]: crate::events::expireclean::ExpiredEvent

use std::time::Duration;

use bevy_ecs::lifecycle::HookContext;
use bevy_ecs::prelude::{Component, Entity};
use bevy_ecs::world::DeferredWorld;
use log::debug;
use thiserror::Error;

use crate::components::view::View;
use crate::resources::mastertimer::{MasterTimer, TimerHandle};

/// Signal name used for expire-clean actions on the [`MasterTimer`].
pub const EXPIRE_CLEAN_SIGNAL: &str = "expire_clean";

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ExpireCleanError {
    #[error("invalid expire duration {0}: must be finite and non-negative")]
    InvalidDuration(f32),
}

/// Removes its entity from the world once `expire` seconds of active time
/// have elapsed.
#[derive(Component, Debug)]
#[component(on_insert = attach_expire_clean, on_replace = detach_expire_clean)]
pub struct ExpireClean {
    expire: f32,
    animate: bool,
    attached: bool,
    pending: Option<TimerHandle>,
    elapsed: f32,
}

impl ExpireClean {
    /// Create a component that expires `seconds` after the entity becomes
    /// active. The timer does not start here.
    ///
    /// # Errors
    ///
    /// Returns [`ExpireCleanError::InvalidDuration`] for negative, NaN or
    /// infinite durations. Zero is allowed and expires on the next timer tick.
    pub fn new(seconds: f32) -> Result<Self, ExpireCleanError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ExpireCleanError::InvalidDuration(seconds));
        }
        Ok(Self::with_seconds(seconds))
    }

    /// Create a component from a [`Duration`], which can never be negative.
    pub fn from_duration(expire: Duration) -> Self {
        Self::with_seconds(expire.as_secs_f32())
    }

    fn with_seconds(seconds: f32) -> Self {
        ExpireClean {
            expire: seconds,
            animate: false,
            attached: false,
            pending: None,
            elapsed: 0.0,
        }
    }

    /// Enables diminishing opacity over time.
    pub fn animate_opacity(mut self) -> Self {
        self.animate = true;
        self
    }

    /// Expire duration in seconds.
    pub fn expire(&self) -> f32 {
        self.expire
    }

    pub fn is_animating(&self) -> bool {
        self.animate
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Seconds accumulated while the current timer has been pending.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Opacity the view should have for the current elapsed time.
    ///
    /// Always `1.0` when opacity animation is disabled.
    pub fn opacity(&self) -> f32 {
        if self.animate {
            fade_opacity(self.elapsed, self.expire)
        } else {
            1.0
        }
    }

    /// Attach hook. Subscribes the component to its entity's active-state
    /// changes; notifications received before this are ignored.
    pub fn on_attach(&mut self) {
        self.attached = true;
    }

    /// Active-state listener.
    ///
    /// Becoming active schedules the expire timer unless one is already
    /// pending. Becoming inactive cancels the pending timer; with nothing
    /// pending this does nothing.
    pub fn on_active_changed(&mut self, entity: Entity, active: bool, timer: &mut MasterTimer) {
        if !self.attached {
            return;
        }
        if active {
            if self.pending.is_none() {
                self.schedule(entity, timer);
            }
        } else if let Some(handle) = self.pending.take() {
            let left = timer.remaining(handle).unwrap_or(0.0);
            timer.cancel(handle);
            debug!("expire timer of {:?} cancelled with {:.3}s left", entity, left);
        }
    }

    /// Per-frame hook for an active entity.
    ///
    /// Schedules the timer if none is pending yet, then advances the fade
    /// clock and, when animating, writes the new opacity to `view`.
    pub fn on_tick(
        &mut self,
        entity: Entity,
        delta: f32,
        timer: &mut MasterTimer,
        view: Option<&mut View>,
    ) {
        if self.pending.is_none() {
            self.schedule(entity, timer);
        }

        self.elapsed += delta.max(0.0);
        if self.animate {
            if let Some(view) = view {
                view.set_opacity(self.opacity());
            }
        }
    }

    /// Consume the pending handle if `handle` is the timer that just fired.
    ///
    /// Returns `true` when the entity should now be removed. A fired timer
    /// is never cancelled afterwards because the handle is gone.
    pub fn on_timer_fired(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn schedule(&mut self, entity: Entity, timer: &mut MasterTimer) {
        self.elapsed = 0.0;
        let handle = timer.run_once_after(entity, EXPIRE_CLEAN_SIGNAL, self.expire);
        debug!(
            "expire timer of {:?} scheduled at {:.3}s to fire in {:.3}s ({:?})",
            entity,
            timer.now(),
            self.expire,
            handle
        );
        self.pending = Some(handle);
    }
}

/// Runs on every insert, including one that replaces an existing component.
fn attach_expire_clean(mut world: DeferredWorld, context: HookContext) {
    if let Some(mut expire) = world.get_mut::<ExpireClean>(context.entity) {
        expire.on_attach();
    }
}

/// Runs before the component is removed, replaced or despawned with its
/// entity. Cancels exactly the timer this component owns.
fn detach_expire_clean(mut world: DeferredWorld, context: HookContext) {
    let Some(handle) = world
        .get::<ExpireClean>(context.entity)
        .and_then(ExpireClean::pending)
    else {
        return;
    };
    if let Some(mut timer) = world.get_resource_mut::<MasterTimer>() {
        if timer.cancel(handle) {
            debug!("{:?} detached, expire timer {:?} cancelled", context.entity, handle);
        }
    }
}

/// Linear fade from `1.0` at `elapsed == 0` to `0.0` at `elapsed >= expire`.
///
/// A zero `expire` is fully transparent immediately.
pub fn fade_opacity(elapsed: f32, expire: f32) -> f32 {
    if elapsed >= expire {
        0.0
    } else {
        (1.0 - elapsed / expire).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn some_entity() -> Entity {
        World::new().spawn_empty().id()
    }

    #[test]
    fn test_new_rejects_invalid_durations() {
        assert_eq!(
            ExpireClean::new(-1.0).unwrap_err(),
            ExpireCleanError::InvalidDuration(-1.0)
        );
        assert!(ExpireClean::new(f32::INFINITY).is_err());
        assert!(ExpireClean::new(f32::NAN).is_err());
        assert!(ExpireClean::new(0.0).is_ok());
    }

    #[test]
    fn test_new_does_not_schedule() {
        let ec = ExpireClean::new(2.0).unwrap();
        assert_eq!(ec.expire(), 2.0);
        assert!(!ec.is_animating());
        assert!(!ec.is_attached());
        assert!(!ec.is_pending());
        assert_eq!(ec.elapsed(), 0.0);
    }

    #[test]
    fn test_from_duration() {
        let ec = ExpireClean::from_duration(Duration::from_millis(1500));
        assert!(approx_eq(ec.expire(), 1.5));
    }

    #[test]
    fn test_animate_opacity_only_sets_flag() {
        let ec = ExpireClean::new(1.0).unwrap().animate_opacity();
        assert!(ec.is_animating());
        assert!(!ec.is_pending());
        assert!(!ec.is_attached());
    }

    #[test]
    fn test_fade_endpoints_and_monotonic() {
        assert_eq!(fade_opacity(0.0, 2.0), 1.0);
        assert_eq!(fade_opacity(2.0, 2.0), 0.0);
        assert_eq!(fade_opacity(3.0, 2.0), 0.0);
        assert_eq!(fade_opacity(0.0, 0.0), 0.0);

        let mut last = 1.0;
        for step in 0..=100 {
            let o = fade_opacity(step as f32 * 0.02, 2.0);
            assert!(o <= last);
            last = o;
        }
    }

    #[test]
    fn test_first_tick_schedules_exactly_one_timer() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut ec = ExpireClean::new(1.0).unwrap();
        ec.on_attach();

        ec.on_tick(e, 0.1, &mut timer, None);
        assert!(ec.is_pending());
        assert_eq!(timer.len(), 1);
        // the scheduling tick counts toward the fade
        assert!(approx_eq(ec.elapsed(), 0.1));

        for _ in 0..5 {
            ec.on_tick(e, 0.1, &mut timer, None);
        }
        assert_eq!(timer.len(), 1);
    }

    #[test]
    fn test_activation_schedules_and_deactivation_cancels() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut ec = ExpireClean::new(1.0).unwrap();
        ec.on_attach();

        ec.on_active_changed(e, true, &mut timer);
        let handle = ec.pending().unwrap();
        assert!(timer.is_pending(handle));

        // activating again keeps the same timer
        ec.on_active_changed(e, true, &mut timer);
        assert_eq!(ec.pending(), Some(handle));
        assert_eq!(timer.len(), 1);

        ec.on_active_changed(e, false, &mut timer);
        assert!(!ec.is_pending());
        assert!(timer.is_empty());
    }

    #[test]
    fn test_deactivation_without_timer_is_noop() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut ec = ExpireClean::new(1.0).unwrap();
        ec.on_attach();

        ec.on_active_changed(e, false, &mut timer);
        assert!(!ec.is_pending());
        assert!(timer.is_empty());
    }

    #[test]
    fn test_notifications_before_attach_are_ignored() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut ec = ExpireClean::new(1.0).unwrap();

        ec.on_active_changed(e, true, &mut timer);
        assert!(!ec.is_pending());
        assert!(timer.is_empty());
    }

    #[test]
    fn test_tick_fades_view_when_animating() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut view = View::default();
        let mut ec = ExpireClean::new(1.0).unwrap().animate_opacity();
        ec.on_attach();
        ec.on_active_changed(e, true, &mut timer);

        ec.on_tick(e, 0.25, &mut timer, Some(&mut view));
        ec.on_tick(e, 0.25, &mut timer, Some(&mut view));
        assert!(approx_eq(view.opacity(), 0.5));

        ec.on_tick(e, 0.25, &mut timer, Some(&mut view));
        ec.on_tick(e, 0.25, &mut timer, Some(&mut view));
        assert_eq!(view.opacity(), 0.0);
    }

    #[test]
    fn test_tick_leaves_view_alone_without_animation() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut view = View::new(0.8);
        let mut ec = ExpireClean::new(1.0).unwrap();
        ec.on_attach();
        ec.on_active_changed(e, true, &mut timer);

        ec.on_tick(e, 0.5, &mut timer, Some(&mut view));
        assert_eq!(view.opacity(), 0.8);
        assert_eq!(ec.opacity(), 1.0);
    }

    #[test]
    fn test_zero_duration_fades_without_dividing() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut view = View::default();
        let mut ec = ExpireClean::new(0.0).unwrap().animate_opacity();
        ec.on_attach();
        ec.on_active_changed(e, true, &mut timer);

        ec.on_tick(e, 0.0, &mut timer, Some(&mut view));
        assert_eq!(view.opacity(), 0.0);
    }

    #[test]
    fn test_reschedule_restarts_fade() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut ec = ExpireClean::new(1.0).unwrap().animate_opacity();
        ec.on_attach();
        ec.on_active_changed(e, true, &mut timer);
        ec.on_tick(e, 0.5, &mut timer, None);
        assert!(approx_eq(ec.elapsed(), 0.5));

        ec.on_active_changed(e, false, &mut timer);
        ec.on_active_changed(e, true, &mut timer);
        assert_eq!(ec.elapsed(), 0.0);
        assert_eq!(ec.opacity(), 1.0);
    }

    #[test]
    fn test_timer_fired_consumes_matching_handle_only() {
        let e = some_entity();
        let mut timer = MasterTimer::new();
        let mut ec = ExpireClean::new(1.0).unwrap();
        ec.on_attach();
        ec.on_active_changed(e, true, &mut timer);
        let current = ec.pending().unwrap();

        let stale = timer.run_once_after(e, EXPIRE_CLEAN_SIGNAL, 5.0);
        assert!(!ec.on_timer_fired(stale));
        assert!(ec.is_pending());

        assert!(ec.on_timer_fired(current));
        assert!(!ec.is_pending());
        assert!(!ec.on_timer_fired(current));
    }
}
