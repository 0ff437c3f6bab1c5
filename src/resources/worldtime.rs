//! Simulation time resource.
//!
//! [`WorldTime`] is updated once per frame by
//! [`update_world_time`](crate::systems::time::update_world_time). Systems read
//! `delta` (already scaled by `time_scale`) to advance their own clocks.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since the simulation started.
    pub elapsed: f32,
    /// Scaled seconds of the current frame.
    pub delta: f32,
    /// Multiplier applied to the raw frame delta.
    pub time_scale: f32,
    /// Number of frames advanced so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unscaled() {
        let wt = WorldTime::default();
        assert_eq!(wt.elapsed, 0.0);
        assert_eq!(wt.delta, 0.0);
        assert_eq!(wt.time_scale, 1.0);
        assert_eq!(wt.frame_count, 0);
    }

    #[test]
    fn test_with_time_scale_rejects_negative() {
        assert_eq!(WorldTime::default().with_time_scale(0.5).time_scale, 0.5);
        assert_eq!(WorldTime::default().with_time_scale(-2.0).time_scale, 0.0);
    }
}
