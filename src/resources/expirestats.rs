//! Running counters for expire-clean activity.
//!
//! Updated by [`expire_stats_observer`](crate::systems::expireclean::expire_stats_observer).
//! The resource is optional; without it nothing is counted.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpireStats {
    /// Entities removed because their expire timer fired.
    pub expired: u32,
}
