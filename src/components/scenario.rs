//! Scenario data for data-driven spawning of expiring entities.
//!
//! A scenario is a JSON file listing entities to spawn with an
//! [`ExpireClean`](crate::components::expireclean::ExpireClean) and optional
//! timed activation changes. It is loaded with
//! [`ScenarioData::load_from_file`] and spawned with
//! [`spawn_scenario`](crate::systems::scenario::spawn_scenario).
//!
//! ```json
//! {
//!   "entities": [
//!     { "name": "spark", "expire": 1.0, "animate_opacity": true },
//!     { "name": "door", "expire": 2.0, "active": false, "activate_at": 0.5,
//!       "deactivate_at": 1.5 }
//!   ]
//! }
//! ```

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

fn default_active() -> bool {
    true
}

/// Structure representing the scenario loaded from JSON.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ScenarioData {
    #[serde(default)]
    pub entities: Vec<ScenarioEntity>,
}

/// A single entity of the scenario.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScenarioEntity {
    /// Name used in log messages.
    #[serde(default)]
    pub name: Option<String>,
    /// Expire duration in seconds.
    pub expire: f32,
    #[serde(default)]
    pub animate_opacity: bool,
    /// Whether the entity starts active.
    #[serde(default = "default_active")]
    pub active: bool,
    /// World time at which the entity is activated.
    #[serde(default)]
    pub activate_at: Option<f32>,
    /// World time at which the entity is deactivated.
    #[serde(default)]
    pub deactivate_at: Option<f32>,
}

impl ScenarioData {
    /// Loads scenario data from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let file_content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario {}: {}", path, e))?;
        Self::from_json(&file_content).map_err(|e| format!("Invalid scenario {}: {}", path, e))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A timed change of an entity's active flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveToggle {
    /// World time in seconds.
    pub at: f32,
    pub active: bool,
}

/// Pending active-flag changes of a scenario entity, earliest first.
#[derive(Component, Debug, Clone, Default)]
pub struct ScenarioToggles {
    toggles: SmallVec<[ActiveToggle; 2]>,
}

impl ScenarioToggles {
    pub fn new(toggles: impl IntoIterator<Item = ActiveToggle>) -> Self {
        let mut toggles: SmallVec<[ActiveToggle; 2]> = toggles.into_iter().collect();
        toggles.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { toggles }
    }

    /// Remove and return the earliest toggle due at `now`, if any.
    pub fn pop_due(&mut self, now: f32) -> Option<ActiveToggle> {
        if self.toggles.first().is_some_and(|t| t.at <= now) {
            Some(self.toggles.remove(0))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }
}
