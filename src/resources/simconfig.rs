//! Simulation configuration resource.
//!
//! Manages simulation settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! fps = 60
//! frames = 240
//! time_scale = 1.0
//!
//! [spawn]
//! count = 8
//! min_expire = 0.5
//! max_expire = 3.0
//! animate_opacity = true
//! corpse_expire = 2.0
//! seed = 42
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_FPS: u32 = 60;
const DEFAULT_FRAMES: u32 = 240;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_SPAWN_COUNT: u32 = 8;
const DEFAULT_MIN_EXPIRE: f32 = 0.5;
const DEFAULT_MAX_EXPIRE: f32 = 3.0;
const DEFAULT_ANIMATE_OPACITY: bool = true;
const DEFAULT_CORPSE_EXPIRE: f32 = 2.0;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Simulation configuration resource.
///
/// Stores the fixed frame rate, run length and the parameters of the random
/// spawner used by the headless driver.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Simulated frames per second (fixed delta is `1 / fps`).
    pub fps: u32,
    /// Number of frames to simulate.
    pub frames: u32,
    /// Multiplier applied to the frame delta.
    pub time_scale: f32,
    /// Number of random entities to spawn.
    pub spawn_count: u32,
    /// Lower bound of random expire durations, in seconds.
    pub min_expire: f32,
    /// Upper bound of random expire durations, in seconds.
    pub max_expire: f32,
    /// Fade spawned entities out while they expire.
    pub animate_opacity: bool,
    /// Seconds a dead entity lingers before it is removed.
    pub corpse_expire: f32,
    /// Seed for the random spawner.
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            fps: DEFAULT_FPS,
            frames: DEFAULT_FRAMES,
            time_scale: DEFAULT_TIME_SCALE,
            spawn_count: DEFAULT_SPAWN_COUNT,
            min_expire: DEFAULT_MIN_EXPIRE,
            max_expire: DEFAULT_MAX_EXPIRE,
            animate_opacity: DEFAULT_ANIMATE_OPACITY,
            corpse_expire: DEFAULT_CORPSE_EXPIRE,
            seed: DEFAULT_SEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Fixed frame delta in seconds.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [simulation] section
        if let Some(fps) = config.getuint("simulation", "fps").ok().flatten() {
            self.fps = (fps as u32).max(1);
        }
        if let Some(frames) = config.getuint("simulation", "frames").ok().flatten() {
            self.frames = frames as u32;
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale").ok().flatten() {
            self.time_scale = (scale as f32).max(0.0);
        }

        // [spawn] section
        if let Some(count) = config.getuint("spawn", "count").ok().flatten() {
            self.spawn_count = count as u32;
        }
        if let Some(min) = config.getfloat("spawn", "min_expire").ok().flatten() {
            self.min_expire = min as f32;
        }
        if let Some(max) = config.getfloat("spawn", "max_expire").ok().flatten() {
            self.max_expire = max as f32;
        }
        if let Some(animate) = config.getbool("spawn", "animate_opacity").ok().flatten() {
            self.animate_opacity = animate;
        }
        if let Some(corpse) = config.getfloat("spawn", "corpse_expire").ok().flatten() {
            self.corpse_expire = corpse as f32;
        }
        if let Some(seed) = config.getuint("spawn", "seed").ok().flatten() {
            self.seed = seed;
        }
        if self.max_expire < self.min_expire {
            std::mem::swap(&mut self.min_expire, &mut self.max_expire);
        }

        info!(
            "Loaded config: {} frames at {} fps (x{}), spawn {} in {}..{}s, fade={}, corpse={}s, seed={}",
            self.frames,
            self.fps,
            self.time_scale,
            self.spawn_count,
            self.min_expire,
            self.max_expire,
            self.animate_opacity,
            self.corpse_expire,
            self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [simulation] section
        config.set("simulation", "fps", Some(self.fps.to_string()));
        config.set("simulation", "frames", Some(self.frames.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));

        // [spawn] section
        config.set("spawn", "count", Some(self.spawn_count.to_string()));
        config.set("spawn", "min_expire", Some(self.min_expire.to_string()));
        config.set("spawn", "max_expire", Some(self.max_expire.to_string()));
        config.set(
            "spawn",
            "animate_opacity",
            Some(self.animate_opacity.to_string()),
        );
        config.set("spawn", "corpse_expire", Some(self.corpse_expire.to_string()));
        config.set("spawn", "seed", Some(self.seed.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
