//! Expire-clean headless simulation.
//!
//! Runs the expire-clean behavior on a fixed-delta ECS loop without a window:
//! - **bevy_ecs** for entity-component-system architecture
//! - **configparser** INI file for simulation settings
//! - **serde_json** scenario files for scripted spawns
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (or `--config`), apply command line overrides
//! 2. Build the ECS world, observers and per-frame schedule
//! 3. Spawn entities from `--scenario`, or random sparks and critters
//! 4. Step the world `frames` times, killing critters on their frame
//! 5. Print a summary of what expired
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 300 --spawn 20
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use expireclean::components::active::Active;
use expireclean::components::alive::Alive;
use expireclean::components::expireclean::ExpireClean;
use expireclean::components::scenario::ScenarioData;
use expireclean::components::view::View;
use expireclean::game;
use expireclean::resources::expirestats::ExpireStats;
use expireclean::resources::mastertimer::MasterTimer;
use expireclean::resources::simconfig::SimConfig;
use expireclean::resources::worldtime::WorldTime;
use expireclean::systems::alive::kill_entity;
use expireclean::systems::scenario::spawn_scenario;
use std::path::PathBuf;

/// Expire-clean simulation
#[derive(Parser)]
#[command(version, about = "Headless simulation of entities that clean themselves up after a while.")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON scenario to spawn instead of random entities.
    #[arg(long, value_name = "PATH")]
    scenario: Option<String>,

    /// Number of frames to simulate.
    #[arg(long)]
    frames: Option<u32>,

    /// Simulated frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Number of random entities to spawn.
    #[arg(long)]
    spawn: Option<u32>,

    /// Seed for the random spawner.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

/// A critter scheduled to be killed on a given frame.
struct PendingKill {
    entity: Entity,
    killer: Entity,
    frame: u32,
}

fn spawn_random(world: &mut World, config: &SimConfig) -> Vec<PendingKill> {
    let mut rng = fastrand::Rng::with_seed(config.seed);
    let span = config.max_expire - config.min_expire;

    for _ in 0..config.spawn_count {
        let seconds = config.min_expire + rng.f32() * span;
        let mut expire = match ExpireClean::new(seconds) {
            Ok(expire) => expire,
            Err(e) => {
                log::warn!("Not spawning spark: {}", e);
                continue;
            }
        };
        if config.animate_opacity {
            expire = expire.animate_opacity();
        }
        let id = world.spawn((Active::default(), View::default(), expire)).id();
        log::debug!("Spawned spark {:?} expiring in {:.2}s", id, seconds);
    }

    // Critters live until killed; the corpse observer cleans them up afterwards.
    let hunter = world.spawn_empty().id();
    (0..config.spawn_count / 2)
        .map(|_| {
            let entity = world.spawn((Alive::default(), View::default())).id();
            let frame = rng.u32(0..config.frames.max(1));
            log::debug!("Critter {:?} dies on frame {}", entity, frame);
            PendingKill {
                entity,
                killer: hunter,
                frame,
            }
        })
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => SimConfig::with_path(path),
        None => SimConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::info!("{}, using defaults", e);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(fps) = cli.fps {
        config.fps = fps.max(1);
    }
    if let Some(spawn) = cli.spawn {
        config.spawn_count = spawn;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let frames = config.frames;
    let dt = config.frame_delta();

    let mut world = game::build_world(config.clone());
    let mut update = game::build_schedule(&mut world);

    let mut kills = match cli.scenario {
        Some(path) => match ScenarioData::load_from_file(&path) {
            Ok(data) => {
                spawn_scenario(&mut world, &data);
                Vec::new()
            }
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => spawn_random(&mut world, &config),
    };
    let spawned = world
        .query_filtered::<Entity, With<View>>()
        .iter(&world)
        .count();
    log::info!("Simulating {} frames at {} fps with {} entities", frames, config.fps, spawned);

    for frame in 0..frames {
        kills.retain(|kill| {
            if kill.frame != frame {
                return true;
            }
            kill_entity(&mut world, kill.entity, kill.killer);
            false
        });
        game::step(&mut world, &mut update, dt);
    }

    let survivors: Vec<Entity> = world
        .query_filtered::<Entity, With<View>>()
        .iter(&world)
        .collect();
    let timer = world.resource::<MasterTimer>();
    for entity in &survivors {
        log::debug!("{:?} survived with {} timer(s) pending", entity, timer.pending_for(*entity));
    }
    let remaining = survivors.len();
    let stats = *world.resource::<ExpireStats>();
    let world_time = *world.resource::<WorldTime>();
    println!(
        "{:.2}s simulated: {} expired, {} remaining, {} timers pending",
        world_time.elapsed,
        stats.expired,
        remaining,
        timer.len()
    );
}
