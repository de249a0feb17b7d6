#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless scripted Wildgrove session.
//!
//! The binary wires the world and the pure systems together the way a
//! rendering host would: one `Tick` per frame, world events fanned out to the
//! systems, and system commands applied back to the world. Input is replaced
//! by a seeded wanderer that holds a light attack and periodically changes
//! direction.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wildgrove_core::{AttackKind, AxisIntent, Command, Event, MoveIntent};
use wildgrove_system_bootstrap::Bootstrap;
use wildgrove_system_progression::Progression;
use wildgrove_system_spawning::{
    Config as SpawnConfig, Spawning, DEFAULT_BOSS_CHANCE, DEFAULT_ENEMY_CHANCE,
};
use wildgrove_world::{self as world, query, World, WorldConfig};

const FRAME: Duration = Duration::from_millis(16);
const WANDER_INTERVAL: u32 = 45;
const UPGRADE_INTERVAL: u32 = 300;

/// Runs a scripted Wildgrove session and prints a summary.
#[derive(Debug, Parser)]
#[command(name = "wildgrove", about = "Headless Wildgrove session runner")]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Overrides the world seed from the configuration file.
    #[arg(long)]
    seed: Option<u64>,

    /// Optional TOML file with world configuration overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-frame enemy spawn chance.
    #[arg(long, default_value_t = DEFAULT_ENEMY_CHANCE)]
    enemy_chance: f64,

    /// Per-frame boss spawn chance.
    #[arg(long, default_value_t = DEFAULT_BOSS_CHANCE)]
    boss_chance: f64,

    /// Automatically purchase every affordable upgrade.
    #[arg(long)]
    auto_upgrade: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_world_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }

    let mut world = World::new(config)?;
    let bootstrap = Bootstrap::default();
    let mut spawning = Spawning::new(SpawnConfig::new(
        args.enemy_chance,
        args.boss_chance,
        config.rng_seed.wrapping_add(1),
    )?);
    let mut progression = Progression::default();
    let mut wanderer = ChaCha8Rng::seed_from_u64(config.rng_seed.wrapping_add(2));
    let auto_upgrade = args.auto_upgrade;

    println!("{}", bootstrap.welcome_banner(&world));
    let grid = bootstrap.tile_grid(&world);
    log::info!(
        "world ready: {}x{} tiles of {} units",
        grid.columns(),
        grid.rows(),
        grid.tile_size(),
    );

    let mut events = Vec::new();
    for command in bootstrap.startup_commands() {
        world::apply(&mut world, command, &mut events);
    }
    log_events(&events);

    let mut attacking = false;
    for frame in 0..args.frames {
        let mut events = Vec::new();

        if frame % WANDER_INTERVAL == 0 {
            let intent = random_intent(&mut wanderer);
            world::apply(&mut world, Command::SetMoveIntent { intent }, &mut events);
            if let Some(radians) = facing_of(intent) {
                world::apply(
                    &mut world,
                    Command::SetFacingAngle { radians },
                    &mut events,
                );
            }
        }
        if !attacking {
            world::apply(
                &mut world,
                Command::SetAttackIntent {
                    attack: Some(AttackKind::Light),
                },
                &mut events,
            );
            attacking = true;
        }
        if auto_upgrade && frame % UPGRADE_INTERVAL == 0 {
            world::apply(&mut world, Command::RequestUpgrade, &mut events);
        }

        world::apply(&mut world, Command::Tick { dt: FRAME }, &mut events);

        let mut spawn_commands = Vec::new();
        spawning.handle(&events, &mut spawn_commands);
        for command in spawn_commands {
            world::apply(&mut world, command, &mut events);
        }

        let mut upgrade_commands = Vec::new();
        progression.handle(&events, &mut |_| auto_upgrade, &mut upgrade_commands);
        for command in upgrade_commands {
            world::apply(&mut world, command, &mut events);
        }

        log_events(&events);
    }

    print_summary(&world);
    Ok(())
}

fn load_world_config(path: Option<&std::path::Path>) -> anyhow::Result<WorldConfig> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration from {}", path.display()))?;
    let config: WorldConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse configuration from {}", path.display()))?;
    Ok(config)
}

fn random_intent(rng: &mut ChaCha8Rng) -> MoveIntent {
    MoveIntent::new(random_axis(rng), random_axis(rng))
}

fn random_axis(rng: &mut ChaCha8Rng) -> AxisIntent {
    match rng.gen_range(-1_i8..=1) {
        -1 => AxisIntent::Negative,
        0 => AxisIntent::Still,
        _ => AxisIntent::Positive,
    }
}

fn facing_of(intent: MoveIntent) -> Option<f32> {
    let (dx, dy) = (intent.horizontal().unit(), intent.vertical().unit());
    if dx == 0.0 && dy == 0.0 {
        None
    } else {
        Some(dy.atan2(dx))
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::TimeAdvanced { .. } => {}
            Event::EnemySpawned { enemy } => log::debug!("enemy {} spawned", enemy.get()),
            Event::BossSpawned { boss, class } => {
                log::info!("boss {} spawned ({class:?})", boss.get());
            }
            Event::CheckpointActivated { checkpoint } => {
                log::info!("checkpoint {} activated", checkpoint.get());
            }
            Event::BossEngaged { boss } => {
                log::info!("boss {} engaged; bosses are awake", boss.get());
            }
            Event::EnemyDefeated { enemy, reward } => {
                log::debug!("enemy {} defeated for {reward} leaves", enemy.get());
            }
            Event::BossDefeated {
                boss,
                class,
                reward,
            } => {
                log::info!("boss {} defeated ({class:?}) for {reward} leaves", boss.get());
            }
            Event::BossRemoved { boss } => log::debug!("boss {} removed", boss.get()),
            Event::PlayerDefeated => log::warn!("player defeated; leaves forfeited"),
            Event::PlayerRespawned => log::info!("player respawned at checkpoint"),
            Event::UpgradeOffered { cost } => log::debug!("upgrade offered for {cost} leaves"),
            Event::UpgradeApplied { level, cost } => {
                log::info!("upgrade applied: level {level} for {cost} leaves");
            }
            Event::UpgradeRejected {
                required,
                available,
            } => {
                log::debug!("upgrade rejected: {required} required, {available} held");
            }
        }
    }
}

fn print_summary(world: &World) {
    let player = query::player_snapshot(world);
    println!(
        "session complete: level {}, {} leaves, {}/{} health",
        player.level,
        player.leaves,
        player.health,
        player.max_health,
    );
    println!(
        "{} enemies and {} bosses alive; bosses {}",
        query::enemy_view(world).len(),
        query::boss_view(world).len(),
        if query::boss_active(world) {
            "awake"
        } else {
            "dormant"
        },
    );
}
