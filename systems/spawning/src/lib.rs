#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that rolls per-frame spawn chances.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wildgrove_core::{Command, ConfigError, Event};

/// Per-frame probability of a regular enemy spawn attempt.
pub const DEFAULT_ENEMY_CHANCE: f64 = 0.01;
/// Per-frame probability of a regular boss spawn attempt.
pub const DEFAULT_BOSS_CHANCE: f64 = 0.001;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    enemy_chance: f64,
    boss_chance: f64,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from per-frame spawn chances and a seed.
    ///
    /// # Errors
    ///
    /// Rejects chances outside `[0.0, 1.0]`.
    pub fn new(enemy_chance: f64, boss_chance: f64, rng_seed: u64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&enemy_chance) {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: "enemy_chance",
                value: enemy_chance,
            });
        }
        if !(0.0..=1.0).contains(&boss_chance) {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: "boss_chance",
                value: boss_chance,
            });
        }
        Ok(Self {
            enemy_chance,
            boss_chance,
            rng_seed,
        })
    }
}

/// Pure system that rolls both spawn chances once per advanced frame.
///
/// The system only decides when to attempt a spawn. Placement, the live-entity
/// caps, and the boss spacing buffer all belong to the world, which is free to
/// discard an attempt.
#[derive(Debug)]
pub struct Spawning {
    enemy_chance: f64,
    boss_chance: f64,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            enemy_chance: config.enemy_chance,
            boss_chance: config.boss_chance,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and emits spawn commands for each advanced frame.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::TimeAdvanced { .. } = event {
                // Enemy roll first, then boss roll, so replay order is fixed.
                if self.rng.gen_bool(self.enemy_chance) {
                    out.push(Command::SpawnEnemy);
                }
                if self.rng.gen_bool(self.boss_chance) {
                    out.push(Command::SpawnBoss);
                }
            }
        }
    }
}
