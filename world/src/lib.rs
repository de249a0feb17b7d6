#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Wildgrove.
//!
//! The world owns every piece of mutable simulation state: the tile grid,
//! checkpoints, the player, the live enemy and boss collections, the
//! boss-engagement latch, and the deferred-action queue. Adapters and systems
//! never touch that state directly; they submit [`Command`] values through
//! [`apply`] and observe the outcome through broadcast [`Event`] values and
//! the read-only [`query`] module.

mod deferred;
mod entities;
mod grid;

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use wildgrove_core::{
    BossClass, BossId, BossPattern, CheckpointId, Command, ConfigError, EnemyId, Event,
    ENEMY_REWARD, WELCOME_BANNER,
};

use crate::deferred::{DeferredKind, DeferredQueue};
use crate::entities::{Boss, Enemy, Player};
pub use crate::grid::{Checkpoint, TileGrid, TileKind};

/// Real time between a player's defeat and their respawn.
const RESPAWN_DELAY: Duration = Duration::from_millis(2000);
/// Real time a defeated boss lingers before leaving the live collection.
const BOSS_REMOVAL_DELAY: Duration = Duration::from_millis(1000);
/// Spacing buffer, in tiles, enforced between regular boss spawn candidates
/// and live bosses.
const BOSS_SPAWN_BUFFER_TILES: f32 = 5.0;
/// Spacing buffer, in tiles, enforced when seeding legend bosses.
const LEGEND_SPAWN_BUFFER_TILES: f32 = 10.0;

const DEFAULT_RNG_SEED: u64 = 0x517c_c1b7_2722_0a95;

/// Construction-time configuration for a [`World`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of a square tile in world units.
    pub tile_size: f32,
    /// Number of tile columns in the grid.
    pub columns: u32,
    /// Number of tile rows in the grid.
    pub rows: u32,
    /// Probability that any given tile generates blocked.
    pub blocked_chance: f64,
    /// Number of checkpoint markers placed at startup.
    pub checkpoint_count: u32,
    /// Maximum number of live enemies.
    pub enemy_cap: usize,
    /// Maximum number of live regular bosses. Legend bosses are exempt.
    pub boss_cap: usize,
    /// Seed for the world's random number generator.
    pub rng_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: 40.0,
            columns: 100,
            rows: 100,
            blocked_chance: 0.1,
            checkpoint_count: 20,
            enemy_cap: 50,
            boss_cap: 5,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl WorldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !(0.0..=1.0).contains(&self.blocked_chance) {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: "blocked_chance",
                value: self.blocked_chance,
            });
        }
        Ok(())
    }
}

/// Represents the authoritative Wildgrove world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: TileGrid,
    checkpoints: Vec<Checkpoint>,
    player: Player,
    enemies: Vec<Enemy>,
    bosses: Vec<Boss>,
    /// Latched true by the first player hit on any boss; never reset.
    boss_active: bool,
    clock: Duration,
    deferred: DeferredQueue,
    rng: ChaCha8Rng,
    next_enemy_id: u32,
    next_boss_id: u32,
    enemy_cap: usize,
    boss_cap: usize,
}

impl World {
    /// Creates a new world from the provided configuration.
    ///
    /// # Errors
    ///
    /// Rejects invalid configuration up front so the simulation never has to
    /// handle it at runtime.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let grid = TileGrid::generate(
            config.columns,
            config.rows,
            config.tile_size,
            config.blocked_chance,
            &mut rng,
        );
        let checkpoints = grid::place_checkpoints(config.checkpoint_count, &grid, &mut rng);
        let player = Player::spawn(config.tile_size);
        Ok(Self {
            banner: WELCOME_BANNER,
            grid,
            checkpoints,
            player,
            enemies: Vec::new(),
            bosses: Vec::new(),
            boss_active: false,
            clock: Duration::ZERO,
            deferred: DeferredQueue::default(),
            rng,
            next_enemy_id: 0,
            next_boss_id: 0,
            enemy_cap: config.enemy_cap,
            boss_cap: config.boss_cap,
        })
    }

    /// Runs one simulation frame: player movement and clamp, enemy AI, boss
    /// AI, checkpoint overlap, player melee sweep, input cooldown decay,
    /// enemy weapon strikes, deferred firing.
    ///
    /// Spawn commands arrive from the spawning system in response to the
    /// emitted `TimeAdvanced`, so a fresh spawn joins the world between
    /// frames and cannot be struck during its spawn frame.
    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        self.advance_player();
        self.drive_enemies(out_events);
        self.drive_bosses(out_events);
        self.activate_checkpoints(out_events);
        self.sweep_player_melee(out_events);
        if self.player.attack_cooldown > 0 {
            self.player.attack_cooldown -= 1;
        }
        self.strike_with_enemy_weapons(out_events);
        self.fire_deferred(out_events);
    }

    fn advance_player(&mut self) {
        let intent = self.player.intent;
        self.player.x += intent.horizontal().unit() * self.player.speed;
        self.player.y += intent.vertical().unit() * self.player.speed;
        let (width, height) = (self.player.width, self.player.height);
        self.grid
            .clamp_within(&mut self.player.x, &mut self.player.y, width, height);
    }

    /// Greedy per-axis chase toward the player plus contact attacks.
    ///
    /// Each axis steps independently, so diagonal pursuit covers more ground
    /// per frame than axis-aligned pursuit. Enemies are never clamped to the
    /// world bounds.
    fn drive_enemies(&mut self, out_events: &mut Vec<Event>) {
        let player_bounds = self.player.bounds();
        let (px, py) = (self.player.x, self.player.y);

        for index in 0..self.enemies.len() {
            let mut strike_power = None;
            {
                let enemy = &mut self.enemies[index];
                if enemy.x < px {
                    enemy.x += enemy.speed;
                } else if enemy.x > px {
                    enemy.x -= enemy.speed;
                }
                if enemy.y < py {
                    enemy.y += enemy.speed;
                } else if enemy.y > py {
                    enemy.y -= enemy.speed;
                }

                if player_bounds.intersects(&enemy.bounds(), 0.0) {
                    enemy.attacking = true;
                    enemy.facing = (py - enemy.y).atan2(px - enemy.x);
                    if enemy.cooldown == 0 {
                        strike_power = Some(enemy.attack_power);
                        enemy.cooldown = entities::ENEMY_ATTACK_COOLDOWN;
                    }
                } else {
                    enemy.attacking = false;
                }

                if enemy.cooldown > 0 {
                    enemy.cooldown -= 1;
                }
            }
            if let Some(power) = strike_power {
                self.damage_player(power, out_events);
            }
        }
    }

    /// Boss pursuit and pattern attacks, entirely gated on the engagement
    /// latch: until the player lands a first hit, bosses neither move nor
    /// tick their cooldowns.
    fn drive_bosses(&mut self, out_events: &mut Vec<Event>) {
        if !self.boss_active {
            return;
        }
        let player_bounds = self.player.bounds();
        let (px, py) = (self.player.x, self.player.y);

        for index in 0..self.bosses.len() {
            let mut rolls_pattern = false;
            {
                let boss = &mut self.bosses[index];
                if boss.x < px {
                    boss.x += boss.speed;
                } else if boss.x > px {
                    boss.x -= boss.speed;
                }
                if boss.y < py {
                    boss.y += boss.speed;
                } else if boss.y > py {
                    boss.y -= boss.speed;
                }

                if player_bounds.intersects(&boss.bounds(), 0.0) && boss.cooldown == 0 {
                    rolls_pattern = true;
                }
            }

            if rolls_pattern {
                let pattern = BossPattern::ALL[self.rng.gen_range(0..BossPattern::ALL.len())];
                let power = {
                    let boss = &mut self.bosses[index];
                    boss.pattern = Some(pattern);
                    boss.cooldown = entities::BOSS_ATTACK_COOLDOWN;
                    boss.attack_power
                };
                if pattern.is_melee() {
                    self.damage_player(power, out_events);
                }
            }

            let boss = &mut self.bosses[index];
            if boss.cooldown > 0 {
                boss.cooldown -= 1;
            }
        }
    }

    /// Updates the player's stored respawn point from checkpoint overlap.
    /// When several checkpoints overlap in one frame the last one in
    /// creation order wins.
    fn activate_checkpoints(&mut self, out_events: &mut Vec<Event>) {
        let player_bounds = self.player.bounds();
        for (index, checkpoint) in self.checkpoints.iter_mut().enumerate() {
            if player_bounds.intersects(&checkpoint.bounds(), 0.0) {
                if checkpoint.activate() {
                    out_events.push(Event::CheckpointActivated {
                        checkpoint: CheckpointId::new(index as u32),
                    });
                }
                self.player.checkpoint_x = checkpoint.x();
                self.player.checkpoint_y = checkpoint.y();
            }
        }
    }

    /// Sweeps the held melee attack over enemies, then bosses.
    ///
    /// Targets are collected by identifier before any damage resolves so
    /// removal never mutates a collection mid-iteration.
    fn sweep_player_melee(&mut self, out_events: &mut Vec<Event>) {
        let Some(kind) = self.player.attacking else {
            return;
        };
        let zone = kind.strike_zone(&self.player.bounds());
        let power = self.player.attack_power;

        let enemy_targets: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|enemy| zone.intersects(&enemy.bounds(), 0.0))
            .map(|enemy| enemy.id)
            .collect();
        for enemy in enemy_targets {
            self.damage_enemy(enemy, power, out_events);
        }

        let boss_targets: Vec<BossId> = self
            .bosses
            .iter()
            .filter(|boss| zone.intersects(&boss.bounds(), 0.0))
            .map(|boss| boss.id)
            .collect();
        for boss in boss_targets {
            self.engage_boss(boss, out_events);
            self.damage_boss(boss, power, out_events);
        }
    }

    /// Resolves the fixed weapon strip of every enemy flagged attacking.
    /// Unlike the contact attack in the pursuit phase, this strike carries no
    /// cooldown of its own.
    fn strike_with_enemy_weapons(&mut self, out_events: &mut Vec<Event>) {
        let player_bounds = self.player.bounds();
        let strikes: Vec<u32> = self
            .enemies
            .iter()
            .filter(|enemy| enemy.attacking && enemy.weapon_zone().intersects(&player_bounds, 0.0))
            .map(|enemy| enemy.attack_power)
            .collect();
        for power in strikes {
            self.damage_player(power, out_events);
        }
    }

    fn engage_boss(&mut self, boss: BossId, out_events: &mut Vec<Event>) {
        if !self.boss_active {
            self.boss_active = true;
            out_events.push(Event::BossEngaged { boss });
        }
    }

    fn damage_player(&mut self, power: u32, out_events: &mut Vec<Event>) {
        // Already defeated and awaiting respawn; further hits are no-ops so
        // the defeat signal and the deferred respawn stay one-shot.
        if self.player.health == 0 {
            return;
        }
        self.player.health = self.player.health.saturating_sub(power);
        if self.player.health == 0 {
            self.player.leaves = 0;
            self.deferred.schedule(
                self.clock.saturating_add(RESPAWN_DELAY),
                DeferredKind::RespawnPlayer,
            );
            out_events.push(Event::PlayerDefeated);
        }
    }

    fn damage_enemy(&mut self, id: EnemyId, power: u32, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemies.iter().position(|enemy| enemy.id == id) else {
            return;
        };
        let defeated = {
            let enemy = &mut self.enemies[index];
            if enemy.health == 0 {
                return;
            }
            enemy.health = enemy.health.saturating_sub(power);
            enemy.health == 0
        };
        if defeated {
            self.player.leaves = self.player.leaves.saturating_add(ENEMY_REWARD);
            let _ = self.enemies.remove(index);
            out_events.push(Event::EnemyDefeated {
                enemy: id,
                reward: ENEMY_REWARD,
            });
        }
    }

    fn damage_boss(&mut self, id: BossId, power: u32, out_events: &mut Vec<Event>) {
        let Some(index) = self.bosses.iter().position(|boss| boss.id == id) else {
            return;
        };
        let defeated = {
            let boss = &mut self.bosses[index];
            // Defeated bosses linger until their removal fires; repeat hits
            // must not award again or schedule a second removal.
            if boss.health == 0 {
                return;
            }
            boss.health = boss.health.saturating_sub(power);
            boss.health == 0
        };
        if defeated {
            let class = self.bosses[index].class;
            let reward = class.reward();
            self.player.leaves = self.player.leaves.saturating_add(reward);
            self.deferred.schedule(
                self.clock.saturating_add(BOSS_REMOVAL_DELAY),
                DeferredKind::RemoveBoss(id),
            );
            out_events.push(Event::BossDefeated {
                boss: id,
                class,
                reward,
            });
        }
    }

    fn fire_deferred(&mut self, out_events: &mut Vec<Event>) {
        for kind in self.deferred.drain_due(self.clock) {
            match kind {
                DeferredKind::RespawnPlayer => {
                    self.player.x = self.player.checkpoint_x;
                    self.player.y = self.player.checkpoint_y;
                    self.player.health = self.player.max_health;
                    out_events.push(Event::PlayerRespawned);
                }
                DeferredKind::RemoveBoss(id) => {
                    // Existence guard keeps the deferred removal idempotent.
                    if let Some(index) = self.bosses.iter().position(|boss| boss.id == id) {
                        let _ = self.bosses.remove(index);
                        out_events.push(Event::BossRemoved { boss: id });
                    }
                }
            }
        }
    }

    fn spawn_enemy(&mut self, out_events: &mut Vec<Event>) {
        if self.enemies.len() >= self.enemy_cap {
            return;
        }
        let (x, y) = self.grid.random_cell_origin(&mut self.rng);
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies
            .push(Enemy::spawn(id, x, y, self.grid.tile_size()));
        out_events.push(Event::EnemySpawned { enemy: id });
    }

    fn spawn_boss(&mut self, out_events: &mut Vec<Event>) {
        if self.bosses.len() >= self.boss_cap {
            return;
        }
        let (x, y) = self.grid.random_cell_origin(&mut self.rng);
        let candidate = Boss::spawn(BossId::new(self.next_boss_id), x, y, self.grid.tile_size());
        let buffer = BOSS_SPAWN_BUFFER_TILES * self.grid.tile_size();
        if self
            .bosses
            .iter()
            .any(|boss| boss.bounds().intersects(&candidate.bounds(), buffer))
        {
            // Candidate landed too close to a live boss; discard silently.
            return;
        }
        let id = candidate.id;
        self.next_boss_id += 1;
        self.bosses.push(candidate);
        out_events.push(Event::BossSpawned {
            boss: id,
            class: BossClass::Normal,
        });
    }

    fn spawn_legend_bosses(&mut self, out_events: &mut Vec<Event>) {
        for region in wildgrove_core::Region::ALL {
            let (x, y) = self.grid.random_cell_origin(&mut self.rng);
            let candidate = Boss::legend(
                BossId::new(self.next_boss_id),
                x,
                y,
                self.grid.tile_size(),
                region,
            );
            let buffer = LEGEND_SPAWN_BUFFER_TILES * self.grid.tile_size();
            if self
                .bosses
                .iter()
                .any(|boss| boss.bounds().intersects(&candidate.bounds(), buffer))
            {
                continue;
            }
            let id = candidate.id;
            self.next_boss_id += 1;
            self.bosses.push(candidate);
            out_events.push(Event::BossSpawned {
                boss: id,
                class: BossClass::Legend,
            });
        }
    }

    fn upgrade_cost(&self) -> u32 {
        self.player.level.saturating_mul(100)
    }

    fn offer_upgrade(&mut self, out_events: &mut Vec<Event>) {
        let cost = self.upgrade_cost();
        if self.player.leaves >= cost {
            out_events.push(Event::UpgradeOffered { cost });
        } else {
            out_events.push(Event::UpgradeRejected {
                required: cost,
                available: self.player.leaves,
            });
        }
    }

    fn confirm_upgrade(&mut self, out_events: &mut Vec<Event>) {
        let cost = self.upgrade_cost();
        // Re-validated here because confirmation arrives on a later command
        // and the player's balance may have changed in between.
        if self.player.leaves < cost {
            out_events.push(Event::UpgradeRejected {
                required: cost,
                available: self.player.leaves,
            });
            return;
        }
        self.player.leaves -= cost;
        self.player.level += 1;
        self.player.attack_power += 5;
        self.player.max_health += 20;
        self.player.health = self.player.max_health;
        out_events.push(Event::UpgradeApplied {
            level: self.player.level,
            cost,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::SetMoveIntent { intent } => world.player.intent = intent,
        Command::SetAttackIntent { attack } => {
            world.player.attacking = attack;
            if let Some(kind) = attack {
                world.player.attack_cooldown = kind.cooldown_frames();
            }
        }
        Command::SetFacingAngle { radians } => world.player.facing = radians,
        Command::SpawnEnemy => world.spawn_enemy(out_events),
        Command::SpawnBoss => world.spawn_boss(out_events),
        Command::SpawnLegendBosses => world.spawn_legend_bosses(out_events),
        Command::RequestUpgrade => world.offer_upgrade(out_events),
        Command::ConfirmUpgrade => world.confirm_upgrade(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{TileGrid, World};
    use wildgrove_core::{AttackKind, BossClass, BossId, BossPattern, CheckpointId, EnemyId};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's tile grid.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Reports whether boss movement and attacks have been woken by the
    /// player's first hit on any boss.
    #[must_use]
    pub fn boss_active(world: &World) -> bool {
        world.boss_active
    }

    /// Leaves currently held by the player.
    #[must_use]
    pub fn leaves(world: &World) -> u32 {
        world.player.leaves
    }

    /// The player's current level.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.player.level
    }

    /// Captures a read-only snapshot of the player.
    #[must_use]
    pub fn player_snapshot(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            x: player.x,
            y: player.y,
            width: player.width,
            height: player.height,
            health: player.health,
            max_health: player.max_health,
            level: player.level,
            attack_power: player.attack_power,
            leaves: player.leaves,
            attacking: player.attacking,
            attack_cooldown: player.attack_cooldown,
            facing: player.facing,
            checkpoint_x: player.checkpoint_x,
            checkpoint_y: player.checkpoint_y,
        }
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let mut snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                x: enemy.x,
                y: enemy.y,
                width: enemy.width,
                height: enemy.height,
                health: enemy.health,
                max_health: enemy.max_health,
                cooldown: enemy.cooldown,
                attacking: enemy.attacking,
                facing: enemy.facing,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        EnemyView { snapshots }
    }

    /// Captures a read-only view of the live bosses.
    #[must_use]
    pub fn boss_view(world: &World) -> BossView {
        let mut snapshots: Vec<BossSnapshot> = world
            .bosses
            .iter()
            .map(|boss| BossSnapshot {
                id: boss.id,
                name: boss.name.clone(),
                class: boss.class,
                x: boss.x,
                y: boss.y,
                width: boss.width,
                height: boss.height,
                health: boss.health,
                max_health: boss.max_health,
                cooldown: boss.cooldown,
                pattern: boss.pattern,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        BossView { snapshots }
    }

    /// Captures a read-only view of every checkpoint in creation order.
    #[must_use]
    pub fn checkpoint_view(world: &World) -> Vec<CheckpointSnapshot> {
        world
            .checkpoints
            .iter()
            .enumerate()
            .map(|(index, checkpoint)| CheckpointSnapshot {
                id: CheckpointId::new(index as u32),
                x: checkpoint.x(),
                y: checkpoint.y(),
                size: checkpoint.size(),
                active: checkpoint.active(),
            })
            .collect()
    }

    /// Immutable representation of the player used for display.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Horizontal position of the player's upper-left corner.
        pub x: f32,
        /// Vertical position of the player's upper-left corner.
        pub y: f32,
        /// Width of the player's box.
        pub width: f32,
        /// Height of the player's box.
        pub height: f32,
        /// Current health, floored at zero.
        pub health: u32,
        /// Health restored on respawn or upgrade.
        pub max_health: u32,
        /// Current level.
        pub level: u32,
        /// Damage dealt per melee hit.
        pub attack_power: u32,
        /// Leaves currently held.
        pub leaves: u32,
        /// Attack the player is holding, if any.
        pub attacking: Option<AttackKind>,
        /// Frames remaining on the input-pacing cooldown.
        pub attack_cooldown: u32,
        /// Facing angle in radians, presentation only.
        pub facing: f32,
        /// Stored respawn position, horizontal component.
        pub checkpoint_x: f32,
        /// Stored respawn position, vertical component.
        pub checkpoint_y: f32,
    }

    /// Read-only view of the live enemies in deterministic order.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured snapshots ordered by identifier.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Number of live enemies.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no enemies are alive.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single enemy used for display.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Unique identifier assigned at spawn.
        pub id: EnemyId,
        /// Horizontal position of the upper-left corner.
        pub x: f32,
        /// Vertical position of the upper-left corner.
        pub y: f32,
        /// Width of the enemy's box.
        pub width: f32,
        /// Height of the enemy's box.
        pub height: f32,
        /// Current health, floored at zero.
        pub health: u32,
        /// Health the enemy spawned with.
        pub max_health: u32,
        /// Frames until the next contact attack may land.
        pub cooldown: u32,
        /// Whether the enemy overlapped the player this frame.
        pub attacking: bool,
        /// Angle toward the player, presentation only.
        pub facing: f32,
    }

    /// Read-only view of the live bosses in deterministic order.
    #[derive(Clone, Debug, Default)]
    pub struct BossView {
        snapshots: Vec<BossSnapshot>,
    }

    impl BossView {
        /// Iterator over the captured snapshots ordered by identifier.
        pub fn iter(&self) -> impl Iterator<Item = &BossSnapshot> {
            self.snapshots.iter()
        }

        /// Number of live bosses, including defeated ones awaiting removal.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no bosses are alive.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<BossSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single boss used for display.
    #[derive(Clone, Debug, PartialEq)]
    pub struct BossSnapshot {
        /// Unique identifier assigned at spawn.
        pub id: BossId,
        /// Display name; legends carry their region title.
        pub name: String,
        /// Whether the boss is a regular boss or a regional legend.
        pub class: BossClass,
        /// Horizontal position of the upper-left corner.
        pub x: f32,
        /// Vertical position of the upper-left corner.
        pub y: f32,
        /// Width of the boss's box.
        pub width: f32,
        /// Height of the boss's box.
        pub height: f32,
        /// Current health, floored at zero.
        pub health: u32,
        /// Health the boss spawned with.
        pub max_health: u32,
        /// Frames until the next pattern roll.
        pub cooldown: u32,
        /// Pattern selected on the most recent attack roll.
        pub pattern: Option<BossPattern>,
    }

    /// Immutable representation of a checkpoint used for display.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct CheckpointSnapshot {
        /// Identifier in creation order.
        pub id: CheckpointId,
        /// Horizontal position of the marker.
        pub x: f32,
        /// Vertical position of the marker.
        pub y: f32,
        /// Side length of the square marker.
        pub size: f32,
        /// Whether the player has ever touched the marker.
        pub active: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, WorldConfig, World};
    use crate::entities::{Boss, Enemy};
    use std::time::Duration;
    use wildgrove_core::{
        AttackKind, AxisIntent, BossClass, BossId, Command, ConfigError, EnemyId, Event,
        MoveIntent,
    };

    const FRAME: Duration = Duration::from_millis(16);

    fn small_config() -> WorldConfig {
        WorldConfig {
            columns: 10,
            rows: 10,
            blocked_chance: 0.0,
            checkpoint_count: 0,
            rng_seed: 0x5eed,
            ..WorldConfig::default()
        }
    }

    fn world() -> World {
        World::new(small_config()).expect("config is valid")
    }

    fn tick(world: &mut World, dt: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Tick { dt }, &mut events);
        events
    }

    #[test]
    fn construction_rejects_invalid_configuration() {
        let zero_tile = WorldConfig {
            tile_size: 0.0,
            ..small_config()
        };
        assert_eq!(
            World::new(zero_tile).err(),
            Some(ConfigError::InvalidTileSize(0.0)),
        );

        let empty = WorldConfig {
            columns: 0,
            ..small_config()
        };
        assert_eq!(
            World::new(empty).err(),
            Some(ConfigError::EmptyGrid {
                columns: 0,
                rows: 10,
            }),
        );

        let chance = WorldConfig {
            blocked_chance: 1.5,
            ..small_config()
        };
        assert_eq!(
            World::new(chance).err(),
            Some(ConfigError::ProbabilityOutOfRange {
                name: "blocked_chance",
                value: 1.5,
            }),
        );
    }

    #[test]
    fn enemy_spawns_respect_the_cap() {
        let mut world = World::new(WorldConfig {
            enemy_cap: 3,
            ..small_config()
        })
        .expect("config is valid");
        let mut events = Vec::new();

        for _ in 0..5 {
            apply(&mut world, Command::SpawnEnemy, &mut events);
        }

        assert_eq!(query::enemy_view(&world).len(), 3);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn live_bosses_never_violate_the_spacing_buffer() {
        let mut world = World::new(WorldConfig {
            columns: 40,
            rows: 40,
            ..small_config()
        })
        .expect("config is valid");
        let mut events = Vec::new();

        for _ in 0..50 {
            apply(&mut world, Command::SpawnBoss, &mut events);
        }

        let bosses = query::boss_view(&world).into_vec();
        let buffer = 5.0 * query::tile_grid(&world).tile_size();
        for (index, first) in bosses.iter().enumerate() {
            for second in bosses.iter().skip(index + 1) {
                let a = wildgrove_core::BoundingBox::new(first.x, first.y, first.width, first.height);
                let b =
                    wildgrove_core::BoundingBox::new(second.x, second.y, second.width, second.height);
                assert!(!a.intersects(&b, buffer), "bosses spawned too close");
            }
        }
        assert!(bosses.len() <= 5);
    }

    #[test]
    fn legend_seeding_creates_named_regional_bosses() {
        let mut world = World::new(WorldConfig {
            columns: 100,
            rows: 100,
            ..small_config()
        })
        .expect("config is valid");
        let mut events = Vec::new();

        apply(&mut world, Command::SpawnLegendBosses, &mut events);

        let bosses = query::boss_view(&world).into_vec();
        assert_eq!(bosses.len(), events.len());
        assert!(!bosses.is_empty());
        assert!(bosses.len() <= 7);
        for boss in &bosses {
            assert_eq!(boss.class, BossClass::Legend);
            assert!(boss.name.starts_with("Legendary "));
            assert_eq!(boss.health, 2000);
        }
    }

    #[test]
    fn enemies_chase_greedily_and_strike_on_contact() {
        let mut world = world();
        world
            .enemies
            .push(Enemy::spawn(EnemyId::new(0), 42.0, 42.0, 40.0));

        let events = tick(&mut world, FRAME);

        let player = query::player_snapshot(&world);
        // Contact attack (5) plus the weapon-strip strike (5).
        assert_eq!(player.health, 90);
        let enemies = query::enemy_view(&world).into_vec();
        assert_eq!((enemies[0].x, enemies[0].y), (40.0, 40.0));
        assert!(enemies[0].attacking);
        assert_eq!(enemies[0].cooldown, 119);
        assert!(!events.contains(&Event::PlayerDefeated));
    }

    #[test]
    fn distant_enemies_close_faster_on_the_diagonal() {
        let mut world = world();
        world
            .enemies
            .push(Enemy::spawn(EnemyId::new(0), 240.0, 240.0, 40.0));

        let _ = tick(&mut world, FRAME);

        let enemies = query::enemy_view(&world).into_vec();
        // One full speed step on each axis, not normalised.
        assert_eq!((enemies[0].x, enemies[0].y), (238.0, 238.0));
        assert!(!enemies[0].attacking);
    }

    #[test]
    fn enemy_defeat_awards_and_removes_immediately() {
        let mut world = world();
        let mut enemy = Enemy::spawn(EnemyId::new(4), 80.0, 25.0, 40.0);
        enemy.health = 10;
        world.enemies.push(enemy);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetAttackIntent {
                attack: Some(AttackKind::Light),
            },
            &mut events,
        );

        let events = tick(&mut world, FRAME);

        assert!(events.contains(&Event::EnemyDefeated {
            enemy: EnemyId::new(4),
            reward: 10,
        }));
        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::leaves(&world), 10);
    }

    #[test]
    fn first_boss_hit_latches_engagement_exactly_once() {
        let mut world = world();
        world
            .bosses
            .push(Boss::spawn(BossId::new(0), 80.0, 20.0, 40.0));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetAttackIntent {
                attack: Some(AttackKind::Light),
            },
            &mut events,
        );

        assert!(!query::boss_active(&world));
        let first = tick(&mut world, FRAME);
        assert!(first.contains(&Event::BossEngaged {
            boss: BossId::new(0),
        }));
        assert!(query::boss_active(&world));

        let second = tick(&mut world, FRAME);
        assert!(!second
            .iter()
            .any(|event| matches!(event, Event::BossEngaged { .. })));
        assert!(query::boss_active(&world));
    }

    #[test]
    fn bosses_stay_dormant_until_engaged() {
        let mut world = world();
        world
            .bosses
            .push(Boss::spawn(BossId::new(0), 300.0, 300.0, 40.0));

        let _ = tick(&mut world, FRAME);

        let bosses = query::boss_view(&world).into_vec();
        assert_eq!((bosses[0].x, bosses[0].y), (300.0, 300.0));
        assert_eq!(bosses[0].cooldown, 0);
        assert!(bosses[0].pattern.is_none());
    }

    #[test]
    fn engaged_bosses_chase_and_roll_patterns_on_contact() {
        let mut world = world();
        world
            .bosses
            .push(Boss::spawn(BossId::new(0), 80.0, 20.0, 40.0));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetAttackIntent {
                attack: Some(AttackKind::Light),
            },
            &mut events,
        );

        // First tick latches engagement; the boss is still dormant this frame.
        let _ = tick(&mut world, FRAME);
        let bosses = query::boss_view(&world).into_vec();
        assert_eq!((bosses[0].x, bosses[0].y), (80.0, 20.0));
        assert_eq!(query::player_snapshot(&world).health, 100);

        // Second tick: one speed step per axis toward the player, then a
        // pattern roll on contact. The roll resets the cooldown to 200 and
        // the same-frame decay leaves 199 regardless of which pattern came
        // up; only melee patterns damage the player.
        let _ = tick(&mut world, FRAME);
        let bosses = query::boss_view(&world).into_vec();
        assert_eq!((bosses[0].x, bosses[0].y), (77.0, 23.0));
        let pattern = bosses[0].pattern.expect("contact rolls a pattern");
        assert_eq!(bosses[0].cooldown, 199);
        let expected_health = if pattern.is_melee() { 80 } else { 100 };
        assert_eq!(query::player_snapshot(&world).health, expected_health);

        // Third tick: still on cooldown, so no second roll and no further
        // pattern damage; the cooldown just decays.
        let _ = tick(&mut world, FRAME);
        let bosses = query::boss_view(&world).into_vec();
        assert_eq!(bosses[0].pattern, Some(pattern));
        assert_eq!(bosses[0].cooldown, 198);
        assert_eq!(query::player_snapshot(&world).health, expected_health);
    }

    #[test]
    fn boss_defeat_awards_immediately_and_removes_after_delay() {
        let mut world = world();
        let mut boss = Boss::spawn(BossId::new(2), 80.0, 20.0, 40.0);
        boss.health = 10;
        world.bosses.push(boss);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetAttackIntent {
                attack: Some(AttackKind::Light),
            },
            &mut events,
        );

        let first = tick(&mut world, FRAME);
        assert!(first.contains(&Event::BossDefeated {
            boss: BossId::new(2),
            class: BossClass::Normal,
            reward: 100,
        }));
        assert_eq!(query::leaves(&world), 100);
        assert_eq!(query::boss_view(&world).len(), 1, "removal is deferred");

        let second = tick(&mut world, Duration::from_millis(1000));
        assert!(second.contains(&Event::BossRemoved {
            boss: BossId::new(2),
        }));
        assert!(query::boss_view(&world).is_empty());
        // Reward and removal fire exactly once.
        assert_eq!(query::leaves(&world), 100);
        let third = tick(&mut world, Duration::from_millis(1000));
        assert!(!third
            .iter()
            .any(|event| matches!(event, Event::BossRemoved { .. })));
    }

    #[test]
    fn legend_defeat_awards_the_legend_reward() {
        let mut world = world();
        let mut boss = Boss::legend(
            BossId::new(9),
            80.0,
            20.0,
            40.0,
            wildgrove_core::Region::Snow,
        );
        boss.health = 10;
        world.bosses.push(boss);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetAttackIntent {
                attack: Some(AttackKind::Light),
            },
            &mut events,
        );

        let events = tick(&mut world, FRAME);

        assert!(events.contains(&Event::BossDefeated {
            boss: BossId::new(9),
            class: BossClass::Legend,
            reward: 1000,
        }));
        assert_eq!(query::leaves(&world), 1000);
    }

    #[test]
    fn player_defeat_forfeits_leaves_and_respawns_at_checkpoint() {
        let mut world = world();
        world.player.leaves = 55;
        world.player.checkpoint_x = 200.0;
        world.player.checkpoint_y = 240.0;
        let mut enemy = Enemy::spawn(EnemyId::new(0), 42.0, 42.0, 40.0);
        enemy.attack_power = 200;
        world.enemies.push(enemy);

        let first = tick(&mut world, FRAME);
        assert!(first.contains(&Event::PlayerDefeated));
        assert_eq!(query::leaves(&world), 0);
        assert_eq!(query::player_snapshot(&world).health, 0);

        let second = tick(&mut world, Duration::from_millis(2000));
        assert!(second.contains(&Event::PlayerRespawned));
        let player = query::player_snapshot(&world);
        assert_eq!((player.x, player.y), (200.0, 240.0));
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn defeat_signal_is_one_shot_while_awaiting_respawn() {
        let mut world = world();
        let mut enemy = Enemy::spawn(EnemyId::new(0), 42.0, 42.0, 40.0);
        enemy.attack_power = 200;
        world.enemies.push(enemy);

        let first = tick(&mut world, FRAME);
        assert_eq!(
            first
                .iter()
                .filter(|event| matches!(event, Event::PlayerDefeated))
                .count(),
            1,
        );

        // Still overlapped and still dead; no second defeat fires.
        let second = tick(&mut world, FRAME);
        assert!(!second.contains(&Event::PlayerDefeated));
    }

    #[test]
    fn checkpoint_overlap_updates_the_stored_respawn_point() {
        let mut world = world();
        world
            .checkpoints
            .push(crate::grid::Checkpoint::at(20.0, 20.0, 40.0));
        world
            .checkpoints
            .push(crate::grid::Checkpoint::at(40.0, 40.0, 40.0));

        let events = tick(&mut world, FRAME);

        let activated: Vec<&Event> = events
            .iter()
            .filter(|event| matches!(event, Event::CheckpointActivated { .. }))
            .collect();
        assert_eq!(activated.len(), 2, "both overlapping markers switch on");
        let player = query::player_snapshot(&world);
        // Last checkpoint in creation order wins.
        assert_eq!((player.checkpoint_x, player.checkpoint_y), (40.0, 40.0));
        assert!(query::checkpoint_view(&world)
            .iter()
            .all(|checkpoint| checkpoint.active));

        let second = tick(&mut world, FRAME);
        assert!(!second
            .iter()
            .any(|event| matches!(event, Event::CheckpointActivated { .. })));
    }

    #[test]
    fn player_never_escapes_the_world_bounds() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetMoveIntent {
                intent: MoveIntent::new(AxisIntent::Negative, AxisIntent::Negative),
            },
            &mut events,
        );
        for _ in 0..50 {
            let _ = tick(&mut world, FRAME);
        }
        let player = query::player_snapshot(&world);
        assert_eq!((player.x, player.y), (0.0, 0.0));

        apply(
            &mut world,
            Command::SetMoveIntent {
                intent: MoveIntent::new(AxisIntent::Positive, AxisIntent::Positive),
            },
            &mut events,
        );
        for _ in 0..200 {
            let _ = tick(&mut world, FRAME);
        }
        let player = query::player_snapshot(&world);
        let grid = query::tile_grid(&world);
        assert_eq!(player.x, grid.width() - player.width);
        assert_eq!(player.y, grid.height() - player.height);
    }

    #[test]
    fn upgrade_flow_applies_stat_scaling() {
        let mut world = world();
        world.player.leaves = 100;
        let mut events = Vec::new();

        apply(&mut world, Command::RequestUpgrade, &mut events);
        assert_eq!(events, vec![Event::UpgradeOffered { cost: 100 }]);

        events.clear();
        apply(&mut world, Command::ConfirmUpgrade, &mut events);
        assert_eq!(
            events,
            vec![Event::UpgradeApplied {
                level: 2,
                cost: 100,
            }],
        );
        let player = query::player_snapshot(&world);
        assert_eq!(player.level, 2);
        assert_eq!(player.leaves, 0);
        assert_eq!(player.attack_power, 15);
        assert_eq!(player.max_health, 120);
        assert_eq!(player.health, 120);
    }

    #[test]
    fn unaffordable_upgrades_are_rejected_without_change() {
        let mut world = world();
        world.player.leaves = 99;
        let mut events = Vec::new();

        apply(&mut world, Command::RequestUpgrade, &mut events);
        assert_eq!(
            events,
            vec![Event::UpgradeRejected {
                required: 100,
                available: 99,
            }],
        );
        let player = query::player_snapshot(&world);
        assert_eq!(player.level, 1);
        assert_eq!(player.leaves, 99);
        assert_eq!(player.attack_power, 10);
        assert_eq!(player.max_health, 100);
    }

    #[test]
    fn stale_upgrade_confirmation_is_revalidated() {
        let mut world = world();
        world.player.leaves = 40;
        let mut events = Vec::new();

        apply(&mut world, Command::ConfirmUpgrade, &mut events);
        assert_eq!(
            events,
            vec![Event::UpgradeRejected {
                required: 100,
                available: 40,
            }],
        );
        assert_eq!(query::level(&world), 1);
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let commands = [
            Command::SpawnEnemy,
            Command::SpawnBoss,
            Command::Tick { dt: FRAME },
            Command::SpawnEnemy,
            Command::Tick { dt: FRAME },
        ];

        let run = |seed: u64| {
            let mut world = World::new(WorldConfig {
                rng_seed: seed,
                ..small_config()
            })
            .expect("config is valid");
            let mut events = Vec::new();
            for command in commands {
                apply(&mut world, command, &mut events);
            }
            (
                query::enemy_view(&world).into_vec(),
                query::boss_view(&world).into_vec(),
                events,
            )
        };

        assert_eq!(run(0xfeed), run(0xfeed));
    }

    #[test]
    fn attack_intent_arms_the_input_cooldown() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetAttackIntent {
                attack: Some(AttackKind::Heavy),
            },
            &mut events,
        );
        assert_eq!(query::player_snapshot(&world).attack_cooldown, 40);

        let _ = tick(&mut world, FRAME);
        assert_eq!(query::player_snapshot(&world).attack_cooldown, 39);

        apply(
            &mut world,
            Command::SetAttackIntent { attack: None },
            &mut events,
        );
        assert!(query::player_snapshot(&world).attacking.is_none());
    }
}
