//! Live entity records: the player, enemies, and bosses.

use wildgrove_core::{AttackKind, BossClass, BossId, BossPattern, BoundingBox, EnemyId, MoveIntent, Region};

pub(crate) const PLAYER_SPEED: f32 = 5.0;
pub(crate) const PLAYER_HEALTH: u32 = 100;
pub(crate) const PLAYER_ATTACK_POWER: u32 = 10;

pub(crate) const ENEMY_SPEED: f32 = 2.0;
pub(crate) const ENEMY_HEALTH: u32 = 100;
pub(crate) const ENEMY_ATTACK_POWER: u32 = 5;
/// Frames an enemy waits between landed contact attacks.
pub(crate) const ENEMY_ATTACK_COOLDOWN: u32 = 120;
const ENEMY_WEAPON_LENGTH: f32 = 40.0;
const ENEMY_WEAPON_THICKNESS: f32 = 10.0;

pub(crate) const BOSS_SPEED: f32 = 3.0;
pub(crate) const BOSS_HEALTH: u32 = 500;
/// Damage dealt when a melee pattern resolves. Shared by regular and legend
/// bosses.
pub(crate) const BOSS_ATTACK_POWER: u32 = 20;
/// Frames a boss waits after any pattern selection, melee or not.
pub(crate) const BOSS_ATTACK_COOLDOWN: u32 = 200;

pub(crate) const LEGEND_SPEED: f32 = 4.0;
pub(crate) const LEGEND_HEALTH: u32 = 2000;

/// The single player entity. Never destroyed; respawns in place on defeat.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) speed: f32,
    pub(crate) intent: MoveIntent,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) level: u32,
    pub(crate) attack_power: u32,
    pub(crate) leaves: u32,
    pub(crate) attacking: Option<AttackKind>,
    pub(crate) attack_cooldown: u32,
    pub(crate) facing: f32,
    /// Owned copy of the last touched checkpoint's position, not a live link.
    pub(crate) checkpoint_x: f32,
    pub(crate) checkpoint_y: f32,
}

impl Player {
    pub(crate) fn spawn(tile_size: f32) -> Self {
        Self {
            x: tile_size,
            y: tile_size,
            width: tile_size - 2.0,
            height: tile_size - 2.0,
            speed: PLAYER_SPEED,
            intent: MoveIntent::still(),
            health: PLAYER_HEALTH,
            max_health: PLAYER_HEALTH,
            level: 1,
            attack_power: PLAYER_ATTACK_POWER,
            leaves: 0,
            attacking: None,
            attack_cooldown: 0,
            facing: 0.0,
            checkpoint_x: tile_size,
            checkpoint_y: tile_size,
        }
    }

    pub(crate) fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}

/// Regular chasing enemy. Removed from the live collection on death.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) speed: f32,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) attack_power: u32,
    pub(crate) cooldown: u32,
    pub(crate) attacking: bool,
    pub(crate) facing: f32,
}

impl Enemy {
    pub(crate) fn spawn(id: EnemyId, x: f32, y: f32, tile_size: f32) -> Self {
        Self {
            id,
            x,
            y,
            width: tile_size - 2.0,
            height: tile_size - 2.0,
            speed: ENEMY_SPEED,
            health: ENEMY_HEALTH,
            max_health: ENEMY_HEALTH,
            attack_power: ENEMY_ATTACK_POWER,
            cooldown: 0,
            attacking: false,
            facing: 0.0,
        }
    }

    pub(crate) fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }

    /// Fixed axis-aligned weapon strip anchored at the enemy's origin.
    pub(crate) fn weapon_zone(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, ENEMY_WEAPON_LENGTH, ENEMY_WEAPON_THICKNESS)
    }
}

/// Boss entity covering both capped random bosses and regional legends.
/// Removed from the live collection after a display delay once defeated.
#[derive(Clone, Debug)]
pub(crate) struct Boss {
    pub(crate) id: BossId,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) speed: f32,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) attack_power: u32,
    pub(crate) cooldown: u32,
    /// Pattern chosen on the most recent attack roll; `None` until the boss
    /// has attacked at least once.
    pub(crate) pattern: Option<BossPattern>,
    pub(crate) name: String,
    pub(crate) class: BossClass,
}

impl Boss {
    pub(crate) fn spawn(id: BossId, x: f32, y: f32, tile_size: f32) -> Self {
        Self {
            id,
            x,
            y,
            width: tile_size * 2.0,
            height: tile_size * 2.0,
            speed: BOSS_SPEED,
            health: BOSS_HEALTH,
            max_health: BOSS_HEALTH,
            attack_power: BOSS_ATTACK_POWER,
            cooldown: 0,
            pattern: None,
            name: String::from("Boss"),
            class: BossClass::Normal,
        }
    }

    pub(crate) fn legend(id: BossId, x: f32, y: f32, tile_size: f32, region: Region) -> Self {
        Self {
            id,
            x,
            y,
            width: tile_size,
            height: tile_size,
            speed: LEGEND_SPEED,
            health: LEGEND_HEALTH,
            max_health: LEGEND_HEALTH,
            attack_power: BOSS_ATTACK_POWER,
            cooldown: 0,
            pattern: None,
            name: format!("Legendary {}", region.name()),
            class: BossClass::Legend,
        }
    }

    pub(crate) fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}
