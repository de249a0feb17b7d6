#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wildgrove engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Wildgrove.";

/// Leaves awarded to the player for defeating a regular enemy.
pub const ENEMY_REWARD: u32 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one discrete frame.
    Tick {
        /// Real time that elapsed since the previous frame. Only the two
        /// deferred callbacks (respawn and boss removal) consume real time;
        /// all other rates are defined per frame.
        dt: Duration,
    },
    /// Replaces the player's movement intent for subsequent frames.
    SetMoveIntent {
        /// Per-axis direction the player wants to travel.
        intent: MoveIntent,
    },
    /// Arms or clears the player's melee attack intent.
    SetAttackIntent {
        /// Attack the player is holding, or `None` when released.
        attack: Option<AttackKind>,
    },
    /// Updates the direction the player faces, in radians.
    SetFacingAngle {
        /// Angle measured counter-clockwise from the positive x axis.
        radians: f32,
    },
    /// Requests creation of one enemy at a random grid cell, subject to the
    /// live-enemy cap.
    SpawnEnemy,
    /// Requests creation of one boss at a random grid cell, subject to the
    /// live-boss cap and a spacing buffer against existing bosses.
    SpawnBoss,
    /// Requests creation of one named legend boss per region. Intended to run
    /// once at startup; legend bosses ignore the boss cap.
    SpawnLegendBosses,
    /// Asks the world whether the player can afford the next level.
    RequestUpgrade,
    /// Confirms a previously offered upgrade, applying its stat changes.
    ConfirmUpgrade,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one frame.
    TimeAdvanced {
        /// Real time that elapsed in the frame.
        dt: Duration,
    },
    /// Confirms that an enemy entered the live collection.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
    },
    /// Confirms that a boss entered the live collection.
    BossSpawned {
        /// Identifier assigned to the new boss.
        boss: BossId,
        /// Whether the boss is a capped regular boss or a regional legend.
        class: BossClass,
    },
    /// Reports that the player touched a checkpoint, making it the active
    /// respawn point.
    CheckpointActivated {
        /// Identifier of the checkpoint that switched on.
        checkpoint: CheckpointId,
    },
    /// Announces that the player landed the first hit on any boss, waking
    /// boss movement and attacks permanently.
    BossEngaged {
        /// Boss that absorbed the first hit.
        boss: BossId,
    },
    /// Reports that an enemy died and left the live collection.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EnemyId,
        /// Leaves credited to the player.
        reward: u32,
    },
    /// Victory signal: a boss's health reached zero. Removal from the live
    /// collection follows after a fixed display delay.
    BossDefeated {
        /// Identifier of the defeated boss.
        boss: BossId,
        /// Whether the boss was a regional legend.
        class: BossClass,
        /// Leaves credited to the player.
        reward: u32,
    },
    /// Confirms that a defeated boss left the live collection.
    BossRemoved {
        /// Identifier of the removed boss.
        boss: BossId,
    },
    /// Defeat signal: the player's health reached zero and their leaves were
    /// forfeited. Respawn follows after a fixed delay.
    PlayerDefeated,
    /// Reports that the player respawned at their stored checkpoint with
    /// health restored.
    PlayerRespawned,
    /// Offers an affordable upgrade to the input boundary for confirmation.
    UpgradeOffered {
        /// Leaves the upgrade will cost.
        cost: u32,
    },
    /// Confirms that an upgrade was purchased and applied.
    UpgradeApplied {
        /// Player level after the upgrade.
        level: u32,
        /// Leaves deducted from the player.
        cost: u32,
    },
    /// Reports that an upgrade request could not be afforded.
    UpgradeRejected {
        /// Leaves the next level requires.
        required: u32,
        /// Leaves the player currently holds.
        available: u32,
    },
}

/// Axis-aligned bounding box measured in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl BoundingBox {
    /// Creates a new bounding box anchored at its upper-left corner.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal position of the upper-left corner.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position of the upper-left corner.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Width of the box in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the box in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether this box overlaps `other` after expanding `other` by
    /// `buffer` world units on every side.
    ///
    /// The test is symmetric when `buffer` is zero. Zero-area boxes and
    /// negative buffers are handled without error; callers in this engine
    /// only ever pass non-negative buffers.
    #[must_use]
    pub fn intersects(&self, other: &BoundingBox, buffer: f32) -> bool {
        self.x < other.x + other.width + buffer
            && self.x + self.width > other.x - buffer
            && self.y < other.y + other.height + buffer
            && self.y + self.height > other.y - buffer
    }
}

/// Desired travel along a single axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisIntent {
    /// Travel toward decreasing coordinates.
    Negative,
    /// No travel along the axis.
    #[default]
    Still,
    /// Travel toward increasing coordinates.
    Positive,
}

impl AxisIntent {
    /// Signed unit magnitude of the intent, suitable for scaling by a speed.
    #[must_use]
    pub const fn unit(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Still => 0.0,
            Self::Positive => 1.0,
        }
    }
}

/// Per-axis movement intent written by the input adapter and read by the
/// simulation at the start of each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MoveIntent {
    horizontal: AxisIntent,
    vertical: AxisIntent,
}

impl MoveIntent {
    /// Creates a new movement intent from per-axis directions.
    #[must_use]
    pub const fn new(horizontal: AxisIntent, vertical: AxisIntent) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Intent that leaves the player stationary.
    #[must_use]
    pub const fn still() -> Self {
        Self::new(AxisIntent::Still, AxisIntent::Still)
    }

    /// Desired travel along the horizontal axis.
    #[must_use]
    pub const fn horizontal(&self) -> AxisIntent {
        self.horizontal
    }

    /// Desired travel along the vertical axis.
    #[must_use]
    pub const fn vertical(&self) -> AxisIntent {
        self.vertical
    }
}

/// Melee attacks available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Quick forward strike anchored ahead of the player.
    Light,
    /// Slower sweep centred across the player.
    Heavy,
}

const STRIKE_LENGTH: f32 = 60.0;
const STRIKE_THICKNESS: f32 = 10.0;

impl AttackKind {
    /// Frames the input boundary should wait before re-arming this attack.
    ///
    /// The cooldown gates input pacing only; the melee hitbox sweep is gated
    /// exclusively by the attack intent being held.
    #[must_use]
    pub const fn cooldown_frames(self) -> u32 {
        match self {
            Self::Light => 20,
            Self::Heavy => 40,
        }
    }

    /// Computes the axis-aligned strike zone for an attacker occupying
    /// `origin`.
    ///
    /// The facing angle rotates only the drawn weapon; collision always uses
    /// these fixed axis-aligned strips.
    #[must_use]
    pub fn strike_zone(self, origin: &BoundingBox) -> BoundingBox {
        match self {
            Self::Light => BoundingBox::new(
                origin.x() + origin.width() / 2.0,
                origin.y() - STRIKE_THICKNESS,
                STRIKE_LENGTH,
                STRIKE_THICKNESS,
            ),
            Self::Heavy => BoundingBox::new(
                origin.x() - STRIKE_LENGTH / 2.0,
                origin.y() - STRIKE_THICKNESS / 2.0,
                STRIKE_LENGTH,
                STRIKE_THICKNESS,
            ),
        }
    }
}

/// Attack behaviours a boss may select for one cooldown cycle.
///
/// Only the melee patterns currently resolve damage; the remaining variants
/// are recognised no-op branches reserved for future projectile work. They
/// still consume the boss's cooldown when selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossPattern {
    /// Close-range slash resolved as a melee attack.
    Slash,
    /// Forward thrust resolved as a melee attack.
    Thrust,
    /// Reserved projectile throw; currently no effect.
    Throw,
    /// Reserved ranged volley; currently no effect.
    Ranged,
    /// Reserved homing projectile; currently no effect.
    Homing,
    /// Reserved radial ranged burst; currently no effect.
    CircleRanged,
    /// Spinning slash resolved as a melee attack.
    CircleSlash,
}

impl BossPattern {
    /// Every pattern a boss may roll, in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Slash,
        Self::Thrust,
        Self::Throw,
        Self::Ranged,
        Self::Homing,
        Self::CircleRanged,
        Self::CircleSlash,
    ];

    /// Reports whether the pattern resolves an immediate melee attack.
    #[must_use]
    pub const fn is_melee(self) -> bool {
        matches!(self, Self::Slash | Self::Thrust | Self::CircleSlash)
    }
}

/// Distinguishes capped regular bosses from uncapped regional legends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossClass {
    /// Randomly spawned boss counted against the live-boss cap.
    Normal,
    /// Regional legend seeded once at startup, exempt from the cap.
    Legend,
}

impl BossClass {
    /// Leaves awarded to the player when a boss of this class falls.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Normal => 100,
            Self::Legend => 1000,
        }
    }
}

/// Display categories assigned to walkable tiles, banded by row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Lowland plains at the top of the map.
    Plain,
    /// Grassland band.
    Grassland,
    /// Highland band.
    Highland,
    /// Mountain band.
    Mountain,
    /// Coastal band.
    Coast,
    /// Snowfield band.
    Snow,
    /// Volcanic band at the bottom of the map.
    Volcano,
}

impl Region {
    /// Every region in top-to-bottom band order.
    pub const ALL: [Self; 7] = [
        Self::Plain,
        Self::Grassland,
        Self::Highland,
        Self::Mountain,
        Self::Coast,
        Self::Snow,
        Self::Volcano,
    ];

    /// Maps a row index onto its region band.
    ///
    /// Rows divide proportionally into `Region::ALL.len()` contiguous bands;
    /// the final band absorbs any remainder.
    #[must_use]
    pub fn for_row(row: u32, rows: u32) -> Self {
        if rows == 0 {
            return Self::Plain;
        }
        let bands = Self::ALL.len() as u64;
        let index = (u64::from(row) * bands / u64::from(rows)).min(bands - 1);
        Self::ALL[index as usize]
    }

    /// Lowercase name used for display and legend boss titles.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Grassland => "grassland",
            Self::Highland => "highland",
            Self::Mountain => "mountain",
            Self::Coast => "coast",
            Self::Snow => "snow",
            Self::Volcano => "volcano",
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BossId(u32);

impl BossId {
    /// Creates a new boss identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a checkpoint, assigned in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CheckpointId(u32);

impl CheckpointId {
    /// Creates a new checkpoint identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Construction-time configuration violations rejected by the engine.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Tile size must be positive and finite.
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
    /// The tile grid must contain at least one cell.
    #[error("grid dimensions must be non-zero, got {columns}x{rows}")]
    EmptyGrid {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// A probability parameter fell outside the unit interval.
    #[error("probability `{name}` must lie within [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
}
