#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wave Defence simulation.
//!
//! This crate defines the data model that connects the authoritative world,
//! the pure per-entity systems, and any adapter driving them. Adapters submit
//! [`Command`] values, the world folds them into a fresh game state, and
//! broadcasts [`Event`] values that renderers use to drive visual effects.
//! Systems operate on the entity records defined here and never hold state of
//! their own.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod constants;
pub mod path;

pub use path::{is_path_cell, Path};

use constants::{CELL_SIZE, GRID_COLUMNS, GRID_ROWS};

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

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the projectile identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Continuous position expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Straight-line distance between two points.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Moves at most `max_distance` toward `target` without overshooting it.
    ///
    /// Coincident points and non-positive step lengths never divide by zero.
    #[must_use]
    pub fn step_toward(self, target: WorldPoint, max_distance: f32) -> WorldPoint {
        let distance = self.distance_to(target);
        let step = max_distance.max(0.0);
        if distance <= step || distance <= f32::EPSILON {
            return target;
        }

        let ratio = step / distance;
        WorldPoint::new(
            self.x + (target.x - self.x) * ratio,
            self.y + (target.y - self.y) * ratio,
        )
    }
}

/// Location of a single build grid cell.
///
/// Coordinates are signed so that placement requests from outside the grid can
/// be represented and rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    column: i32,
    row: i32,
}

impl GridCell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Reports whether the cell lies inside the build grid.
    #[must_use]
    pub const fn in_bounds(&self) -> bool {
        self.column >= 0 && self.column < GRID_COLUMNS && self.row >= 0 && self.row < GRID_ROWS
    }

    /// World position of the cell centre.
    #[must_use]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(
            (self.column as f32 + 0.5) * CELL_SIZE,
            (self.row as f32 + 0.5) * CELL_SIZE,
        )
    }
}

/// Species of enemies that can walk the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Balanced foot soldier.
    Grunt,
    /// Fragile but fast enemy.
    Runner,
    /// Slow enemy with a large health pool.
    Tank,
    /// Reinforced enemy that accompanies mid-game waves.
    MiniBoss,
    /// Shielded enemy that leads every boss wave alone.
    Boss,
}

/// Base attributes of an enemy kind before wave scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Health at difficulty multiplier 1.
    pub health: f32,
    /// Movement speed in world units per second at speed multiplier 1.
    pub speed: f32,
    /// Gold awarded for the kill.
    pub gold: u32,
    /// Score awarded for the kill.
    pub score: u64,
    /// Shield pool that absorbs damage before health.
    pub shield: f32,
}

impl EnemyKind {
    /// Base attributes of the kind.
    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Grunt => EnemyStats {
                health: 40.0,
                speed: 48.0,
                gold: 5,
                score: 10,
                shield: 0.0,
            },
            Self::Runner => EnemyStats {
                health: 24.0,
                speed: 80.0,
                gold: 4,
                score: 8,
                shield: 0.0,
            },
            Self::Tank => EnemyStats {
                health: 160.0,
                speed: 30.0,
                gold: 12,
                score: 25,
                shield: 0.0,
            },
            Self::MiniBoss => EnemyStats {
                health: 600.0,
                speed: 36.0,
                gold: 50,
                score: 150,
                shield: 0.0,
            },
            Self::Boss => EnemyStats {
                health: 2500.0,
                speed: 26.0,
                gold: 200,
                score: 1000,
                shield: 400.0,
            },
        }
    }

    /// Reports whether killing the kind counts toward defeated bosses.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Boss)
    }
}

/// Special abilities carried by bosses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossAbility {
    /// Periodically refills the shield to its maximum.
    ShieldPulse,
    /// Periodically boosts the speed of nearby enemies.
    RallyCry,
    /// Grants immunity to every slow effect.
    Frostproof,
}

/// Types of towers that can be placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Single-target tower with a quick fire rate.
    Arrow,
    /// Splash tower that damages every enemy around the impact.
    Cannon,
    /// Slowing tower whose shots can chain to nearby enemies.
    Frost,
    /// Long range tower whose shots pierce shields.
    Sniper,
    /// Aura tower that slows every enemy inside its range.
    Cryo,
    /// Aura tower that speeds up nearby towers and pays income.
    Beacon,
}

/// Base attributes of a tower kind before upgrades.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Gold required to place the tower.
    pub cost: u32,
    /// Targeting or aura radius in world units.
    pub range: f32,
    /// Damage carried by each projectile.
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Projectile travel speed in world units per second.
    pub projectile_speed: f32,
    /// Indicates whether projectiles damage every enemy around the impact.
    pub splash: bool,
    /// Splash radius, or chain radius for slowing projectiles.
    pub splash_radius: f32,
    /// Indicates whether projectiles apply a slow.
    pub slowing: bool,
    /// Speed multiplier applied by the slow; 1 means no slow.
    pub slow_multiplier: f32,
    /// Seconds the slow lasts, or lingers once an enemy leaves a cryo aura.
    pub slow_duration: f32,
    /// Indicates whether projectiles bypass shields.
    pub pierces_shield: bool,
    /// Fire-rate bonus granted to nearby towers.
    pub aura_bonus: f32,
    /// Gold paid after every cleared wave.
    pub income: u32,
}

const NO_EFFECT: TowerStats = TowerStats {
    cost: 0,
    range: 0.0,
    damage: 0.0,
    fire_rate: 0.0,
    projectile_speed: 0.0,
    splash: false,
    splash_radius: 0.0,
    slowing: false,
    slow_multiplier: 1.0,
    slow_duration: 0.0,
    pierces_shield: false,
    aura_bonus: 0.0,
    income: 0,
};

impl TowerKind {
    /// Every tower kind in presentation order.
    pub const ALL: [TowerKind; 6] = [
        Self::Arrow,
        Self::Cannon,
        Self::Frost,
        Self::Sniper,
        Self::Cryo,
        Self::Beacon,
    ];

    /// Base attributes of the kind.
    #[must_use]
    pub const fn stats(self) -> TowerStats {
        match self {
            Self::Arrow => TowerStats {
                cost: 50,
                range: 96.0,
                damage: 12.0,
                fire_rate: 1.5,
                projectile_speed: 320.0,
                ..NO_EFFECT
            },
            Self::Cannon => TowerStats {
                cost: 75,
                range: 88.0,
                damage: 30.0,
                fire_rate: 0.6,
                projectile_speed: 220.0,
                splash: true,
                splash_radius: 40.0,
                ..NO_EFFECT
            },
            Self::Frost => TowerStats {
                cost: 60,
                range: 80.0,
                damage: 6.0,
                fire_rate: 1.0,
                projectile_speed: 260.0,
                splash_radius: 64.0,
                slowing: true,
                slow_multiplier: 0.65,
                slow_duration: 1.5,
                ..NO_EFFECT
            },
            Self::Sniper => TowerStats {
                cost: 110,
                range: 192.0,
                damage: 70.0,
                fire_rate: 0.4,
                projectile_speed: 600.0,
                pierces_shield: true,
                ..NO_EFFECT
            },
            Self::Cryo => TowerStats {
                cost: 90,
                range: 72.0,
                slow_multiplier: 0.65,
                slow_duration: 0.5,
                ..NO_EFFECT
            },
            Self::Beacon => TowerStats {
                cost: 120,
                range: 96.0,
                aura_bonus: 0.15,
                income: 8,
                ..NO_EFFECT
            },
        }
    }

    /// Reports whether the kind works purely through an aura and never shoots.
    #[must_use]
    pub const fn is_aura(self) -> bool {
        matches!(self, Self::Cryo | Self::Beacon)
    }
}

/// Phases of the wave cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Between waves; the wave timer counts toward the next auto-start.
    Waiting,
    /// Short countdown before spawning starts.
    PreWave,
    /// Enemies of the current wave are still being released.
    Spawning,
    /// Every enemy of the wave has spawned and combat continues.
    Active,
    /// Lives ran out; the simulation no longer changes.
    GameOver,
}

/// One of the two specialization paths of a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradePath {
    /// First specialization path.
    A,
    /// Second specialization path.
    B,
}

impl UpgradePath {
    /// The opposite path.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Purchased tiers on both upgrade paths of a tower.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradeRecord {
    /// Tier reached on path A.
    pub path_a: u8,
    /// Tier reached on path B.
    pub path_b: u8,
}

impl UpgradeRecord {
    /// Creates a record with explicit tiers.
    #[must_use]
    pub const fn new(path_a: u8, path_b: u8) -> Self {
        Self { path_a, path_b }
    }

    /// Tier reached on the provided path.
    #[must_use]
    pub const fn tier(&self, path: UpgradePath) -> u8 {
        match path {
            UpgradePath::A => self.path_a,
            UpgradePath::B => self.path_b,
        }
    }

    /// Returns a copy of the record with the provided path set to `tier`.
    #[must_use]
    pub const fn with_tier(self, path: UpgradePath, tier: u8) -> Self {
        match path {
            UpgradePath::A => Self {
                path_a: tier,
                ..self
            },
            UpgradePath::B => Self {
                path_b: tier,
                ..self
            },
        }
    }
}

/// Authoritative state of a single enemy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Identifier assigned by the world.
    pub id: EnemyId,
    /// Species of the enemy.
    pub kind: EnemyKind,
    /// Remaining health, never below zero.
    pub health: f32,
    /// Health at spawn time.
    pub max_health: f32,
    /// Effective speed computed during the latest update.
    pub speed: f32,
    /// Scaled speed before status effects.
    pub base_speed: f32,
    /// Current position in world units.
    pub position: WorldPoint,
    /// Index of the waypoint the enemy is walking toward.
    pub path_index: usize,
    /// Indicates whether the enemy still takes part in the simulation.
    pub active: bool,
    /// Indicates whether the enemy walked off the end of the path.
    pub reached_end: bool,
    /// Indicates whether a slow currently applies.
    pub slowed: bool,
    /// Seconds left on the current slow.
    pub slow_timer: f32,
    /// Speed multiplier of the current slow.
    pub slow_multiplier: f32,
    /// Remaining shield, never below zero.
    pub shield: f32,
    /// Shield capacity.
    pub shield_max: f32,
    /// Seconds until the next shield pulse.
    pub shield_cooldown: f32,
    /// Indicates whether slows are ignored.
    pub immune_to_slow: bool,
    /// Boss abilities carried by the enemy.
    pub abilities: BTreeSet<BossAbility>,
    /// Additive speed bonus granted by a rally cry.
    pub speed_boost: f32,
    /// Seconds left on the speed bonus.
    pub speed_boost_timer: f32,
    /// Seconds until the next rally cry.
    pub rally_cooldown: f32,
}

impl Enemy {
    /// Reports whether the enemy carries the provided boss ability.
    #[must_use]
    pub fn has_ability(&self, ability: BossAbility) -> bool {
        self.abilities.contains(&ability)
    }
}

/// Authoritative state of a single placed tower.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    /// Identifier assigned by the world.
    pub id: TowerId,
    /// Type of tower.
    pub kind: TowerKind,
    /// Grid cell occupied by the tower.
    pub cell: GridCell,
    /// World position derived from the grid cell.
    pub position: WorldPoint,
    /// Simulation time of the latest shot, unset until the first shot.
    pub last_fire_time: Option<f32>,
    /// Enemy the tower keeps shooting while it stays valid.
    pub target: Option<EnemyId>,
    /// Purchased upgrade tiers.
    pub upgrades: UpgradeRecord,
    /// Fire-rate multiplier granted by beacon auras during the current tick.
    pub fire_rate_multiplier: f32,
}

/// Speed reduction carried by a projectile or aura.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlowEffect {
    /// Speed multiplier applied while slowed.
    pub multiplier: f32,
    /// Seconds the slow lasts.
    pub duration: f32,
}

/// Launch parameters produced by a tower that fired this tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Tower position at the time of firing.
    pub origin: WorldPoint,
    /// Enemy the projectile homes onto.
    pub target: EnemyId,
    /// Damage dealt on impact.
    pub damage: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Indicates whether the impact damages every enemy in the splash radius.
    pub splash: bool,
    /// Splash radius, or chain radius for slowing shots.
    pub splash_radius: f32,
    /// Slow applied on impact, if any.
    pub slow: Option<SlowEffect>,
    /// Number of additional enemies a slowing shot chains to.
    pub extra_slow_targets: u32,
    /// Indicates whether the damage bypasses shields.
    pub pierce_shield: bool,
}

/// Authoritative state of a projectile in flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Identifier assigned by the world.
    pub id: ProjectileId,
    /// Current position in world units.
    pub position: WorldPoint,
    /// Enemy the projectile homes onto.
    pub target: EnemyId,
    /// Damage dealt on impact.
    pub damage: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Indicates whether the impact damages every enemy in the splash radius.
    pub splash: bool,
    /// Splash radius, or chain radius for slowing projectiles.
    pub splash_radius: f32,
    /// Indicates whether the impact applies a slow.
    pub slowing: bool,
    /// Speed multiplier applied by the slow.
    pub slow_multiplier: f32,
    /// Seconds the slow lasts.
    pub slow_duration: f32,
    /// Number of additional enemies a slowing projectile chains to.
    pub extra_slow_targets: u32,
    /// Indicates whether the damage bypasses shields.
    pub pierce_shield: bool,
    /// Indicates whether the projectile is still in flight.
    pub active: bool,
}

/// Damage a projectile impact deals to one enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Enemy receiving the damage.
    pub enemy: EnemyId,
    /// Damage amount.
    pub amount: f32,
    /// Slow applied together with the damage.
    pub slow: Option<SlowEffect>,
    /// Indicates whether the damage bypasses shields.
    pub pierce_shield: bool,
}

/// Final results recorded when the game ends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Score accumulated over the game.
    pub score: u64,
    /// Wave in progress when the last life was lost.
    pub wave_reached: u32,
    /// Gold earned over the game, excluding starting gold and refunds.
    pub total_gold_earned: u32,
    /// Number of towers placed over the game.
    pub towers_placed: u32,
    /// Seconds of simulated time survived.
    pub time_survived: f32,
    /// Number of bosses killed.
    pub bosses_defeated: u32,
}

/// Commands that express all permissible state mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Advances the simulation by the provided number of seconds.
    Tick {
        /// Seconds of simulated time to advance.
        dt: f32,
    },
    /// Requests placement of a tower on the provided cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Cell that should hold the tower.
        cell: GridCell,
    },
    /// Requests the sale of a tower.
    SellTower {
        /// Index of the tower in the state's tower list.
        index: usize,
    },
    /// Requests the next tier of an upgrade path.
    UpgradeTower {
        /// Index of the tower in the state's tower list.
        index: usize,
        /// Path that should advance.
        path: UpgradePath,
    },
    /// Requests that the next wave start immediately.
    SendWave,
}

/// Events broadcast by the world while processing commands and ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Announces that a wave started spawning.
    WaveStarted {
        /// Number of the wave that started.
        wave: u32,
        /// Indicates whether the wave is a boss wave.
        boss: bool,
        /// Number of enemies queued for the wave.
        enemies: usize,
        /// Gold granted for sending the wave early.
        early_bonus: u32,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Species of the enemy.
        kind: EnemyKind,
    },
    /// Reports the damage an enemy received during the tick.
    Hit {
        /// Enemy that was hit.
        enemy: EnemyId,
        /// Total damage received during the tick.
        damage: f32,
        /// Position of the enemy when hit.
        position: WorldPoint,
    },
    /// Reports that an enemy was killed.
    Kill {
        /// Enemy that was killed.
        enemy: EnemyId,
        /// Species of the enemy.
        kind: EnemyKind,
        /// Position of the enemy at death.
        position: WorldPoint,
        /// Gold awarded for the kill.
        gold: u32,
        /// Score awarded for the kill.
        score: u64,
    },
    /// Reports that an enemy walked off the end of the path.
    Leak {
        /// Enemy that leaked.
        enemy: EnemyId,
        /// Species of the enemy.
        kind: EnemyKind,
        /// Lives left after the leak.
        lives_remaining: u32,
    },
    /// Reports that a wave was cleared.
    WaveComplete {
        /// Number of the cleared wave.
        wave: u32,
        /// Bonus paid because no enemy leaked, zero otherwise.
        zero_leak_bonus: u32,
        /// Income paid by beacon towers.
        beacon_income: u32,
        /// Flat passive income.
        passive_income: u32,
    },
    /// Reports that a kill streak reached a combo tier.
    ComboBonus {
        /// Kill count of the reached tier.
        kills: u32,
        /// Gold paid for the tier.
        bonus: u32,
    },
    /// Reports that the last life was lost.
    GameOver {
        /// Final results of the game.
        summary: GameSummary,
    },
    /// Confirms that a tower was placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: GridCell,
    },
    /// Confirms that a tower was sold.
    TowerSold {
        /// Identifier of the sold tower.
        tower: TowerId,
        /// Cell released by the sale.
        cell: GridCell,
        /// Gold refunded for the sale.
        refund: u32,
    },
    /// Confirms that a tower purchased an upgrade tier.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Path that advanced.
        path: UpgradePath,
        /// Tier reached on the path.
        tier: u8,
    },
}

/// Reasons a tower placement request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The game is over, so no further mutation is allowed.
    #[error("the game is over")]
    GameOver,
    /// The requested cell lies outside the build grid.
    #[error("cell lies outside the build grid")]
    OutOfBounds,
    /// The requested cell lies on the enemy path.
    #[error("cell lies on the enemy path")]
    OnPath,
    /// The requested cell already holds a tower.
    #[error("cell already holds a tower")]
    Occupied,
    /// The player cannot afford the tower.
    #[error("tower costs {cost} gold but only {available} is available")]
    InsufficientGold {
        /// Gold required.
        cost: u32,
        /// Gold currently held.
        available: u32,
    },
}

/// Reasons a tower sale may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SellError {
    /// The game is over, so no further mutation is allowed.
    #[error("the game is over")]
    GameOver,
    /// No tower exists at the provided index.
    #[error("no tower at index {index}")]
    UnknownTower {
        /// Index provided in the request.
        index: usize,
    },
}

/// Reasons an upgrade purchase may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum UpgradeError {
    /// The game is over, so no further mutation is allowed.
    #[error("the game is over")]
    GameOver,
    /// No tower exists at the provided index.
    #[error("no tower at index {index}")]
    UnknownTower {
        /// Index provided in the request.
        index: usize,
    },
    /// The path already reached its final tier.
    #[error("path {path:?} is already at its final tier")]
    PathMaxed {
        /// Path provided in the request.
        path: UpgradePath,
    },
    /// The final tier is locked because the other path already reached it.
    #[error("path {path:?} cannot reach its final tier while the other path holds it")]
    PathLocked {
        /// Path provided in the request.
        path: UpgradePath,
    },
    /// The player cannot afford the next tier.
    #[error("upgrade costs {cost} gold but only {available} is available")]
    InsufficientGold {
        /// Gold required.
        cost: u32,
        /// Gold currently held.
        available: u32,
    },
}

/// Rejection of any command accepted by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A placement request was rejected.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// A sale request was rejected.
    #[error(transparent)]
    Sell(#[from] SellError),
    /// An upgrade request was rejected.
    #[error(transparent)]
    Upgrade(#[from] UpgradeError),
}
