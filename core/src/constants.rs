//! Static tuning numbers shared by every system.
//!
//! Distances are expressed in world units, where a single grid cell spans
//! [`CELL_SIZE`] units. Durations and timers are expressed in seconds.

/// Side length of a grid cell measured in world units.
pub const CELL_SIZE: f32 = 32.0;

/// Number of buildable grid columns.
pub const GRID_COLUMNS: i32 = 16;

/// Number of buildable grid rows.
pub const GRID_ROWS: i32 = 12;

/// Gold available when a new game starts.
pub const STARTING_GOLD: u32 = 150;

/// Lives available when a new game starts.
pub const STARTING_LIVES: u32 = 20;

/// Wave shuffle seed used when a game starts without an explicit one.
pub const DEFAULT_WAVE_SEED: u64 = 0x5eed_0f7a_c0de;

/// Seconds between two consecutive spawns of the same wave.
pub const SPAWN_INTERVAL: f32 = 0.8;

/// Seconds spent waiting before the next wave starts on its own.
pub const WAVE_AUTO_START_SECONDS: f32 = 20.0;

/// Seconds after entering the waiting phase during which an early send pays a bonus.
pub const EARLY_SEND_WINDOW: f32 = 15.0;

/// Gold granted for sending a wave inside the early window.
pub const EARLY_SEND_BONUS: u32 = 20;

/// Countdown used by the pre-wave phase before spawning begins.
pub const PRE_WAVE_DELAY: f32 = 3.0;

/// Distance at which an enemy counts as having reached its current waypoint.
pub const WAYPOINT_REACH_RADIUS: f32 = 2.0;

/// Distance at which a projectile resolves its hit.
pub const PROJECTILE_HIT_RADIUS: f32 = 8.0;

/// Seconds between two shield refills of a shield-pulse boss.
pub const SHIELD_PULSE_COOLDOWN: f32 = 8.0;

/// Additive speed bonus granted by a rally cry.
pub const RALLY_CRY_BOOST: f32 = 0.5;

/// Seconds a rally cry speed bonus lasts.
pub const RALLY_CRY_DURATION: f32 = 3.0;

/// Seconds between two rally cries of the same boss.
pub const RALLY_CRY_COOLDOWN: f32 = 10.0;

/// Radius around a rallying boss inside which enemies receive the boost.
pub const RALLY_CRY_RADIUS: f32 = 128.0;

/// Percentage of the total investment refunded when a tower is sold.
pub const SELL_REFUND_PERCENT: u32 = 70;

/// Linear enemy speed increase applied per wave.
pub const SPEED_SCALE_PER_WAVE: f32 = 0.02;

/// Exponential base of the per-wave enemy health scaling.
pub const HEALTH_SCALE_PER_WAVE: f32 = 1.08;

/// Exponential base of the additional per-boss health scaling.
pub const HEALTH_SCALE_PER_BOSS: f32 = 1.15;

/// Every wave divisible by this number is a boss wave.
pub const BOSS_WAVE_INTERVAL: u32 = 10;

/// Mid-tier waves divisible by this number carry a mini-boss.
pub const MINI_BOSS_WAVE_INTERVAL: u32 = 5;

/// Flat part of the zero-leak wave bonus.
pub const WAVE_BONUS_BASE: u32 = 15;

/// Per-wave part of the zero-leak wave bonus.
pub const WAVE_BONUS_PER_WAVE: u32 = 3;

/// Passive income paid after every cleared wave.
pub const PASSIVE_INCOME_BASE: u32 = 10;

/// Passive income increase applied every [`PASSIVE_INCOME_WAVE_STEP`] waves.
pub const PASSIVE_INCOME_STEP: u32 = 5;

/// Number of waves between two passive income increases.
pub const PASSIVE_INCOME_WAVE_STEP: u32 = 5;

/// Highest tier either upgrade path may reach.
pub const MAX_UPGRADE_TIER: u8 = 3;

/// Seconds a kill timestamp stays in the combo window.
pub const KILL_WINDOW_RETENTION: f32 = 5.0;

/// Kill-streak tier that pays a bonus once reached inside its window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComboTier {
    /// Number of kills required inside the window.
    pub kills: u32,
    /// Length of the window in seconds.
    pub window: f32,
    /// Gold paid when the tier is reached.
    pub bonus: u32,
}

/// Combo tiers ordered from the highest to the lowest.
pub const COMBO_TIERS: [ComboTier; 3] = [
    ComboTier {
        kills: 10,
        window: 5.0,
        bonus: 60,
    },
    ComboTier {
        kills: 5,
        window: 3.0,
        bonus: 25,
    },
    ComboTier {
        kills: 3,
        window: 2.0,
        bonus: 10,
    },
];
