#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure upgrade tables: tier costs, path exclusivity, and effective tower stats.
//!
//! Every tower kind has two specialization paths with three tiers each. Only
//! one path per tower may ever reach the final tier. Effective stats are the
//! kind's base value plus the cumulative bonus of the tier reached on the path
//! that improves the stat; kinds without a table for a stat keep the base.

use wave_defence_core::{
    constants::{MAX_UPGRADE_TIER, SELL_REFUND_PERCENT},
    TowerKind, UpgradeError, UpgradePath, UpgradeRecord,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stat {
    Damage,
    FireRate,
    SplashRadius,
    SlowMultiplier,
    LingerDuration,
    Income,
    AuraBonus,
    ChainTargets,
}

/// Gold cost of tiers 1, 2 and 3 on the provided path.
#[must_use]
pub const fn tier_costs(kind: TowerKind, path: UpgradePath) -> [u32; 3] {
    match (kind, path) {
        (TowerKind::Arrow, UpgradePath::A) => [40, 80, 160],
        (TowerKind::Arrow, UpgradePath::B) => [45, 90, 180],
        (TowerKind::Cannon, UpgradePath::A) => [50, 100, 200],
        (TowerKind::Cannon, UpgradePath::B) => [55, 110, 220],
        (TowerKind::Frost, UpgradePath::A) => [45, 90, 180],
        (TowerKind::Frost, UpgradePath::B) => [50, 100, 200],
        (TowerKind::Sniper, UpgradePath::A) => [70, 140, 280],
        (TowerKind::Sniper, UpgradePath::B) => [60, 120, 240],
        (TowerKind::Cryo, UpgradePath::A) => [55, 110, 220],
        (TowerKind::Cryo, UpgradePath::B) => [40, 80, 160],
        (TowerKind::Beacon, UpgradePath::A) => [80, 160, 320],
        (TowerKind::Beacon, UpgradePath::B) => [60, 120, 240],
    }
}

fn bonus_table(kind: TowerKind, stat: Stat) -> Option<(UpgradePath, [f32; 3])> {
    let table = match (kind, stat) {
        (TowerKind::Arrow, Stat::Damage) => (UpgradePath::A, [6.0, 14.0, 30.0]),
        (TowerKind::Arrow, Stat::FireRate) => (UpgradePath::B, [0.3, 0.7, 1.5]),
        (TowerKind::Cannon, Stat::Damage) => (UpgradePath::A, [12.0, 28.0, 60.0]),
        (TowerKind::Cannon, Stat::SplashRadius) => (UpgradePath::B, [8.0, 18.0, 36.0]),
        (TowerKind::Frost, Stat::SlowMultiplier) => (UpgradePath::A, [-0.10, -0.15, -0.25]),
        (TowerKind::Frost, Stat::ChainTargets) => (UpgradePath::B, [1.0, 2.0, 3.0]),
        (TowerKind::Sniper, Stat::Damage) => (UpgradePath::A, [35.0, 80.0, 180.0]),
        (TowerKind::Sniper, Stat::FireRate) => (UpgradePath::B, [0.1, 0.25, 0.5]),
        (TowerKind::Cryo, Stat::SlowMultiplier) => (UpgradePath::A, [-0.10, -0.15, -0.25]),
        (TowerKind::Cryo, Stat::LingerDuration) => (UpgradePath::B, [0.5, 1.0, 2.0]),
        (TowerKind::Beacon, Stat::AuraBonus) => (UpgradePath::A, [0.05, 0.10, 0.20]),
        (TowerKind::Beacon, Stat::Income) => (UpgradePath::B, [6.0, 14.0, 30.0]),
        _ => return None,
    };
    Some(table)
}

fn bonus(kind: TowerKind, upgrades: UpgradeRecord, stat: Stat) -> f32 {
    let Some((path, table)) = bonus_table(kind, stat) else {
        return 0.0;
    };

    match upgrades.tier(path).min(MAX_UPGRADE_TIER) {
        0 => 0.0,
        tier => table[usize::from(tier) - 1],
    }
}

/// Checks whether the provided path may advance one tier.
///
/// Returns the tier that would be reached on success.
pub fn validate_upgrade(upgrades: UpgradeRecord, path: UpgradePath) -> Result<u8, UpgradeError> {
    let current = upgrades.tier(path);
    if current >= MAX_UPGRADE_TIER {
        return Err(UpgradeError::PathMaxed { path });
    }

    let next = current + 1;
    if next == MAX_UPGRADE_TIER && upgrades.tier(path.other()) >= MAX_UPGRADE_TIER {
        return Err(UpgradeError::PathLocked { path });
    }

    Ok(next)
}

/// Reports whether the provided path may advance one tier.
#[must_use]
pub fn can_upgrade(upgrades: UpgradeRecord, path: UpgradePath) -> bool {
    validate_upgrade(upgrades, path).is_ok()
}

/// Gold cost of the next tier on the path, or zero once the path is maxed.
#[must_use]
pub fn upgrade_cost(kind: TowerKind, upgrades: UpgradeRecord, path: UpgradePath) -> u32 {
    let tier = upgrades.tier(path);
    if tier >= MAX_UPGRADE_TIER {
        return 0;
    }
    tier_costs(kind, path)[usize::from(tier)]
}

/// Base cost plus the cost of every tier purchased on both paths.
#[must_use]
pub fn total_invested(kind: TowerKind, upgrades: UpgradeRecord) -> u32 {
    let purchased = |path: UpgradePath| -> u32 {
        let tiers = usize::from(upgrades.tier(path).min(MAX_UPGRADE_TIER));
        tier_costs(kind, path)[..tiers].iter().sum()
    };
    kind.stats().cost + purchased(UpgradePath::A) + purchased(UpgradePath::B)
}

/// Gold returned when the tower is sold.
#[must_use]
pub fn sell_refund(kind: TowerKind, upgrades: UpgradeRecord) -> u32 {
    total_invested(kind, upgrades) * SELL_REFUND_PERCENT / 100
}

/// Damage carried by each projectile.
#[must_use]
pub fn effective_damage(kind: TowerKind, upgrades: UpgradeRecord) -> f32 {
    kind.stats().damage + bonus(kind, upgrades, Stat::Damage)
}

/// Shots per second before aura multipliers.
#[must_use]
pub fn effective_fire_rate(kind: TowerKind, upgrades: UpgradeRecord) -> f32 {
    kind.stats().fire_rate + bonus(kind, upgrades, Stat::FireRate)
}

/// Splash radius, or chain radius for slowing projectiles.
#[must_use]
pub fn effective_splash_radius(kind: TowerKind, upgrades: UpgradeRecord) -> f32 {
    kind.stats().splash_radius + bonus(kind, upgrades, Stat::SplashRadius)
}

/// Speed multiplier applied by the tower's slow.
#[must_use]
pub fn effective_slow_multiplier(kind: TowerKind, upgrades: UpgradeRecord) -> f32 {
    kind.stats().slow_multiplier + bonus(kind, upgrades, Stat::SlowMultiplier)
}

/// Seconds a cryo slow lingers after an enemy leaves the aura.
#[must_use]
pub fn effective_linger_duration(kind: TowerKind, upgrades: UpgradeRecord) -> f32 {
    kind.stats().slow_duration + bonus(kind, upgrades, Stat::LingerDuration)
}

/// Gold paid after every cleared wave.
#[must_use]
pub fn effective_income(kind: TowerKind, upgrades: UpgradeRecord) -> u32 {
    kind.stats().income + bonus(kind, upgrades, Stat::Income) as u32
}

/// Fire-rate bonus granted to towers inside the aura.
#[must_use]
pub fn effective_aura_bonus(kind: TowerKind, upgrades: UpgradeRecord) -> f32 {
    kind.stats().aura_bonus + bonus(kind, upgrades, Stat::AuraBonus)
}

/// Number of additional enemies a slowing projectile chains to.
#[must_use]
pub fn effective_extra_slow_targets(kind: TowerKind, upgrades: UpgradeRecord) -> u32 {
    bonus(kind, upgrades, Stat::ChainTargets) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path_a: u8, path_b: u8) -> UpgradeRecord {
        UpgradeRecord::new(path_a, path_b)
    }

    #[test]
    fn only_one_path_may_reach_the_final_tier() {
        assert!(can_upgrade(record(2, 2), UpgradePath::A));
        assert!(can_upgrade(record(2, 2), UpgradePath::B));

        assert_eq!(
            validate_upgrade(record(3, 2), UpgradePath::B),
            Err(UpgradeError::PathLocked {
                path: UpgradePath::B
            })
        );
        assert_eq!(validate_upgrade(record(3, 1), UpgradePath::B), Ok(2));
    }

    #[test]
    fn maxed_path_cannot_advance() {
        assert_eq!(
            validate_upgrade(record(3, 0), UpgradePath::A),
            Err(UpgradeError::PathMaxed {
                path: UpgradePath::A
            })
        );
        assert_eq!(upgrade_cost(TowerKind::Arrow, record(3, 0), UpgradePath::A), 0);
    }

    #[test]
    fn exhaustive_records_never_hold_two_final_tiers() {
        for a in 0..=MAX_UPGRADE_TIER {
            for b in 0..=MAX_UPGRADE_TIER {
                if a == MAX_UPGRADE_TIER && b == MAX_UPGRADE_TIER {
                    continue;
                }
                for path in [UpgradePath::A, UpgradePath::B] {
                    if let Ok(next) = validate_upgrade(record(a, b), path) {
                        let upgraded = record(a, b).with_tier(path, next);
                        assert!(
                            !(upgraded.path_a == MAX_UPGRADE_TIER
                                && upgraded.path_b == MAX_UPGRADE_TIER),
                            "{a}/{b} via {path:?} reached both final tiers"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn upgrade_cost_looks_up_the_next_tier() {
        assert_eq!(upgrade_cost(TowerKind::Cannon, record(0, 0), UpgradePath::A), 50);
        assert_eq!(upgrade_cost(TowerKind::Cannon, record(1, 0), UpgradePath::A), 100);
        assert_eq!(upgrade_cost(TowerKind::Cannon, record(1, 2), UpgradePath::B), 220);
    }

    #[test]
    fn sell_refund_floors_seventy_percent_of_investment() {
        assert_eq!(total_invested(TowerKind::Cannon, record(1, 0)), 125);
        assert_eq!(sell_refund(TowerKind::Cannon, record(1, 0)), 87);
        assert_eq!(sell_refund(TowerKind::Arrow, record(0, 0)), 35);
        assert_eq!(total_invested(TowerKind::Sniper, record(2, 1)), 110 + 70 + 140 + 60);
    }

    #[test]
    fn damage_bonus_applies_only_on_its_path() {
        assert_eq!(effective_damage(TowerKind::Arrow, record(0, 3)), 12.0);
        assert_eq!(effective_damage(TowerKind::Arrow, record(2, 0)), 26.0);
        assert_eq!(effective_damage(TowerKind::Sniper, record(3, 0)), 250.0);
    }

    #[test]
    fn kinds_without_a_table_keep_their_base() {
        assert_eq!(effective_damage(TowerKind::Frost, record(3, 2)), 6.0);
        assert_eq!(effective_splash_radius(TowerKind::Arrow, record(3, 2)), 0.0);
        assert_eq!(effective_income(TowerKind::Cannon, record(2, 3)), 0);
        assert_eq!(effective_extra_slow_targets(TowerKind::Arrow, record(0, 3)), 0);
    }

    #[test]
    fn frost_paths_strengthen_slow_or_add_chain_targets() {
        assert!((effective_slow_multiplier(TowerKind::Frost, record(3, 0)) - 0.40).abs() < 1e-6);
        assert_eq!(effective_extra_slow_targets(TowerKind::Frost, record(0, 1)), 1);
        assert_eq!(effective_extra_slow_targets(TowerKind::Frost, record(0, 3)), 3);
    }

    #[test]
    fn beacon_paths_raise_aura_or_income() {
        assert!((effective_aura_bonus(TowerKind::Beacon, record(2, 0)) - 0.25).abs() < 1e-6);
        assert_eq!(effective_income(TowerKind::Beacon, record(0, 2)), 22);
    }

    #[test]
    fn cryo_linger_grows_on_path_b() {
        assert!((effective_linger_duration(TowerKind::Cryo, record(0, 3)) - 2.5).abs() < 1e-6);
        assert!((effective_fire_rate(TowerKind::Cryo, record(3, 0))).abs() < f32::EPSILON);
    }
}
