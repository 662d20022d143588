#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure tower system: sticky targeting, fire gating, and aura effects.
//!
//! Shooting towers turn a target and a ready cooldown into a [`Shot`]; the
//! world converts shots into projectiles. Aura towers never shoot and instead
//! buff neighbouring towers or slow enemies passing through their range.

use wave_defence_core::{
    Enemy, EnemyId, GridCell, Shot, SlowEffect, Tower, TowerId, TowerKind, UpgradeRecord,
    WorldPoint,
};
use wave_defence_system_upgrade as upgrade;

/// Creates a tower centred on the provided cell.
#[must_use]
pub fn place(id: TowerId, kind: TowerKind, cell: GridCell) -> Tower {
    Tower {
        id,
        kind,
        cell,
        position: cell.center(),
        last_fire_time: None,
        target: None,
        upgrades: UpgradeRecord::default(),
        fire_rate_multiplier: 1.0,
    }
}

/// Targeting radius after applying the provided multiplier.
#[must_use]
pub fn effective_range(tower: &Tower, range_multiplier: f32) -> f32 {
    tower.kind.stats().range * range_multiplier
}

fn in_range(tower: &Tower, enemy: &Enemy, range: f32) -> bool {
    enemy.active && tower.position.distance_to(enemy.position) <= range
}

/// Selects the enemy the tower should shoot at.
///
/// The current target is kept while it stays active and in range. Otherwise
/// the nearest active enemy in range is chosen, with earlier enemies winning
/// ties.
#[must_use]
pub fn acquire_target(tower: &Tower, enemies: &[Enemy], range_multiplier: f32) -> Option<EnemyId> {
    let range = effective_range(tower, range_multiplier);

    if let Some(current) = tower.target {
        let still_valid = enemies
            .iter()
            .any(|enemy| enemy.id == current && in_range(tower, enemy, range));
        if still_valid {
            return Some(current);
        }
    }

    let mut best: Option<(EnemyId, f32)> = None;
    for enemy in enemies.iter().filter(|enemy| in_range(tower, enemy, range)) {
        let distance = tower.position.distance_to(enemy.position);
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((enemy.id, distance)),
        }
    }
    best.map(|(id, _)| id)
}

/// Shots per second including upgrades and beacon auras.
#[must_use]
pub fn fire_rate(tower: &Tower) -> f32 {
    upgrade::effective_fire_rate(tower.kind, tower.upgrades) * tower.fire_rate_multiplier
}

/// Reports whether the tower's cooldown has elapsed at `now`.
#[must_use]
pub fn can_fire(tower: &Tower, now: f32) -> bool {
    let rate = fire_rate(tower);
    if rate <= 0.0 {
        return false;
    }

    match tower.last_fire_time {
        None => true,
        Some(last) => now - last >= 1.0 / rate,
    }
}

fn shot(tower: &Tower, target: EnemyId) -> Shot {
    let stats = tower.kind.stats();
    let slow = stats.slowing.then(|| SlowEffect {
        multiplier: upgrade::effective_slow_multiplier(tower.kind, tower.upgrades),
        duration: upgrade::effective_linger_duration(tower.kind, tower.upgrades),
    });

    Shot {
        origin: tower.position,
        target,
        damage: upgrade::effective_damage(tower.kind, tower.upgrades),
        speed: stats.projectile_speed,
        splash: stats.splash,
        splash_radius: upgrade::effective_splash_radius(tower.kind, tower.upgrades),
        slow,
        extra_slow_targets: upgrade::effective_extra_slow_targets(tower.kind, tower.upgrades),
        pierce_shield: stats.pierces_shield,
    }
}

/// Retargets the tower and fires when its cooldown allows.
///
/// Aura towers never produce a shot.
pub fn update(
    tower: &mut Tower,
    enemies: &[Enemy],
    current_time: f32,
    range_multiplier: f32,
) -> Option<Shot> {
    if tower.kind.is_aura() {
        return None;
    }

    tower.target = acquire_target(tower, enemies, range_multiplier);
    let target = tower.target?;

    if !can_fire(tower, current_time) {
        return None;
    }

    tower.last_fire_time = Some(current_time);
    Some(shot(tower, target))
}

/// Recomputes every tower's fire-rate multiplier from beacon auras.
///
/// A tower inside several beacon ranges takes the strongest bonus only.
/// Beacons never buff themselves or each other.
pub fn apply_beacon_auras(towers: &mut [Tower]) {
    let beacons: Vec<(WorldPoint, f32, f32)> = towers
        .iter()
        .filter(|tower| tower.kind == TowerKind::Beacon)
        .map(|tower| {
            (
                tower.position,
                effective_range(tower, 1.0),
                upgrade::effective_aura_bonus(tower.kind, tower.upgrades),
            )
        })
        .collect();

    for tower in towers.iter_mut() {
        if tower.kind == TowerKind::Beacon {
            tower.fire_rate_multiplier = 1.0;
            continue;
        }

        let strongest = beacons
            .iter()
            .filter(|(position, range, _)| position.distance_to(tower.position) <= *range)
            .map(|(_, _, bonus)| *bonus)
            .fold(0.0_f32, f32::max);
        tower.fire_rate_multiplier = 1.0 + strongest;
    }
}

/// Strongest cryo slow covering the provided position, if any.
#[must_use]
pub fn cryo_slow_at(position: WorldPoint, towers: &[Tower]) -> Option<SlowEffect> {
    towers
        .iter()
        .filter(|tower| tower.kind == TowerKind::Cryo)
        .filter(|tower| tower.position.distance_to(position) <= effective_range(tower, 1.0))
        .map(|tower| SlowEffect {
            multiplier: upgrade::effective_slow_multiplier(tower.kind, tower.upgrades),
            duration: upgrade::effective_linger_duration(tower.kind, tower.upgrades),
        })
        .reduce(|strongest, slow| SlowEffect {
            multiplier: strongest.multiplier.min(slow.multiplier),
            duration: strongest.duration.max(slow.duration),
        })
}
