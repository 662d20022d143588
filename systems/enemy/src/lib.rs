#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure enemy system: spawning, status effects, and path following.
//!
//! Functions here operate on a single [`Enemy`] record owned by the world.
//! None of them allocate identifiers or touch any other entity; the world is
//! responsible for rallying neighbours and removing enemies that deactivate.

use std::collections::BTreeSet;

use wave_defence_core::{
    constants::{
        RALLY_CRY_BOOST, RALLY_CRY_COOLDOWN, RALLY_CRY_DURATION, SHIELD_PULSE_COOLDOWN,
        WAYPOINT_REACH_RADIUS,
    },
    BossAbility, Enemy, EnemyId, EnemyKind, Path, WorldPoint,
};

/// Creates an enemy at `start` walking toward the second waypoint.
///
/// Health is scaled by `difficulty_multiplier` and speed by
/// `speed_multiplier`; shielded kinds start with a full shield.
#[must_use]
pub fn spawn(
    id: EnemyId,
    kind: EnemyKind,
    start: WorldPoint,
    difficulty_multiplier: f32,
    speed_multiplier: f32,
) -> Enemy {
    let stats = kind.stats();
    let health = stats.health * difficulty_multiplier;
    let speed = stats.speed * speed_multiplier;

    Enemy {
        id,
        kind,
        health,
        max_health: health,
        speed,
        base_speed: speed,
        position: start,
        path_index: 1,
        active: true,
        reached_end: false,
        slowed: false,
        slow_timer: 0.0,
        slow_multiplier: 1.0,
        shield: stats.shield,
        shield_max: stats.shield,
        shield_cooldown: 0.0,
        immune_to_slow: false,
        abilities: BTreeSet::new(),
        speed_boost: 0.0,
        speed_boost_timer: 0.0,
        rally_cooldown: 0.0,
    }
}

/// Installs boss abilities and primes their cooldowns.
pub fn grant_abilities(enemy: &mut Enemy, abilities: &[BossAbility]) {
    for ability in abilities {
        let _ = enemy.abilities.insert(*ability);
        match ability {
            BossAbility::ShieldPulse => enemy.shield_cooldown = SHIELD_PULSE_COOLDOWN,
            BossAbility::RallyCry => enemy.rally_cooldown = RALLY_CRY_COOLDOWN,
            BossAbility::Frostproof => enemy.immune_to_slow = true,
        }
    }
}

/// Advances timers and walks the enemy along the path.
///
/// An enemy that passes the final waypoint is marked as having reached the
/// end and deactivates. Inactive enemies are left untouched.
pub fn update(enemy: &mut Enemy, dt: f32, path: &Path) {
    if !enemy.active {
        return;
    }

    if enemy.has_ability(BossAbility::ShieldPulse) {
        enemy.shield_cooldown -= dt;
        if enemy.shield_cooldown <= 0.0 {
            enemy.shield = enemy.shield_max;
            enemy.shield_cooldown = SHIELD_PULSE_COOLDOWN;
        }
    }

    if enemy.speed_boost_timer > 0.0 {
        enemy.speed_boost_timer -= dt;
        if enemy.speed_boost_timer <= 0.0 {
            enemy.speed_boost_timer = 0.0;
            enemy.speed_boost = 0.0;
        }
    }

    if enemy.slowed {
        enemy.slow_timer -= dt;
        if enemy.slow_timer <= 0.0 {
            enemy.slow_timer = 0.0;
            enemy.slowed = false;
        }
    }

    let slow = if enemy.slowed {
        enemy.slow_multiplier
    } else {
        1.0
    };
    enemy.speed = enemy.base_speed * (1.0 + enemy.speed_boost) * slow;

    let Some(waypoint) = path.waypoint(enemy.path_index) else {
        leak(enemy);
        return;
    };

    enemy.position = enemy.position.step_toward(waypoint, enemy.speed * dt);
    if enemy.position.distance_to(waypoint) <= WAYPOINT_REACH_RADIUS {
        enemy.path_index += 1;
        if enemy.path_index >= path.len() {
            leak(enemy);
        }
    }
}

fn leak(enemy: &mut Enemy) {
    enemy.active = false;
    enemy.reached_end = true;
}

/// Applies damage, letting the shield absorb it unless `pierce_shield` is set.
///
/// Health reaching zero deactivates the enemy. Damage to an inactive enemy is
/// ignored.
pub fn take_damage(enemy: &mut Enemy, amount: f32, pierce_shield: bool) {
    if !enemy.active {
        return;
    }

    let mut remaining = amount.max(0.0);
    if !pierce_shield && enemy.shield > 0.0 {
        let absorbed = remaining.min(enemy.shield);
        enemy.shield = (enemy.shield - absorbed).max(0.0);
        remaining -= absorbed;
    }

    enemy.health = (enemy.health - remaining).max(0.0);
    if enemy.health <= 0.0 {
        enemy.active = false;
    }
}

/// Slows the enemy, keeping the strongest multiplier and the longest timer.
pub fn apply_slow(enemy: &mut Enemy, duration: f32, multiplier: f32) {
    if enemy.immune_to_slow || !enemy.active {
        return;
    }

    if enemy.slowed {
        enemy.slow_multiplier = enemy.slow_multiplier.min(multiplier);
        enemy.slow_timer = enemy.slow_timer.max(duration);
    } else {
        enemy.slowed = true;
        enemy.slow_multiplier = multiplier;
        enemy.slow_timer = duration;
    }
}

/// Grants the rally cry speed bonus, replacing any bonus already active.
pub fn apply_rally_cry(enemy: &mut Enemy) {
    enemy.speed_boost = RALLY_CRY_BOOST;
    enemy.speed_boost_timer = RALLY_CRY_DURATION;
}

/// Counts down the rally cry cooldown of a rallying boss.
///
/// Returns `true` when the boss rallies this tick.
pub fn tick_rally(enemy: &mut Enemy, dt: f32) -> bool {
    if !enemy.active || !enemy.has_ability(BossAbility::RallyCry) {
        return false;
    }

    enemy.rally_cooldown -= dt;
    if enemy.rally_cooldown > 0.0 {
        return false;
    }

    enemy.rally_cooldown = RALLY_CRY_COOLDOWN;
    true
}
