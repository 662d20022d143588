#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure projectile system that homes projectiles onto their targets and
//! resolves impacts into damage events.
//!
//! The system never mutates enemies. Impacts are reported as
//! [`DamageEvent`] values which the world aggregates per enemy before
//! applying them.

use std::cmp::Ordering;

use wave_defence_core::{
    constants::PROJECTILE_HIT_RADIUS, DamageEvent, Enemy, Projectile, ProjectileId, Shot,
    SlowEffect,
};

/// Builds an active projectile at the shot's origin.
#[must_use]
pub fn launch(id: ProjectileId, shot: Shot) -> Projectile {
    Projectile {
        id,
        position: shot.origin,
        target: shot.target,
        damage: shot.damage,
        speed: shot.speed,
        splash: shot.splash,
        splash_radius: shot.splash_radius,
        slowing: shot.slow.is_some(),
        slow_multiplier: shot.slow.map_or(1.0, |slow| slow.multiplier),
        slow_duration: shot.slow.map_or(0.0, |slow| slow.duration),
        extra_slow_targets: shot.extra_slow_targets,
        pierce_shield: shot.pierce_shield,
        active: true,
    }
}

/// Moves the projectile toward its target and resolves the impact.
///
/// A projectile whose target vanished deactivates without dealing damage.
/// Inactive projectiles are left untouched.
pub fn update(projectile: &mut Projectile, dt: f32, enemies: &[Enemy]) -> Vec<DamageEvent> {
    if !projectile.active {
        return Vec::new();
    }

    let Some(target) = enemies
        .iter()
        .find(|enemy| enemy.id == projectile.target && enemy.active)
    else {
        projectile.active = false;
        return Vec::new();
    };

    if projectile.position.distance_to(target.position) <= PROJECTILE_HIT_RADIUS {
        projectile.active = false;
        return resolve_hit(projectile, target, enemies);
    }

    projectile.position = projectile
        .position
        .step_toward(target.position, projectile.speed * dt);
    Vec::new()
}

fn slow_effect(projectile: &Projectile) -> Option<SlowEffect> {
    projectile.slowing.then_some(SlowEffect {
        multiplier: projectile.slow_multiplier,
        duration: projectile.slow_duration,
    })
}

fn damage_event(projectile: &Projectile, enemy: &Enemy) -> DamageEvent {
    DamageEvent {
        enemy: enemy.id,
        amount: projectile.damage,
        slow: slow_effect(projectile),
        pierce_shield: projectile.pierce_shield,
    }
}

fn resolve_hit(projectile: &Projectile, primary: &Enemy, enemies: &[Enemy]) -> Vec<DamageEvent> {
    if projectile.splash {
        return enemies
            .iter()
            .filter(|enemy| enemy.active)
            .filter(|enemy| {
                projectile.position.distance_to(enemy.position) <= projectile.splash_radius
            })
            .map(|enemy| damage_event(projectile, enemy))
            .collect();
    }

    let mut events = vec![damage_event(projectile, primary)];
    if !projectile.slowing || projectile.extra_slow_targets == 0 {
        return events;
    }

    let mut chained: Vec<(&Enemy, f32)> = enemies
        .iter()
        .filter(|enemy| enemy.active && enemy.id != primary.id)
        .map(|enemy| (enemy, primary.position.distance_to(enemy.position)))
        .filter(|(_, distance)| *distance <= projectile.splash_radius)
        .collect();
    chained.sort_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    events.extend(
        chained
            .into_iter()
            .take(projectile.extra_slow_targets as usize)
            .map(|(enemy, _)| damage_event(projectile, enemy)),
    );
    events
}
