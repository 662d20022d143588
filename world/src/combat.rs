//! Tower fire, projectile impacts, enemy movement, and casualty bookkeeping.

use wave_defence_core::{
    constants::RALLY_CRY_RADIUS, Event, ProjectileId, Shot, WorldPoint,
};
use wave_defence_system_enemy as enemy;
use wave_defence_system_projectile as projectile;
use wave_defence_system_tower as tower;

use crate::{damage::DamageLedger, GameState};

const DEFAULT_RANGE_MULTIPLIER: f32 = 1.0;

/// Refreshes beacon auras, then lets every tower retarget and fire.
pub(crate) fn fire_towers(state: &mut GameState) {
    tower::apply_beacon_auras(&mut state.towers);

    let now = state.elapsed;
    let shots: Vec<Shot> = state
        .towers
        .iter_mut()
        .filter_map(|placed| {
            tower::update(placed, &state.enemies, now, DEFAULT_RANGE_MULTIPLIER)
        })
        .collect();

    for shot in shots {
        let id = ProjectileId::new(state.allocate_id());
        state.projectiles.push(projectile::launch(id, shot));
    }
}

/// Slows every enemy standing inside a cryo aura.
pub(crate) fn apply_cryo_auras(state: &mut GameState) {
    for target in state.enemies.iter_mut().filter(|target| target.active) {
        if let Some(slow) = tower::cryo_slow_at(target.position, &state.towers) {
            enemy::apply_slow(target, slow.duration, slow.multiplier);
        }
    }
}

/// Drops spent projectiles, moves the rest, and batches their impacts.
pub(crate) fn advance_projectiles(state: &mut GameState, dt: f32) -> DamageLedger {
    state.projectiles.retain(|flying| flying.active);

    let mut ledger = DamageLedger::default();
    for flying in state.projectiles.iter_mut() {
        for impact in projectile::update(flying, dt, &state.enemies) {
            ledger.record(impact);
        }
    }
    ledger
}

/// Applies batched damage and slows in enemy order.
pub(crate) fn apply_damage(state: &mut GameState, ledger: &DamageLedger) {
    if ledger.is_empty() {
        return;
    }

    for target in state.enemies.iter_mut() {
        let Some(pending) = ledger.get(target.id) else {
            continue;
        };

        enemy::take_damage(target, pending.amount, pending.pierce_shield);
        if let Some(slow) = pending.slow {
            enemy::apply_slow(target, slow.duration, slow.multiplier);
        }
        state.events.push(Event::Hit {
            enemy: target.id,
            damage: pending.amount,
            position: target.position,
        });
    }
}

/// Runs boss rally cries, then walks every enemy along the path.
pub(crate) fn move_enemies(state: &mut GameState, dt: f32) {
    let rallies: Vec<WorldPoint> = state
        .enemies
        .iter_mut()
        .filter_map(|walker| enemy::tick_rally(walker, dt).then_some(walker.position))
        .collect();

    if !rallies.is_empty() {
        for walker in state.enemies.iter_mut().filter(|walker| walker.active) {
            let rallied = rallies
                .iter()
                .any(|origin| origin.distance_to(walker.position) <= RALLY_CRY_RADIUS);
            if rallied {
                enemy::apply_rally_cry(walker);
            }
        }
    }

    for walker in state.enemies.iter_mut() {
        enemy::update(walker, dt, &state.path);
    }
}

/// Removes leaked and killed enemies, charging lives and paying bounties.
pub(crate) fn resolve_casualties(state: &mut GameState) {
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());

    for departed in enemies {
        if departed.reached_end {
            state.lives = state.lives.saturating_sub(1);
            state.leaks_this_wave += 1;
            state.events.push(Event::Leak {
                enemy: departed.id,
                kind: departed.kind,
                lives_remaining: state.lives,
            });
            tracing::debug!(enemy = departed.id.get(), lives = state.lives, "enemy leaked");
        } else if !departed.active {
            let stats = departed.kind.stats();
            state.earn(stats.gold);
            state.score += stats.score;
            if departed.kind.is_boss() {
                state.bosses_defeated += 1;
            }
            state.recent_kills.push_back(state.elapsed);
            state.events.push(Event::Kill {
                enemy: departed.id,
                kind: departed.kind,
                position: departed.position,
                gold: stats.gold,
                score: stats.score,
            });
        } else {
            survivors.push(departed);
        }
    }

    state.enemies = survivors;
}
