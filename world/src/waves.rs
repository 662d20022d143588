//! Wave cycle: timers, spawning, and wave completion payouts.

use wave_defence_core::{
    constants::{SPAWN_INTERVAL, WAVE_AUTO_START_SECONDS},
    EnemyId, EnemyKind, Event, Phase,
};
use wave_defence_system_enemy as enemy;
use wave_defence_system_upgrade as upgrade;
use wave_defence_system_wave_spawner as spawner;

use crate::GameState;

/// Advances the phase timers and releases due enemies.
pub(crate) fn advance(state: &mut GameState, dt: f32) {
    match state.phase {
        Phase::Waiting => {
            state.wave_timer += dt;
            if state.wave_timer >= state.wave_timer_max {
                start_next_wave(state, 0);
            }
        }
        Phase::PreWave => {
            state.wave_delay_timer -= dt;
            if state.wave_delay_timer <= 0.0 {
                state.wave_delay_timer = 0.0;
                start_next_wave(state, 0);
            }
        }
        Phase::Spawning => {
            state.spawn_timer -= dt;
            if state.spawn_timer <= 0.0 {
                if let Some(kind) = state.spawn_queue.pop_front() {
                    spawn(state, kind);
                }
                state.spawn_timer = SPAWN_INTERVAL;
            }
            if state.spawn_queue.is_empty() {
                state.phase = Phase::Active;
            }
        }
        Phase::Active | Phase::GameOver => {}
    }
}

/// Queues the next wave and enters the spawning phase.
pub(crate) fn start_next_wave(state: &mut GameState, early_bonus: u32) {
    state.wave += 1;
    let wave = state.wave;

    state.boss_wave = spawner::is_boss_wave(wave);
    state.spawn_queue = spawner::generate_wave(wave, state.rng_seed).into();
    state.spawn_timer = 0.0;
    state.wave_timer = 0.0;
    state.leaks_this_wave = 0;
    state.phase = Phase::Spawning;

    if early_bonus > 0 {
        state.earn(early_bonus);
    }

    state.events.push(Event::WaveStarted {
        wave,
        boss: state.boss_wave,
        enemies: state.spawn_queue.len(),
        early_bonus,
    });
    tracing::info!(
        wave,
        boss = state.boss_wave,
        enemies = state.spawn_queue.len(),
        early_bonus,
        "wave started"
    );
}

fn spawn(state: &mut GameState, kind: EnemyKind) {
    let wave = state.wave;
    let id = EnemyId::new(state.allocate_id());
    let speed = spawner::speed_multiplier(wave);

    let spawned = if kind.is_boss() {
        let boss_number = spawner::boss_number(wave);
        let difficulty = spawner::boss_difficulty_multiplier(boss_number, wave);
        let abilities = spawner::boss_abilities(boss_number);
        let mut boss = enemy::spawn(id, kind, state.path.start(), difficulty, speed);
        enemy::grant_abilities(&mut boss, &abilities);
        tracing::info!(wave, boss_number, ?abilities, "boss entered the field");
        boss
    } else {
        let difficulty = spawner::difficulty_multiplier(wave);
        enemy::spawn(id, kind, state.path.start(), difficulty, speed)
    };

    state.enemies.push(spawned);
    state.events.push(Event::EnemySpawned { enemy: id, kind });
}

/// Pays out and returns to waiting once an active wave has been cleared.
pub(crate) fn complete_if_cleared(state: &mut GameState) {
    if state.phase != Phase::Active || !state.enemies.is_empty() || !state.spawn_queue.is_empty()
    {
        return;
    }

    let wave = state.wave;
    let zero_leak_bonus = if state.leaks_this_wave == 0 {
        spawner::wave_bonus(wave)
    } else {
        0
    };
    let beacon_income: u32 = state
        .towers
        .iter()
        .map(|tower| upgrade::effective_income(tower.kind, tower.upgrades))
        .sum();
    let passive_income = spawner::passive_income(wave);

    state.earn(zero_leak_bonus + beacon_income + passive_income);
    state.phase = Phase::Waiting;
    state.wave_timer = 0.0;
    state.wave_timer_max = WAVE_AUTO_START_SECONDS;

    state.events.push(Event::WaveComplete {
        wave,
        zero_leak_bonus,
        beacon_income,
        passive_income,
    });
    tracing::info!(
        wave,
        leaks = state.leaks_this_wave,
        zero_leak_bonus,
        beacon_income,
        passive_income,
        "wave complete"
    );
}
