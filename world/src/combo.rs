//! Kill-streak bonuses.

use wave_defence_core::{
    constants::{COMBO_TIERS, KILL_WINDOW_RETENTION},
    Event,
};

use crate::GameState;

/// Prunes stale kill timestamps and pays the highest newly reached combo tier.
///
/// A tier pays at most once per streak; the streak ends when the retention
/// window empties.
pub(crate) fn award(state: &mut GameState) {
    let now = state.elapsed;
    while state
        .recent_kills
        .front()
        .is_some_and(|kill| now - kill > KILL_WINDOW_RETENTION)
    {
        let _ = state.recent_kills.pop_front();
    }

    if state.recent_kills.is_empty() {
        state.last_combo_tier = 0;
        return;
    }

    let reached = COMBO_TIERS.iter().find(|tier| {
        let kills = state
            .recent_kills
            .iter()
            .filter(|kill| now - **kill <= tier.window)
            .count();
        kills >= tier.kills as usize
    });

    let Some(tier) = reached else {
        return;
    };
    if tier.kills <= state.last_combo_tier {
        return;
    }

    state.last_combo_tier = tier.kills;
    state.earn(tier.bonus);
    state.events.push(Event::ComboBonus {
        kills: tier.kills,
        bonus: tier.bonus,
    });
    tracing::debug!(kills = tier.kills, bonus = tier.bonus, "combo tier reached");
}
