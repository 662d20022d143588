//! Per-tick aggregation of projectile impacts.

use std::collections::BTreeMap;

use wave_defence_core::{DamageEvent, EnemyId, SlowEffect};

/// Damage and status effects an enemy accumulated during a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PendingDamage {
    /// Summed damage of every impact.
    pub(crate) amount: f32,
    /// Strongest slow among the impacts.
    pub(crate) slow: Option<SlowEffect>,
    /// Set when any impact bypassed shields.
    pub(crate) pierce_shield: bool,
}

/// Damage batched per enemy, iterated in identifier order.
#[derive(Debug, Default)]
pub(crate) struct DamageLedger {
    entries: BTreeMap<EnemyId, PendingDamage>,
}

impl DamageLedger {
    /// Folds an impact into the enemy's pending damage.
    pub(crate) fn record(&mut self, event: DamageEvent) {
        let entry = self.entries.entry(event.enemy).or_insert(PendingDamage {
            amount: 0.0,
            slow: None,
            pierce_shield: false,
        });

        entry.amount += event.amount;
        entry.pierce_shield |= event.pierce_shield;
        entry.slow = match (entry.slow, event.slow) {
            (Some(current), Some(incoming)) => Some(SlowEffect {
                multiplier: current.multiplier.min(incoming.multiplier),
                duration: current.duration.max(incoming.duration),
            }),
            (current, incoming) => current.or(incoming),
        };
    }

    /// Pending damage for the enemy, if any impact landed on it.
    pub(crate) fn get(&self, enemy: EnemyId) -> Option<&PendingDamage> {
        self.entries.get(&enemy)
    }

    /// Reports whether no impact landed this tick.
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
