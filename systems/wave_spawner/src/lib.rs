#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave composition and scaling curves.
//!
//! A wave's roster is fully determined by the wave number and the game's
//! shuffle seed. Every tenth wave is a boss wave holding a single boss; other
//! waves mix grunts, runners, and tanks according to the difficulty tier.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use wave_defence_core::{
    constants::{
        BOSS_WAVE_INTERVAL, HEALTH_SCALE_PER_BOSS, HEALTH_SCALE_PER_WAVE,
        MINI_BOSS_WAVE_INTERVAL, PASSIVE_INCOME_BASE, PASSIVE_INCOME_STEP,
        PASSIVE_INCOME_WAVE_STEP, SPEED_SCALE_PER_WAVE, WAVE_BONUS_BASE, WAVE_BONUS_PER_WAVE,
    },
    BossAbility, EnemyKind,
};

const EARLY_TIER_LAST_WAVE: u32 = 10;
const MID_TIER_LAST_WAVE: u32 = 25;

/// Stage of the game that decides how a wave is composed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DifficultyTier {
    /// Waves 1 through 10.
    Early,
    /// Waves 11 through 25.
    Mid,
    /// Wave 26 onward.
    Late,
}

/// Difficulty tier of the provided wave.
#[must_use]
pub const fn difficulty_tier(wave: u32) -> DifficultyTier {
    if wave <= EARLY_TIER_LAST_WAVE {
        DifficultyTier::Early
    } else if wave <= MID_TIER_LAST_WAVE {
        DifficultyTier::Mid
    } else {
        DifficultyTier::Late
    }
}

/// Number of enemies in a regular wave.
#[must_use]
pub const fn wave_size(wave: u32) -> usize {
    let mut size = 6 + 2 * wave.saturating_sub(1);
    if wave > EARLY_TIER_LAST_WAVE && wave % 3 == 0 {
        size += 4;
    }
    if wave > EARLY_TIER_LAST_WAVE && wave % 5 == 0 {
        size += 6;
    }
    size as usize
}

/// Reports whether the wave is led by a single boss.
#[must_use]
pub const fn is_boss_wave(wave: u32) -> bool {
    wave > 0 && wave % BOSS_WAVE_INTERVAL == 0
}

/// Ordinal of the boss met on the provided wave, starting at 1.
#[must_use]
pub const fn boss_number(wave: u32) -> u32 {
    wave / BOSS_WAVE_INTERVAL
}

/// Abilities granted to the boss with the provided ordinal.
#[must_use]
pub fn boss_abilities(boss_number: u32) -> Vec<BossAbility> {
    match boss_number {
        0 => Vec::new(),
        1 => vec![BossAbility::ShieldPulse],
        2 => vec![BossAbility::ShieldPulse, BossAbility::RallyCry],
        _ => vec![
            BossAbility::ShieldPulse,
            BossAbility::RallyCry,
            BossAbility::Frostproof,
        ],
    }
}

fn share(size: usize, percent: usize) -> usize {
    size * percent / 100
}

fn roster(wave: u32) -> Vec<EnemyKind> {
    let size = wave_size(wave);
    let (runners, tanks) = match difficulty_tier(wave) {
        DifficultyTier::Early => {
            let runners = if wave >= 3 { share(size, 30) } else { 0 };
            let tanks = if wave >= 6 { share(size, 15) } else { 0 };
            (runners, tanks)
        }
        DifficultyTier::Mid => (share(size, 35), share(size, 25)),
        DifficultyTier::Late if wave % 7 == 0 => (0, size),
        DifficultyTier::Late if wave % 5 == 0 => (size, 0),
        DifficultyTier::Late => (share(size, 35), share(size, 35)),
    };
    let mut grunts = size - runners - tanks;

    let mut mini_bosses = 0;
    if difficulty_tier(wave) == DifficultyTier::Mid
        && wave % MINI_BOSS_WAVE_INTERVAL == 0
        && grunts > 0
    {
        grunts -= 1;
        mini_bosses = 1;
    }

    let mut kinds = Vec::with_capacity(size);
    kinds.extend(std::iter::repeat(EnemyKind::Grunt).take(grunts));
    kinds.extend(std::iter::repeat(EnemyKind::Runner).take(runners));
    kinds.extend(std::iter::repeat(EnemyKind::Tank).take(tanks));
    kinds.extend(std::iter::repeat(EnemyKind::MiniBoss).take(mini_bosses));
    kinds
}

fn derive_wave_seed(seed: u64, wave: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(wave.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Spawn order of the provided wave.
///
/// Boss waves hold a single boss. Other rosters are shuffled with a generator
/// derived from `seed` and the wave number, so equal inputs always produce
/// the same order.
#[must_use]
pub fn generate_wave(wave: u32, seed: u64) -> Vec<EnemyKind> {
    if is_boss_wave(wave) {
        return vec![EnemyKind::Boss];
    }

    let mut kinds = roster(wave);
    let mut rng = ChaCha8Rng::seed_from_u64(derive_wave_seed(seed, wave));
    kinds.shuffle(&mut rng);
    kinds
}

/// Health multiplier applied to regular enemies.
#[must_use]
pub fn difficulty_multiplier(wave: u32) -> f32 {
    HEALTH_SCALE_PER_WAVE.powi(wave.saturating_sub(1) as i32)
}

/// Speed multiplier applied to every enemy.
#[must_use]
pub fn speed_multiplier(wave: u32) -> f32 {
    1.0 + wave.saturating_sub(1) as f32 * SPEED_SCALE_PER_WAVE
}

/// Health multiplier applied to the boss with the provided ordinal.
#[must_use]
pub fn boss_difficulty_multiplier(boss_number: u32, wave: u32) -> f32 {
    HEALTH_SCALE_PER_BOSS.powi(boss_number.saturating_sub(1) as i32) * difficulty_multiplier(wave)
}

/// Gold paid for clearing a wave without a single leak.
#[must_use]
pub const fn wave_bonus(wave: u32) -> u32 {
    WAVE_BONUS_BASE + WAVE_BONUS_PER_WAVE * wave
}

/// Gold paid after every cleared wave regardless of leaks.
#[must_use]
pub const fn passive_income(wave: u32) -> u32 {
    PASSIVE_INCOME_BASE + PASSIVE_INCOME_STEP * (wave / PASSIVE_INCOME_WAVE_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(kinds: &[EnemyKind], kind: EnemyKind) -> usize {
        kinds.iter().filter(|candidate| **candidate == kind).count()
    }

    #[test]
    fn wave_size_grows_with_late_game_surges() {
        assert_eq!(wave_size(1), 6);
        assert_eq!(wave_size(9), 22);
        assert_eq!(wave_size(12), 32);
        assert_eq!(wave_size(15), 44);
        assert_eq!(wave_size(20), 50);
    }

    #[test]
    fn first_waves_are_all_grunts() {
        assert_eq!(generate_wave(1, 7), vec![EnemyKind::Grunt; 6]);
        assert_eq!(generate_wave(2, 7), vec![EnemyKind::Grunt; 8]);
    }

    #[test]
    fn early_tier_introduces_runners_then_tanks() {
        let third = generate_wave(3, 1);
        assert_eq!(count(&third, EnemyKind::Runner), 3);
        assert_eq!(count(&third, EnemyKind::Tank), 0);
        assert_eq!(count(&third, EnemyKind::Grunt), 7);

        let sixth = generate_wave(6, 1);
        assert_eq!(count(&sixth, EnemyKind::Runner), 4);
        assert_eq!(count(&sixth, EnemyKind::Tank), 2);
        assert_eq!(count(&sixth, EnemyKind::Grunt), 10);
    }

    #[test]
    fn mid_tier_fifth_waves_carry_a_mini_boss() {
        let wave = generate_wave(15, 3);
        assert_eq!(wave.len(), 44);
        assert_eq!(count(&wave, EnemyKind::MiniBoss), 1);
        assert_eq!(count(&wave, EnemyKind::Runner), 15);
        assert_eq!(count(&wave, EnemyKind::Tank), 11);
        assert_eq!(count(&wave, EnemyKind::Grunt), 17);

        assert_eq!(count(&generate_wave(14, 3), EnemyKind::MiniBoss), 0);
    }

    #[test]
    fn late_tier_themes_override_the_mix() {
        let sevenths = generate_wave(28, 9);
        assert!(sevenths.iter().all(|kind| *kind == EnemyKind::Tank));

        let fifths = generate_wave(45, 9);
        assert_eq!(fifths.len(), wave_size(45));
        assert!(fifths.iter().all(|kind| *kind == EnemyKind::Runner));

        let mixed = generate_wave(26, 9);
        assert_eq!(count(&mixed, EnemyKind::Runner), 19);
        assert_eq!(count(&mixed, EnemyKind::Tank), 19);
        assert_eq!(count(&mixed, EnemyKind::Grunt), 18);
    }

    #[test]
    fn boss_waves_hold_a_single_boss() {
        for wave in [10, 20, 30, 70] {
            assert!(is_boss_wave(wave));
            assert_eq!(generate_wave(wave, 5), vec![EnemyKind::Boss]);
        }
        assert!(!is_boss_wave(0));
        assert!(!is_boss_wave(15));
    }

    #[test]
    fn bosses_gain_abilities_over_time() {
        assert_eq!(boss_abilities(boss_number(10)), vec![BossAbility::ShieldPulse]);
        assert_eq!(boss_abilities(boss_number(20)).len(), 2);
        assert!(boss_abilities(boss_number(30)).contains(&BossAbility::Frostproof));
        assert!(boss_abilities(boss_number(90)).contains(&BossAbility::Frostproof));
    }

    #[test]
    fn shuffle_is_reproducible_for_equal_seeds() {
        assert_eq!(generate_wave(9, 42), generate_wave(9, 42));

        let reference = generate_wave(9, 0);
        let differs = (1..32).any(|seed| generate_wave(9, seed) != reference);
        assert!(differs);
    }

    #[test]
    fn scaling_curves_start_at_one() {
        assert_eq!(difficulty_multiplier(1), 1.0);
        assert_eq!(speed_multiplier(1), 1.0);
        assert_eq!(boss_difficulty_multiplier(1, 1), 1.0);
        assert!((difficulty_multiplier(3) - 1.1664).abs() < 1e-4);
        assert!((speed_multiplier(11) - 1.2).abs() < 1e-6);
        assert!((boss_difficulty_multiplier(2, 1) - 1.15).abs() < 1e-6);
    }

    #[test]
    fn economy_curves_follow_the_wave_number() {
        assert_eq!(wave_bonus(1), 18);
        assert_eq!(wave_bonus(10), 45);
        assert_eq!(passive_income(4), 10);
        assert_eq!(passive_income(5), 15);
        assert_eq!(passive_income(12), 20);
    }
}
