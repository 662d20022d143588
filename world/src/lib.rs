#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Wave Defence.
//!
//! Every entry point takes the current [`GameState`] by reference and returns
//! a fresh value; the input is never modified. Rejected commands return an
//! error and leave no trace. Renderers read the state through [`query`].

mod combat;
mod combo;
mod damage;
mod waves;

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use wave_defence_core::{
    constants::{
        DEFAULT_WAVE_SEED, EARLY_SEND_BONUS, EARLY_SEND_WINDOW, STARTING_GOLD, STARTING_LIVES,
        WAVE_AUTO_START_SECONDS,
    },
    Command, CommandError, Enemy, EnemyKind, Event, GameSummary, GridCell, Path, Phase,
    PlacementError, Projectile, SellError, Tower, TowerId, TowerKind, UpgradeError, UpgradePath,
};
use wave_defence_system_tower as tower;
use wave_defence_system_upgrade as upgrade;

pub use wave_defence_core::is_path_cell;

/// Complete simulation state of a single game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    gold: u32,
    lives: u32,
    score: u64,
    total_gold_earned: u32,
    wave: u32,
    phase: Phase,
    enemies: Vec<Enemy>,
    towers: Vec<Tower>,
    projectiles: Vec<Projectile>,
    occupied: BTreeSet<GridCell>,
    spawn_queue: VecDeque<EnemyKind>,
    spawn_timer: f32,
    wave_delay_timer: f32,
    wave_timer: f32,
    wave_timer_max: f32,
    elapsed: f32,
    next_entity_id: u32,
    boss_wave: bool,
    bosses_defeated: u32,
    leaks_this_wave: u32,
    recent_kills: VecDeque<f32>,
    last_combo_tier: u32,
    events: Vec<Event>,
    towers_placed: u32,
    rng_seed: u64,
    path: Path,
    summary: Option<GameSummary>,
}

impl GameState {
    /// Ids stay unique until `u32::MAX` entities have been created, far beyond any game.
    fn allocate_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id = id.saturating_add(1);
        id
    }

    fn earn(&mut self, gold: u32) {
        self.gold += gold;
        self.total_gold_earned += gold;
    }

    fn finish(&mut self) {
        let summary = GameSummary {
            score: self.score,
            wave_reached: self.wave,
            total_gold_earned: self.total_gold_earned,
            towers_placed: self.towers_placed,
            time_survived: self.elapsed,
            bosses_defeated: self.bosses_defeated,
        };
        self.summary = Some(summary);
        self.phase = Phase::GameOver;
        self.events.push(Event::GameOver { summary });
        tracing::info!(
            score = summary.score,
            wave = summary.wave_reached,
            bosses = summary.bosses_defeated,
            time = summary.time_survived,
            "game over"
        );
    }
}

/// Creates a fresh game using the default wave shuffle seed.
#[must_use]
pub fn new_game() -> GameState {
    new_game_with_seed(DEFAULT_WAVE_SEED)
}

/// Creates a fresh game whose wave shuffles derive from `seed`.
#[must_use]
pub fn new_game_with_seed(seed: u64) -> GameState {
    GameState {
        gold: STARTING_GOLD,
        lives: STARTING_LIVES,
        score: 0,
        total_gold_earned: 0,
        wave: 0,
        phase: Phase::Waiting,
        enemies: Vec::new(),
        towers: Vec::new(),
        projectiles: Vec::new(),
        occupied: BTreeSet::new(),
        spawn_queue: VecDeque::new(),
        spawn_timer: 0.0,
        wave_delay_timer: 0.0,
        wave_timer: 0.0,
        wave_timer_max: WAVE_AUTO_START_SECONDS,
        elapsed: 0.0,
        next_entity_id: 1,
        boss_wave: false,
        bosses_defeated: 0,
        leaks_this_wave: 0,
        recent_kills: VecDeque::new(),
        last_combo_tier: 0,
        events: Vec::new(),
        towers_placed: 0,
        rng_seed: seed,
        path: Path::standard(),
        summary: None,
    }
}

/// Advances the simulation by `dt` seconds.
///
/// Events produced during the tick replace those of the previous tick. Once
/// the game is over the state is returned unchanged.
#[must_use]
pub fn update(state: &GameState, dt: f32) -> GameState {
    let mut next = state.clone();
    if next.phase == Phase::GameOver {
        return next;
    }

    next.events.clear();
    next.elapsed += dt;

    waves::advance(&mut next, dt);
    combat::fire_towers(&mut next);
    combat::apply_cryo_auras(&mut next);
    let ledger = combat::advance_projectiles(&mut next, dt);
    combat::apply_damage(&mut next, &ledger);
    combat::move_enemies(&mut next, dt);
    combat::resolve_casualties(&mut next);
    combo::award(&mut next);
    waves::complete_if_cleared(&mut next);

    if next.lives == 0 {
        next.finish();
    }
    next
}

/// Reports whether a tower could stand on the cell, ignoring its cost.
#[must_use]
pub fn is_buildable(state: &GameState, cell: GridCell) -> bool {
    cell.in_bounds() && !state.path.covers(cell) && !state.occupied.contains(&cell)
}

/// Places a tower on the cell and charges its cost.
pub fn place_tower(
    state: &GameState,
    kind: TowerKind,
    cell: GridCell,
) -> Result<GameState, PlacementError> {
    if let Err(error) = validate_placement(state, kind, cell) {
        tracing::debug!(?kind, ?cell, %error, "placement rejected");
        return Err(error);
    }

    let mut next = state.clone();
    let cost = kind.stats().cost;
    next.gold -= cost;

    let id = TowerId::new(next.allocate_id());
    next.towers.push(tower::place(id, kind, cell));
    let _ = next.occupied.insert(cell);
    next.towers_placed += 1;
    next.events.push(Event::TowerPlaced {
        tower: id,
        kind,
        cell,
    });
    Ok(next)
}

fn validate_placement(
    state: &GameState,
    kind: TowerKind,
    cell: GridCell,
) -> Result<(), PlacementError> {
    if state.phase == Phase::GameOver {
        return Err(PlacementError::GameOver);
    }
    if !cell.in_bounds() {
        return Err(PlacementError::OutOfBounds);
    }
    if state.path.covers(cell) {
        return Err(PlacementError::OnPath);
    }
    if state.occupied.contains(&cell) {
        return Err(PlacementError::Occupied);
    }

    let cost = kind.stats().cost;
    if state.gold < cost {
        return Err(PlacementError::InsufficientGold {
            cost,
            available: state.gold,
        });
    }
    Ok(())
}

/// Sells the tower at `index`, refunding part of everything invested in it.
pub fn sell_tower(state: &GameState, index: usize) -> Result<GameState, SellError> {
    if state.phase == Phase::GameOver {
        tracing::debug!(index, "sale rejected after game over");
        return Err(SellError::GameOver);
    }
    if index >= state.towers.len() {
        tracing::debug!(index, "sale rejected for unknown tower");
        return Err(SellError::UnknownTower { index });
    }

    let mut next = state.clone();
    let sold = next.towers.remove(index);
    let refund = upgrade::sell_refund(sold.kind, sold.upgrades);
    let _ = next.occupied.remove(&sold.cell);
    next.gold += refund;
    next.events.push(Event::TowerSold {
        tower: sold.id,
        cell: sold.cell,
        refund,
    });
    Ok(next)
}

/// Buys the next tier of `path` for the tower at `index`.
pub fn upgrade_tower(
    state: &GameState,
    index: usize,
    path: UpgradePath,
) -> Result<GameState, UpgradeError> {
    let (tier, cost) = match validate_upgrade(state, index, path) {
        Ok(purchase) => purchase,
        Err(error) => {
            tracing::debug!(index, ?path, %error, "upgrade rejected");
            return Err(error);
        }
    };

    let mut next = state.clone();
    next.gold -= cost;
    let upgraded = &mut next.towers[index];
    upgraded.upgrades = upgraded.upgrades.with_tier(path, tier);
    let id = upgraded.id;
    next.events.push(Event::TowerUpgraded {
        tower: id,
        path,
        tier,
    });
    Ok(next)
}

fn validate_upgrade(
    state: &GameState,
    index: usize,
    path: UpgradePath,
) -> Result<(u8, u32), UpgradeError> {
    if state.phase == Phase::GameOver {
        return Err(UpgradeError::GameOver);
    }
    let Some(existing) = state.towers.get(index) else {
        return Err(UpgradeError::UnknownTower { index });
    };

    let tier = upgrade::validate_upgrade(existing.upgrades, path)?;
    let cost = upgrade::upgrade_cost(existing.kind, existing.upgrades, path);
    if state.gold < cost {
        return Err(UpgradeError::InsufficientGold {
            cost,
            available: state.gold,
        });
    }
    Ok((tier, cost))
}

/// Starts the next wave immediately.
///
/// Sending while waiting inside the early window pays a bonus. Calls made
/// while a wave is in progress or after the game ended change nothing.
#[must_use]
pub fn send_wave(state: &GameState) -> GameState {
    let mut next = state.clone();
    match next.phase {
        Phase::Waiting => {
            let bonus = if next.wave_timer < EARLY_SEND_WINDOW {
                EARLY_SEND_BONUS
            } else {
                0
            };
            waves::start_next_wave(&mut next, bonus);
        }
        Phase::PreWave => waves::start_next_wave(&mut next, 0),
        Phase::Spawning | Phase::Active | Phase::GameOver => {}
    }
    next
}

/// Applies the provided command, producing the next state.
pub fn apply(state: &GameState, command: Command) -> Result<GameState, CommandError> {
    let next = match command {
        Command::Tick { dt } => update(state, dt),
        Command::PlaceTower { kind, cell } => place_tower(state, kind, cell)?,
        Command::SellTower { index } => sell_tower(state, index)?,
        Command::UpgradeTower { index, path } => upgrade_tower(state, index, path)?,
        Command::SendWave => send_wave(state),
    };
    Ok(next)
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use super::GameState;
    use wave_defence_core::{
        Enemy, Event, GameSummary, GridCell, Path, Phase, Projectile, Tower, UpgradePath,
    };
    use wave_defence_system_upgrade as upgrade;

    /// Gold currently held.
    #[must_use]
    pub fn gold(state: &GameState) -> u32 {
        state.gold
    }

    /// Lives remaining.
    #[must_use]
    pub fn lives(state: &GameState) -> u32 {
        state.lives
    }

    /// Score accumulated so far.
    #[must_use]
    pub fn score(state: &GameState) -> u64 {
        state.score
    }

    /// Gold earned from kills, combos, and wave payouts.
    #[must_use]
    pub fn total_gold_earned(state: &GameState) -> u32 {
        state.total_gold_earned
    }

    /// Number of the latest wave that started, zero before the first.
    #[must_use]
    pub fn wave(state: &GameState) -> u32 {
        state.wave
    }

    /// Current phase of the wave cycle.
    #[must_use]
    pub fn phase(state: &GameState) -> Phase {
        state.phase
    }

    /// Reports whether the current wave is a boss wave.
    #[must_use]
    pub fn is_boss_wave(state: &GameState) -> bool {
        state.boss_wave
    }

    /// Enemies on the field in spawn order.
    #[must_use]
    pub fn enemies(state: &GameState) -> &[Enemy] {
        &state.enemies
    }

    /// Towers in placement order; indices match the sell and upgrade commands.
    #[must_use]
    pub fn towers(state: &GameState) -> &[Tower] {
        &state.towers
    }

    /// Projectiles in flight, including those spent during the latest tick.
    #[must_use]
    pub fn projectiles(state: &GameState) -> &[Projectile] {
        &state.projectiles
    }

    /// Cells that currently hold a tower, in ascending cell order.
    pub fn occupied_cells(state: &GameState) -> impl Iterator<Item = GridCell> + '_ {
        state.occupied.iter().copied()
    }

    /// Enemies still waiting to spawn in the current wave.
    #[must_use]
    pub fn pending_spawns(state: &GameState) -> usize {
        state.spawn_queue.len()
    }

    /// Events produced by the latest tick and any commands applied since.
    #[must_use]
    pub fn events(state: &GameState) -> &[Event] {
        &state.events
    }

    /// Seconds of simulated time elapsed.
    #[must_use]
    pub fn elapsed(state: &GameState) -> f32 {
        state.elapsed
    }

    /// Seconds spent waiting for the next wave and the auto-start threshold.
    #[must_use]
    pub fn wave_timer(state: &GameState) -> (f32, f32) {
        (state.wave_timer, state.wave_timer_max)
    }

    /// Number of bosses killed.
    #[must_use]
    pub fn bosses_defeated(state: &GameState) -> u32 {
        state.bosses_defeated
    }

    /// Enemies that leaked during the current wave.
    #[must_use]
    pub fn leaks_this_wave(state: &GameState) -> u32 {
        state.leaks_this_wave
    }

    /// Kill count of the latest combo tier paid in the current streak.
    #[must_use]
    pub fn combo_tier(state: &GameState) -> u32 {
        state.last_combo_tier
    }

    /// Route the enemies follow.
    #[must_use]
    pub fn path(state: &GameState) -> &Path {
        &state.path
    }

    /// Seed the wave shuffles derive from.
    #[must_use]
    pub fn seed(state: &GameState) -> u64 {
        state.rng_seed
    }

    /// Final results, available once the game is over.
    #[must_use]
    pub fn summary(state: &GameState) -> Option<&GameSummary> {
        state.summary.as_ref()
    }

    /// Cost of the next tier on the path, or `None` when it cannot be bought.
    #[must_use]
    pub fn upgrade_price(state: &GameState, index: usize, path: UpgradePath) -> Option<u32> {
        let existing = state.towers.get(index)?;
        upgrade::can_upgrade(existing.upgrades, path)
            .then(|| upgrade::upgrade_cost(existing.kind, existing.upgrades, path))
    }

    /// Gold the tower at `index` would return if sold now.
    #[must_use]
    pub fn sell_value(state: &GameState, index: usize) -> Option<u32> {
        state
            .towers
            .get(index)
            .map(|existing| upgrade::sell_refund(existing.kind, existing.upgrades))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_defence_core::{
        constants::{COMBO_TIERS, PRE_WAVE_DELAY, RALLY_CRY_BOOST, RALLY_CRY_RADIUS},
        path::STANDARD_WAYPOINTS,
        BossAbility, EnemyId, WorldPoint,
    };
    use wave_defence_system_enemy as enemy;
    use wave_defence_system_wave_spawner as spawner;

    fn funded(gold: u32) -> GameState {
        let mut state = new_game();
        state.gold = gold;
        state
    }

    fn grunt_at(state: &mut GameState, position: WorldPoint) -> EnemyId {
        let id = EnemyId::new(state.allocate_id());
        state
            .enemies
            .push(enemy::spawn(id, EnemyKind::Grunt, position, 1.0, 1.0));
        id
    }

    fn wave_events(state: &GameState) -> Vec<&Event> {
        state
            .events
            .iter()
            .filter(|event| matches!(event, Event::WaveStarted { .. }))
            .collect()
    }

    #[test]
    fn new_game_starts_waiting_with_full_purse() {
        let state = new_game();
        assert_eq!(query::gold(&state), STARTING_GOLD);
        assert_eq!(query::lives(&state), STARTING_LIVES);
        assert_eq!(query::phase(&state), Phase::Waiting);
        assert_eq!(query::wave(&state), 0);
        assert_eq!(query::seed(&state), DEFAULT_WAVE_SEED);
        assert_eq!(query::wave_timer(&state), (0.0, WAVE_AUTO_START_SECONDS));
        assert_eq!(query::path(&state).waypoints().len(), STANDARD_WAYPOINTS.len());
        assert_eq!(query::path(&state).waypoints()[0], query::path(&state).start());
    }

    #[test]
    fn placement_charges_and_occupies_the_cell() {
        let cell = GridCell::new(1, 1);
        let state = place_tower(&new_game(), TowerKind::Arrow, cell).expect("placed");
        assert_eq!(query::gold(&state), STARTING_GOLD - 50);
        assert!(!is_buildable(&state, cell));
        assert_eq!(query::occupied_cells(&state).collect::<Vec<_>>(), vec![cell]);
        assert_eq!(query::towers(&state)[0].position, cell.center());
    }

    #[test]
    fn placement_rejections_leave_the_state_untouched() {
        let state = place_tower(&new_game(), TowerKind::Arrow, GridCell::new(1, 1))
            .expect("placed");

        assert_eq!(
            place_tower(&state, TowerKind::Arrow, GridCell::new(1, 1)),
            Err(PlacementError::Occupied)
        );
        assert_eq!(
            place_tower(&state, TowerKind::Arrow, GridCell::new(5, 2)),
            Err(PlacementError::OnPath)
        );
        assert_eq!(
            place_tower(&state, TowerKind::Arrow, GridCell::new(16, 0)),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            place_tower(&state, TowerKind::Beacon, GridCell::new(1, 0)),
            Err(PlacementError::InsufficientGold {
                cost: 120,
                available: 100,
            })
        );
    }

    #[test]
    fn selling_refunds_seventy_percent_of_the_investment() {
        let state = place_tower(&new_game(), TowerKind::Cannon, GridCell::new(1, 1))
            .expect("placed");
        let state = upgrade_tower(&state, 0, UpgradePath::A).expect("upgraded");
        assert_eq!(query::gold(&state), 25);
        assert_eq!(query::sell_value(&state, 0), Some(87));

        let state = sell_tower(&state, 0).expect("sold");
        assert_eq!(query::gold(&state), 112);
        assert!(query::towers(&state).is_empty());
        assert!(is_buildable(&state, GridCell::new(1, 1)));
        assert_eq!(query::total_gold_earned(&state), 0);
    }

    #[test]
    fn selling_an_unknown_tower_is_rejected() {
        assert_eq!(
            sell_tower(&new_game(), 0),
            Err(SellError::UnknownTower { index: 0 })
        );
    }

    #[test]
    fn only_one_path_reaches_the_final_tier() {
        let mut state = place_tower(&funded(5_000), TowerKind::Arrow, GridCell::new(1, 1))
            .expect("placed");
        for path in [
            UpgradePath::A,
            UpgradePath::A,
            UpgradePath::A,
            UpgradePath::B,
            UpgradePath::B,
        ] {
            state = upgrade_tower(&state, 0, path).expect("upgraded");
        }

        let gold = query::gold(&state);
        assert_eq!(
            upgrade_tower(&state, 0, UpgradePath::B),
            Err(UpgradeError::PathLocked {
                path: UpgradePath::B
            })
        );
        assert_eq!(
            upgrade_tower(&state, 0, UpgradePath::A),
            Err(UpgradeError::PathMaxed {
                path: UpgradePath::A
            })
        );
        assert_eq!(query::gold(&state), gold);
        assert_eq!(query::upgrade_price(&state, 0, UpgradePath::B), None);
    }

    #[test]
    fn unaffordable_upgrade_is_rejected() {
        let state = place_tower(&new_game(), TowerKind::Sniper, GridCell::new(1, 1))
            .expect("placed");
        assert_eq!(
            upgrade_tower(&state, 0, UpgradePath::A),
            Err(UpgradeError::InsufficientGold {
                cost: 70,
                available: 40,
            })
        );
    }

    #[test]
    fn early_send_pays_a_bonus_inside_the_window() {
        let state = send_wave(&new_game());
        assert_eq!(query::wave(&state), 1);
        assert_eq!(query::phase(&state), Phase::Spawning);
        assert_eq!(query::gold(&state), STARTING_GOLD + EARLY_SEND_BONUS);
        assert_eq!(query::pending_spawns(&state), 6);

        let mut late = new_game();
        late.wave_timer = EARLY_SEND_WINDOW + 1.0;
        let late = send_wave(&late);
        assert_eq!(query::gold(&late), STARTING_GOLD);
    }

    #[test]
    fn sending_during_a_wave_changes_nothing() {
        let state = send_wave(&new_game());
        assert_eq!(send_wave(&state), state);
    }

    #[test]
    fn waves_start_on_their_own_after_the_countdown() {
        let mut state = new_game();
        state = update(&state, WAVE_AUTO_START_SECONDS - 1.0);
        assert_eq!(query::phase(&state), Phase::Waiting);

        state = update(&state, 1.0);
        assert_eq!(query::phase(&state), Phase::Spawning);
        assert_eq!(wave_events(&state).len(), 1);
    }

    #[test]
    fn spawning_releases_one_enemy_per_interval() {
        let mut state = send_wave(&new_game());
        state = update(&state, 0.1);
        assert_eq!(query::enemies(&state).len(), 1);
        assert_eq!(query::pending_spawns(&state), 5);

        state = update(&state, 0.1);
        assert_eq!(query::enemies(&state).len(), 1);

        for _ in 0..8 {
            state = update(&state, 0.1);
        }
        assert_eq!(query::enemies(&state).len(), 2);
    }

    #[test]
    fn pre_wave_countdown_starts_the_next_wave() {
        let mut state = new_game();
        state.phase = Phase::PreWave;
        state.wave_delay_timer = PRE_WAVE_DELAY;

        state = update(&state, PRE_WAVE_DELAY / 2.0);
        assert_eq!(query::phase(&state), Phase::PreWave);

        state = update(&state, PRE_WAVE_DELAY / 2.0);
        assert_eq!(query::phase(&state), Phase::Spawning);
        assert_eq!(query::wave(&state), 1);
    }

    #[test]
    fn every_tenth_wave_is_a_lone_boss() {
        for wave in [10, 20, 30] {
            let mut state = new_game();
            state.wave = wave - 1;
            state = send_wave(&state);
            assert!(query::is_boss_wave(&state));
            assert_eq!(query::pending_spawns(&state), 1);

            state = update(&state, 0.01);
            let boss = &query::enemies(&state)[0];
            assert_eq!(boss.kind, EnemyKind::Boss);
            let expected = spawner::boss_abilities(wave / 10);
            assert_eq!(boss.abilities.iter().copied().collect::<Vec<_>>(), expected);
            assert_eq!(boss.immune_to_slow, expected.contains(&BossAbility::Frostproof));
            assert_eq!(query::phase(&state), Phase::Active);
        }
    }

    #[test]
    fn clearing_a_wave_without_leaks_pays_the_bonus() {
        let mut state = new_game();
        state.wave = 4;
        state.phase = Phase::Active;
        state = update(&state, 0.1);

        assert_eq!(query::phase(&state), Phase::Waiting);
        assert_eq!(
            query::gold(&state),
            STARTING_GOLD + spawner::wave_bonus(4) + spawner::passive_income(4)
        );
        assert!(state.events.contains(&Event::WaveComplete {
            wave: 4,
            zero_leak_bonus: spawner::wave_bonus(4),
            beacon_income: 0,
            passive_income: spawner::passive_income(4),
        }));
    }

    #[test]
    fn a_single_leak_forfeits_the_bonus() {
        let mut state = new_game();
        state.wave = 4;
        state.phase = Phase::Active;
        state.leaks_this_wave = 1;
        state = update(&state, 0.1);

        assert_eq!(
            query::gold(&state),
            STARTING_GOLD + spawner::passive_income(4)
        );
    }

    #[test]
    fn beacons_pay_income_when_a_wave_clears() {
        let mut state = place_tower(&funded(500), TowerKind::Beacon, GridCell::new(1, 1))
            .expect("placed");
        state.wave = 1;
        state.phase = Phase::Active;
        state.leaks_this_wave = 1;
        let gold = query::gold(&state);
        state = update(&state, 0.1);

        assert_eq!(query::gold(&state), gold + 8 + spawner::passive_income(1));
    }

    #[test]
    fn combo_tiers_pay_once_per_streak() {
        let mut state = new_game();
        state.phase = Phase::Active;
        state.elapsed = 10.0;
        state.recent_kills = VecDeque::from(vec![9.5, 9.6, 9.7]);
        let _ = grunt_at(&mut state, WorldPoint::new(500.0, 370.0));

        state = update(&state, 0.1);
        assert!(state.events.contains(&Event::ComboBonus {
            kills: 3,
            bonus: COMBO_TIERS[2].bonus,
        }));
        assert_eq!(query::combo_tier(&state), 3);

        state.recent_kills.push_back(state.elapsed);
        state = update(&state, 0.1);
        assert!(!state
            .events
            .iter()
            .any(|event| matches!(event, Event::ComboBonus { .. })));

        state.recent_kills.push_back(state.elapsed);
        state = update(&state, 0.1);
        assert!(state.events.contains(&Event::ComboBonus {
            kills: 5,
            bonus: COMBO_TIERS[1].bonus,
        }));
    }

    #[test]
    fn combo_streak_resets_once_the_window_empties() {
        let mut state = new_game();
        state.elapsed = 20.0;
        state.last_combo_tier = 5;
        state.recent_kills = VecDeque::from(vec![10.0]);

        state = update(&state, 0.1);
        assert!(state.recent_kills.is_empty());
        assert_eq!(query::combo_tier(&state), 0);
    }

    #[test]
    fn entity_ids_share_one_increasing_counter() {
        let mut state = place_tower(&new_game(), TowerKind::Arrow, GridCell::new(1, 1))
            .expect("placed");
        let tower = query::towers(&state)[0].id.get();
        let walker = grunt_at(&mut state, WorldPoint::new(80.0, 80.0)).get();
        assert!(walker > tower);

        state.next_entity_id = u32::MAX - 1;
        assert_eq!(state.allocate_id(), u32::MAX - 1);
        assert_eq!(state.next_entity_id, u32::MAX);
    }

    #[test]
    fn rally_cry_boosts_only_neighbours_of_the_boss() {
        let mut state = new_game();
        let boss = grunt_at(&mut state, WorldPoint::new(200.0, 80.0));
        let near = grunt_at(&mut state, WorldPoint::new(250.0, 80.0));
        let far = grunt_at(&mut state, WorldPoint::new(380.0, 80.0));
        enemy::grant_abilities(&mut state.enemies[0], &[BossAbility::RallyCry]);
        state.enemies[0].rally_cooldown = 0.05;
        let gap = WorldPoint::new(200.0, 80.0).distance_to(WorldPoint::new(380.0, 80.0));
        assert!(gap > RALLY_CRY_RADIUS);

        state = update(&state, 0.1);

        let boost = |id: EnemyId| {
            query::enemies(&state)
                .iter()
                .find(|walker| walker.id == id)
                .map(|walker| walker.speed_boost)
        };
        assert_eq!(boost(boss), Some(RALLY_CRY_BOOST));
        assert_eq!(boost(near), Some(RALLY_CRY_BOOST));
        assert_eq!(boost(far), Some(0.0));
    }

    #[test]
    fn cryo_aura_slows_only_enemies_in_range() {
        let mut state = place_tower(&new_game(), TowerKind::Cryo, GridCell::new(5, 3))
            .expect("placed");
        let inside = grunt_at(&mut state, WorldPoint::new(200.0, 80.0));
        let outside = grunt_at(&mut state, WorldPoint::new(80.0, 80.0));

        state = update(&state, 0.1);

        let slow = |id: EnemyId| {
            query::enemies(&state)
                .iter()
                .find(|walker| walker.id == id)
                .map(|walker| (walker.slowed, walker.slow_multiplier))
        };
        assert_eq!(slow(inside), Some((true, 0.65)));
        assert_eq!(slow(outside), Some((false, 1.0)));
    }

    #[test]
    fn kills_pay_gold_and_score() {
        let mut state = place_tower(&new_game(), TowerKind::Sniper, GridCell::new(1, 1))
            .expect("placed");
        state.phase = Phase::Active;
        let target = grunt_at(&mut state, GridCell::new(2, 1).center());
        state.enemies[0].health = 1.0;

        for _ in 0..5 {
            state = update(&state, 0.05);
        }

        assert!(query::enemies(&state).iter().all(|walker| walker.id != target));
        assert_eq!(query::score(&state), EnemyKind::Grunt.stats().score);
        assert!(query::total_gold_earned(&state) >= EnemyKind::Grunt.stats().gold);
    }

    #[test]
    fn the_last_leak_ends_the_game_exactly_once() {
        let mut state = new_game();
        state.phase = Phase::Active;
        state.lives = 1;
        state.wave = 3;
        let last = state.path.len() - 1;
        let end = state.path.waypoint(last).expect("waypoint");
        let id = grunt_at(&mut state, end);
        state.enemies[0].path_index = last;
        let start = state.path.start();
        let _ = grunt_at(&mut state, start);

        state = update(&state, 0.1);
        assert_eq!(query::phase(&state), Phase::GameOver);
        assert_eq!(query::lives(&state), 0);
        let game_overs = state
            .events
            .iter()
            .filter(|event| matches!(event, Event::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert!(state.events.contains(&Event::Leak {
            enemy: id,
            kind: EnemyKind::Grunt,
            lives_remaining: 0,
        }));
        assert_eq!(query::leaks_this_wave(&state), 1);

        let summary = *query::summary(&state).expect("summary");
        assert_eq!(summary.wave_reached, 3);

        let after = update(&state, 1.0);
        assert_eq!(after, state);
        assert_eq!(send_wave(&after), after);
        assert_eq!(
            place_tower(&after, TowerKind::Arrow, GridCell::new(1, 1)),
            Err(PlacementError::GameOver)
        );
        assert_eq!(sell_tower(&after, 0), Err(SellError::GameOver));
        assert_eq!(
            upgrade_tower(&after, 0, UpgradePath::A),
            Err(UpgradeError::GameOver)
        );
    }

    #[test]
    fn apply_routes_commands_and_wraps_rejections() {
        let state = apply(
            &new_game(),
            Command::PlaceTower {
                kind: TowerKind::Frost,
                cell: GridCell::new(1, 1),
            },
        )
        .expect("placed");
        assert_eq!(query::towers(&state).len(), 1);

        let rejected = apply(&state, Command::SellTower { index: 4 });
        assert_eq!(
            rejected,
            Err(CommandError::Sell(SellError::UnknownTower { index: 4 }))
        );

        let ticked = apply(&state, Command::Tick { dt: 0.5 }).expect("ticked");
        assert_eq!(query::elapsed(&ticked), 0.5);
    }

    #[test]
    fn update_never_modifies_its_input() {
        let state = send_wave(&new_game());
        let snapshot = state.clone();
        let _ = update(&state, 0.5);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn game_state_survives_snapshot_encoding() {
        let mut state = place_tower(&new_game(), TowerKind::Cannon, GridCell::new(1, 1))
            .expect("placed");
        state = send_wave(&state);
        for _ in 0..20 {
            state = update(&state, 0.1);
        }

        let bytes = bincode::serialize(&state).expect("serialize");
        let restored: GameState = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, state);
    }
}
