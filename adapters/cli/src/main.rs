#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted Wave Defence game headlessly.

mod scenario;

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wave_defence_core::{constants::DEFAULT_WAVE_SEED, Command, Event, Phase};
use wave_defence_world::{self as world, query, GameState};

use crate::scenario::Scenario;

const MAX_TICK_SECONDS: f32 = 0.05;

/// Runs a scripted Wave Defence game and prints the final summary.
#[derive(Debug, Parser)]
#[command(name = "wave-defence", version)]
struct CliArgs {
    /// Seed the wave shuffles derive from.
    #[arg(long, default_value_t = DEFAULT_WAVE_SEED)]
    seed: u64,
    /// Simulated seconds per tick; values above 0.05 are clamped.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Simulated seconds after which the run stops even if lives remain.
    #[arg(long, default_value_t = 900.0)]
    max_time: f32,
    /// TOML scenario holding the build order; a built-in order is used otherwise.
    #[arg(long)]
    scenario: Option<PathBuf>,
}

/// Entry point for the Wave Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "tick length must be a positive number of seconds, got {}",
        args.dt
    );
    ensure!(
        args.max_time.is_finite() && args.max_time > 0.0,
        "time limit must be a positive number of seconds, got {}",
        args.max_time
    );

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::standard(),
    };

    let state = run(
        world::new_game_with_seed(args.seed),
        &scenario,
        args.dt.min(MAX_TICK_SECONDS),
        args.max_time,
    );
    report(&state);
    Ok(())
}

fn run(mut state: GameState, scenario: &Scenario, dt: f32, max_time: f32) -> GameState {
    let mut pending = scenario.actions.iter().peekable();

    while query::phase(&state) != Phase::GameOver && query::elapsed(&state) < max_time {
        while let Some(action) = pending.next_if(|action| action.at <= query::elapsed(&state)) {
            state = submit(state, action.command.clone());
        }

        if scenario.auto_send && query::phase(&state) == Phase::Waiting && query::wave(&state) > 0
        {
            state = submit(state, Command::SendWave);
        }

        state = submit(state, Command::Tick { dt });
        log_milestones(&state);
    }
    state
}

fn submit(state: GameState, command: Command) -> GameState {
    match world::apply(&state, command.clone()) {
        Ok(next) => next,
        Err(error) => {
            tracing::warn!(?command, %error, "scheduled command rejected");
            state
        }
    }
}

fn log_milestones(state: &GameState) {
    for event in query::events(state) {
        match event {
            Event::Leak {
                kind,
                lives_remaining,
                ..
            } => tracing::info!(?kind, lives_remaining, "enemy leaked"),
            Event::ComboBonus { kills, bonus } => {
                tracing::info!(kills, bonus, "combo bonus");
            }
            _ => {}
        }
    }
}

fn report(state: &GameState) {
    match query::summary(state) {
        Some(summary) => {
            println!("game over on wave {}", summary.wave_reached);
            println!("score: {}", summary.score);
            println!("gold earned: {}", summary.total_gold_earned);
            println!("towers placed: {}", summary.towers_placed);
            println!("bosses defeated: {}", summary.bosses_defeated);
            println!("time survived: {:.1}s", summary.time_survived);
        }
        None => {
            println!(
                "time limit reached on wave {} with {} lives left",
                query::wave(state),
                query::lives(state)
            );
            println!("score: {}", query::score(state));
            println!("gold: {}", query::gold(state));
            println!("towers: {}", query::towers(state).len());
            println!("bosses defeated: {}", query::bosses_defeated(state));
        }
    }
}
