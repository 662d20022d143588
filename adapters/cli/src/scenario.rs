//! Scripted build orders replayed by the headless runner.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use wave_defence_core::{Command, GridCell, TowerKind, UpgradePath};

const SUPPORTED_SCENARIO_VERSION: u32 = 1;

/// Command scheduled at a point in simulated time.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct ScheduledAction {
    /// Simulated second at which the command is submitted.
    pub(crate) at: f32,
    /// Command forwarded to the world.
    pub(crate) command: Command,
}

/// Build order and wave policy for a single run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Scenario {
    /// Sends every wave as soon as the previous one is cleared.
    pub(crate) auto_send: bool,
    /// Actions ordered by their scheduled time.
    pub(crate) actions: Vec<ScheduledAction>,
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    version: u32,
    #[serde(default)]
    auto_send: bool,
    #[serde(default)]
    actions: Vec<ScheduledAction>,
}

impl Scenario {
    /// Loads and validates a scenario from a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid scenario at {}", path.display()))
    }

    /// Parses and validates scenario TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let file: ScenarioFile =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;
        if file.version != SUPPORTED_SCENARIO_VERSION {
            bail!(
                "unsupported scenario version {}; expected {}",
                file.version,
                SUPPORTED_SCENARIO_VERSION
            );
        }

        for action in &file.actions {
            if !action.at.is_finite() || action.at < 0.0 {
                bail!("action {:?} is scheduled at invalid time {}", action.command, action.at);
            }
            if let Command::Tick { .. } = action.command {
                bail!("tick commands are driven by the runner and cannot be scheduled");
            }
        }

        let mut actions = file.actions;
        actions.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self {
            auto_send: file.auto_send,
            actions,
        })
    }

    /// Build order used when no scenario file is provided.
    pub(crate) fn standard() -> Self {
        let place = |at: f32, kind: TowerKind, column: i32, row: i32| ScheduledAction {
            at,
            command: Command::PlaceTower {
                kind,
                cell: GridCell::new(column, row),
            },
        };
        let upgrade = |at: f32, index: usize, path: UpgradePath| ScheduledAction {
            at,
            command: Command::UpgradeTower { index, path },
        };

        Self {
            auto_send: true,
            actions: vec![
                place(0.0, TowerKind::Arrow, 5, 3),
                place(0.0, TowerKind::Frost, 11, 4),
                place(30.0, TowerKind::Cannon, 4, 5),
                place(60.0, TowerKind::Arrow, 8, 7),
                place(90.0, TowerKind::Sniper, 6, 4),
                upgrade(120.0, 0, UpgradePath::A),
                place(150.0, TowerKind::Cryo, 2, 8),
                upgrade(180.0, 2, UpgradePath::A),
                place(210.0, TowerKind::Beacon, 6, 5),
                upgrade(240.0, 4, UpgradePath::A),
                upgrade(270.0, 0, UpgradePath::A),
                upgrade(300.0, 1, UpgradePath::B),
                place(330.0, TowerKind::Cannon, 10, 7),
                upgrade(360.0, 4, UpgradePath::A),
                upgrade(420.0, 2, UpgradePath::A),
            ],
        }
    }
}
