use std::path::PathBuf;

use anyhow::ensure;
use serde::{Deserialize, Serialize};
use slidetoe_engine::Mark;

use crate::util;

/// What happens once a win has been acknowledged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum OnWin {
    /// Start a new game on an empty board
    #[default]
    #[display("restart")]
    Restart,
    /// Quit the program
    #[display("exit")]
    Exit,
}

/// Settings of the interactive game.
///
/// Read from an optional JSON file; every field may be omitted.
///
/// ```json
/// { "cross_glyph": "X", "circle_glyph": "O", "on_win": "restart" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub cross_glyph: String,
    pub circle_glyph: String,
    pub on_win: OnWin,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cross_glyph: "X".to_owned(),
            circle_glyph: "O".to_owned(),
            on_win: OnWin::Restart,
        }
    }
}

impl GameConfig {
    pub fn glyph(&self, mark: Mark) -> &str {
        match mark {
            Mark::Cross => &self.cross_glyph,
            Mark::Circle => &self.circle_glyph,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for mark in Mark::ALL {
            let glyph = self.glyph(mark);
            ensure!(!glyph.trim().is_empty(), "glyph for {mark} must not be empty");
            ensure!(
                !glyph.contains(['\n', '\r']),
                "glyph for {mark} must be a single line"
            );
        }
        ensure!(
            self.cross_glyph != self.circle_glyph,
            "cross and circle glyphs must differ (both are {:?})",
            self.cross_glyph
        );
        Ok(())
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Path to a JSON configuration file
    #[clap(long)]
    config: Option<PathBuf>,
    /// Glyph drawn for the cross player (overrides the config file)
    #[clap(long)]
    cross_glyph: Option<String>,
    /// Glyph drawn for the circle player (overrides the config file)
    #[clap(long)]
    circle_glyph: Option<String>,
    /// What to do after a win is acknowledged (overrides the config file)
    #[clap(long, value_enum)]
    on_win: Option<OnWin>,
}

impl ConfigArg {
    /// Merges defaults, the config file and command line overrides.
    pub(crate) fn resolve(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("config", path)?,
            None => GameConfig::default(),
        };
        if let Some(glyph) = &self.cross_glyph {
            config.cross_glyph.clone_from(glyph);
        }
        if let Some(glyph) = &self.circle_glyph {
            config.circle_glyph.clone_from(glyph);
        }
        if let Some(on_win) = self.on_win {
            config.on_win = on_win;
        }
        config.validate()?;
        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }
}
