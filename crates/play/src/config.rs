//! Session configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid.

use std::path::{Path, PathBuf};

use chess_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who sits at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Two people share the board
    #[value(name = "pvp")]
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    /// One person plays the engine
    #[value(name = "ai")]
    #[serde(rename = "ai")]
    PlayerVsEngine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub mode: Mode,
    /// Engine search depth in plies
    pub depth: u8,
    /// Colour the engine plays in `ai` mode
    pub engine_color: Side,
    /// Where `save` and `load` read and write
    pub save_path: PathBuf,
    /// Pause before the engine replies, in milliseconds
    pub engine_delay_ms: u64,
    /// Fixed tie-break seed; random when absent
    pub seed: Option<u64>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            mode: Mode::PlayerVsEngine,
            depth: minimax_engine::DEFAULT_DEPTH,
            engine_color: Side::Black,
            save_path: PathBuf::from("savegame.json"),
            engine_delay_ms: 300,
            seed: None,
        }
    }
}

impl PlayConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::InvalidDepth(self.depth));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
