//! Game settings, read from TOML.

use std::path::Path;
use std::time::Duration;

use game_core::Color;
use minimax_engine::Difficulty;
use serde::{Deserialize, Serialize};

use crate::clock::TimeSettings;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starting time per side in seconds (0 = unlimited)
    pub time_control_secs: u64,
    /// Seconds added after each move
    pub increment_secs: u64,
    pub ai_enabled: bool,
    /// Side played by the engine
    pub ai_color: Color,
    pub difficulty: Difficulty,
    /// Maximum random perturbation of the engine's root scores (0 = off)
    pub jitter: i32,
    /// Seed for the jitter; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_control_secs: 600,
            increment_secs: 0,
            ai_enabled: true,
            ai_color: Color::Black,
            difficulty: Difficulty::Medium,
            jitter: 0,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Hot-seat game with no clock.
    pub fn two_player() -> Self {
        Self {
            time_control_secs: 0,
            ai_enabled: false,
            ..Self::default()
        }
    }

    pub fn time_settings(&self) -> TimeSettings {
        TimeSettings {
            initial: Duration::from_secs(self.time_control_secs),
            increment: Duration::from_secs(self.increment_secs),
        }
    }

    /// Whether the engine owns `color`'s moves.
    pub fn engine_plays(&self, color: Color) -> bool {
        self.ai_enabled && self.ai_color == color
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
