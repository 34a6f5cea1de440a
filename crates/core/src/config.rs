//! Rule configuration, loadable from TOML.
//!
//! Board dimensions and the spawn point are compile-time constants; only the
//! scoring and dealing rules are tunable.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{BOARD_SIZE, CELL_SCORE, CLEAR_THRESHOLD, DEFAULT_COLOR_COUNT};

/// Tunable rules for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum connected group size that gets removed.
    pub clear_threshold: usize,
    /// Points per removed cell before the chain multiplier.
    pub cell_score: u32,
    /// How many palette colors the piece queue deals.
    pub color_count: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clear_threshold: CLEAR_THRESHOLD,
            cell_score: CELL_SCORE,
            color_count: DEFAULT_COLOR_COUNT,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document and validate it. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clear_threshold < 2 || self.clear_threshold > BOARD_SIZE {
            return Err(ConfigError::threshold_out_of_range(self.clear_threshold));
        }
        if self.cell_score == 0 {
            return Err(ConfigError::Validation("cell_score must be > 0".into()));
        }
        let max_colors = crate::types::Color::PALETTE.len() as u8;
        if self.color_count == 0 || self.color_count > max_colors {
            return Err(ConfigError::Validation(format!(
                "color_count must be within 1..={max_colors} (got {})",
                self.color_count
            )));
        }
        Ok(())
    }
}
