//! Error types for the engine core.

use puyo_engine_types::BOARD_SIZE;

/// Contract violations and rejected session operations.
///
/// Rejected moves and rotations are not errors; they surface as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i8, y: i8 },

    #[error("session is over; reset before playing again")]
    GameOver,

    #[error("no active piece")]
    NoActivePiece,
}

/// Errors that can occur when loading rule configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub(crate) fn threshold_out_of_range(value: usize) -> Self {
        ConfigError::Validation(format!(
            "clear_threshold must be within 2..={BOARD_SIZE} (got {value})"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = EngineError::OutOfBounds { x: 6, y: -1 };
        assert_eq!(err.to_string(), "cell (6, -1) is outside the board");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("cell_score must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: cell_score must be > 0"
        );
        assert_eq!(
            ConfigError::threshold_out_of_range(1).to_string(),
            "config validation error: clear_threshold must be within 2..=72 (got 1)"
        );
    }
}
