//! Game configuration.
//!
//! The configuration record is supplied by an external loader (any serde
//! format works). The engine only validates it.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of columns.
    pub width: usize,

    /// Number of rows. Row 0 is the top row.
    pub height: usize,

    /// Number of players (1-255).
    pub player_count: usize,

    /// Length of a same-owner line needed to win.
    pub required_run_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 6,
            player_count: 2,
            required_run_length: 4,
        }
    }
}

impl GameConfig {
    /// Create a new game configuration.
    #[must_use]
    pub fn new(width: usize, height: usize, player_count: usize, required_run_length: usize) -> Self {
        Self {
            width,
            height,
            player_count,
            required_run_length,
        }
    }

    /// Set the board dimensions.
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of players.
    #[must_use]
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Set the run length needed to win.
    #[must_use]
    pub fn with_run_length(mut self, required_run_length: usize) -> Self {
        self.required_run_length = required_run_length;
        self
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check that a game can be started with this configuration.
    ///
    /// A run length that cannot fit on the board is accepted, since the game
    /// still ends in a tie, but it is logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("player_count", self.player_count),
            ("required_run_length", self.required_run_length),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(ConfigError::InvalidConfiguration(format!("{name} must be > 0")));
            }
        }

        if self.player_count > 255 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "player_count must be <= 255, got {}",
                self.player_count
            )));
        }

        if self.required_run_length > self.width.min(self.height) {
            log::warn!(
                "required run length {} exceeds min(width, height) = {}",
                self.required_run_length,
                self.width.min(self.height)
            );
        }

        Ok(())
    }
}
