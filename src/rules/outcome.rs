//! Result of a win check.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// State of the game after a completed turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Nobody has completed a run and the board still has room.
    #[default]
    NoWinnerYet,
    /// Board is full and nobody completed a run.
    Tie,
    /// The player whose run was completed earliest.
    Winner(PlayerId),
}

impl Outcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, Outcome::Winner(p) if *p == player)
    }

    /// The winning player, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Winner(p) => Some(*p),
            _ => None,
        }
    }

    /// True once no further moves are accepted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::NoWinnerYet)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::NoWinnerYet => write!(f, "in progress"),
            Outcome::Tie => write!(f, "tie"),
            Outcome::Winner(p) => write!(f, "{p} wins"),
        }
    }
}
