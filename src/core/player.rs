//! Player identification and turn ownership.
//!
//! ## TurnNumber
//!
//! Every placement event consumes one turn number. Turn numbers start at 1,
//! are globally unique, and double as cell values on the board (`0` is empty).
//!
//! ## PlayerId
//!
//! Players are never stored on the board. The owner of a classical piece is
//! derived from its turn number: `turn % player_count`.

use serde::{Deserialize, Serialize};

/// Turn number of a placement event. `0` is reserved for "empty".
pub type TurnNumber = u32;

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Owner of a piece placed at `turn` in a game with `player_count` players.
    ///
    /// ```
    /// use quantum_connect::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::owner_of(1, 2), PlayerId::new(1));
    /// assert_eq!(PlayerId::owner_of(8, 2), PlayerId::new(0));
    /// assert_eq!(PlayerId::owner_of(7, 3), PlayerId::new(1));
    /// ```
    #[must_use]
    pub const fn owner_of(turn: TurnNumber, player_count: usize) -> Self {
        Self((turn as usize % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
