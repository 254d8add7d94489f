//! Game state: the board plus everything needed to continue play.
//!
//! ## GameState
//!
//! - Configuration the game was started with
//! - Board (turn numbers, `0` = empty)
//! - Quantum set (turn numbers still in superposition)
//! - Turn counter (the turn number the next placement will use)
//! - Pending first half of a quantum move, if any
//! - Outcome of the last completed turn
//!
//! The state is a plain value with a single writer, `Game`. Embeddings can
//! clone or serialize it freely.

use serde::{Deserialize, Serialize};

use crate::board::{Board, EMPTY};
use crate::core::{ConfigError, GameConfig, PlayerId, TurnNumber};
use crate::quantum::QuantumSet;
use crate::rules::Outcome;

/// First half of a quantum move, waiting for its second column.
///
/// The half sits in the top row of `column` and has not been compacted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingQuantumMove {
    pub column: usize,
    pub turn: TurnNumber,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) quantum: QuantumSet,
    pub(crate) turn: TurnNumber,
    pub(crate) pending: Option<PendingQuantumMove>,
    pub(crate) outcome: Outcome,
}

impl GameState {
    /// Create a fresh state: empty board, no superpositions, turn 1.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            board: Board::new(config.width, config.height),
            quantum: QuantumSet::new(),
            turn: 1,
            pending: None,
            outcome: Outcome::NoWinnerYet,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn quantum(&self) -> &QuantumSet {
        &self.quantum
    }

    /// Turn number the next placement will use.
    #[must_use]
    pub fn turn_number(&self) -> TurnNumber {
        self.turn
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingQuantumMove> {
        self.pending
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Player who owns the next turn number.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::owner_of(self.turn, self.config.player_count)
    }

    /// True if `value` is a piece still in superposition, including the
    /// first half of a pending quantum move.
    #[must_use]
    pub fn is_quantum(&self, value: TurnNumber) -> bool {
        value != EMPTY
            && (self.quantum.contains(value) || self.pending.is_some_and(|p| p.turn == value))
    }

    /// Owner of the piece at `(row, column)`; `None` if empty or quantum.
    #[must_use]
    pub fn owner_at(&self, row: usize, column: usize) -> Option<PlayerId> {
        let value = self.board.get(row, column);
        if self.is_quantum(value) {
            return None;
        }
        self.board.owner_of(row, column, self.config.player_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(GameConfig::default()).unwrap();

        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.board().piece_count(), 0);
        assert!(state.quantum().is_empty());
        assert_eq!(state.pending(), None);
        assert_eq!(state.outcome(), Outcome::NoWinnerYet);
        assert_eq!(state.player_count(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GameState::new(GameConfig::default().with_size(0, 6));
        assert!(matches!(result, Err(ConfigError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_current_player_follows_turn() {
        let mut state = GameState::new(GameConfig::default().with_player_count(3)).unwrap();
        assert_eq!(state.current_player(), PlayerId::new(1));
        state.turn = 3;
        assert_eq!(state.current_player(), PlayerId::new(0));
    }

    #[test]
    fn test_is_quantum_includes_pending_half() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        state.quantum.insert(2);
        state.pending = Some(PendingQuantumMove { column: 0, turn: 5 });

        assert!(state.is_quantum(2));
        assert!(state.is_quantum(5));
        assert!(!state.is_quantum(3));
        assert!(!state.is_quantum(EMPTY));
    }

    #[test]
    fn test_owner_at_hides_quantum() {
        let mut state = GameState::new(GameConfig::new(2, 1, 2, 1)).unwrap();
        state.board.set(0, 0, 3);
        state.board.set(0, 1, 4);
        state.quantum.insert(4);

        assert_eq!(state.owner_at(0, 0), Some(PlayerId::new(1)));
        assert_eq!(state.owner_at(0, 1), None);
    }

    #[test]
    fn test_state_serde() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        state.board.set(5, 3, 1);
        state.turn = 2;

        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
