//! Error types surfaced to the caller.
//!
//! Move errors are recoverable: the game state is untouched and the same
//! player may choose again. Configuration errors are fatal for `new_game`.

/// Errors from a move attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (board width {width})")]
    InvalidColumnIndex { column: usize, width: usize },

    #[error("a quantum move is waiting for its second column (first half in column {column})")]
    QuantumMovePending { column: usize },

    #[error("no quantum move is waiting for a second column")]
    NoPendingQuantumMove,

    #[error("the game is over")]
    GameOver,
}

/// Errors when starting a game from a configuration record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
