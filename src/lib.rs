//! # quantum-connect
//!
//! Rules engine for a connection game with quantum pieces.
//!
//! Besides ordinary pieces, a player may drop an entangled pair: one turn
//! number occupying two candidate columns at once. The pair stays in
//! superposition until it is observed, then collapses at random to one cell.
//!
//! ## Design Principles
//!
//! 1. **Single writer**: `Game` owns the `GameState` and processes each move
//!    to completion. There is no ambient state.
//!
//! 2. **Injected randomness**: collapse is the only random step and goes
//!    through the `RandomSource` trait. A seeded `GameRng` makes every game
//!    replayable.
//!
//! 3. **N-Player**: owners are derived from turn numbers modulo
//!    `player_count`; nothing assumes two players.
//!
//! ## Modules
//!
//! - `core`: player ids, turn numbers, configuration, RNG, errors
//! - `board`: the grid and gravity
//! - `quantum`: superposition bookkeeping and forced collapse
//! - `rules`: outcome and win detection
//! - `game`: the move controller
//!
//! ## Example
//!
//! ```
//! use quantum_connect::{Game, GameConfig, Outcome, PlayerId};
//!
//! let mut game = Game::with_seed(GameConfig::default(), 42).unwrap();
//!
//! // Player 1 (odd turns) plays column 0, player 0 (even turns) column 3.
//! for _ in 0..3 {
//!     game.attempt_classical_move(0).unwrap();
//!     game.attempt_classical_move(3).unwrap();
//! }
//! game.attempt_classical_move(1).unwrap();
//! let outcome = game.attempt_classical_move(3).unwrap();
//!
//! assert_eq!(outcome, Outcome::Winner(PlayerId::new(0)));
//! ```

pub mod core;
pub mod board;
pub mod quantum;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, TurnNumber,
    GameConfig,
    GameRng, GameRngState, RandomSource,
    ConfigError, MoveError,
};

pub use crate::board::{Board, GravityEngine, Position, EMPTY};

pub use crate::quantum::{Collapse, ForcedMeasurement, MeasurementReason, QuantumEngine, QuantumSet};

pub use crate::rules::{Outcome, WinDetector, WinningRun};

pub use crate::game::{Game, GameState, PendingQuantumMove};
