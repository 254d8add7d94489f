//! Core engine types: players, turn numbers, configuration, RNG, errors.
//!
//! Everything else in the crate builds on these; none of them know about
//! the board or quantum rules.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, TurnNumber};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use config::GameConfig;
pub use error::{ConfigError, MoveError};
