//! The game controller and its state.
//!
//! This is the surface a presentation layer talks to: start a game, attempt
//! moves, read the board back for rendering.

pub mod state;
pub mod controller;

pub use state::{GameState, PendingQuantumMove};
pub use controller::Game;
