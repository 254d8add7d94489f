//! Game outcome and win detection.
//!
//! `WinDetector` is queried after every completed turn and reduces the board
//! to an `Outcome`: the earliest completed run wins, a full board without one
//! is a tie.

pub mod outcome;
pub mod win;

pub use outcome::Outcome;
pub use win::{Direction, Line, WinDetector, WinningRun};
