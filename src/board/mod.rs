//! Board storage and gravity.
//!
//! - `Board`: the grid of turn numbers, placement into a column's top row
//! - `GravityEngine`: column compaction, run after placements and collapses

pub mod grid;
pub mod gravity;

pub use grid::{Board, Position, EMPTY};
pub use gravity::GravityEngine;
