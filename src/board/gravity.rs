//! Column compaction.

use crate::core::TurnNumber;

use super::grid::{Board, EMPTY};

/// Pulls pieces down so no empty cell sits below a piece.
pub struct GravityEngine;

impl GravityEngine {
    /// Compact one column, keeping the relative order of its pieces.
    ///
    /// Returns true if any cell changed. Idempotent.
    pub fn apply_column(board: &mut Board, column: usize) -> bool {
        let height = board.height();
        let pieces: Vec<TurnNumber> = board.column(column).filter(|&v| v != EMPTY).collect();
        let gap = height - pieces.len();

        let mut changed = false;
        for row in 0..height {
            let value = if row < gap { EMPTY } else { pieces[row - gap] };
            if board.get(row, column) != value {
                board.set(row, column, value);
                changed = true;
            }
        }
        changed
    }

    /// Compact every column. Returns true if any cell changed.
    pub fn apply_all(board: &mut Board) -> bool {
        let mut changed = false;
        for column in 0..board.width() {
            changed |= Self::apply_column(board, column);
        }
        changed
    }

    /// True iff no empty cell lies below a piece in `column`.
    #[must_use]
    pub fn is_compact(board: &Board, column: usize) -> bool {
        board
            .column(column)
            .skip_while(|&v| v == EMPTY)
            .all(|v| v != EMPTY)
    }
}
