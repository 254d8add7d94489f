//! The board grid and piece bookkeeping.
//!
//! Cells hold turn numbers (`0` = empty). Row 0 is the top row, so a
//! placement lands in row 0 and gravity moves it down afterwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{MoveError, PlayerId, TurnNumber};

/// Value of an empty cell.
pub const EMPTY: TurnNumber = 0;

/// A cell coordinate. Row 0 is the top row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(row {}, column {})", self.row, self.column)
    }
}

/// Fixed `width x height` grid of turn numbers, stored row-major.
///
/// The board is pure storage: it never applies gravity and never decides
/// whether a piece is quantum. See `GravityEngine` and `QuantumSet`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<TurnNumber>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Build a board from rows, top row first.
    ///
    /// Panics if the rows are ragged.
    ///
    /// ```
    /// use quantum_connect::board::Board;
    ///
    /// let board = Board::from_rows(&[
    ///     &[0, 0, 0],
    ///     &[0, 3, 0],
    ///     &[1, 2, 0],
    /// ]);
    /// assert_eq!(board.get(2, 1), 2);
    /// assert!(board.can_place(1));
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[&[TurnNumber]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == width),
            "All rows must have the same width"
        );

        Self {
            width,
            height,
            cells: rows.iter().flat_map(|r| r.iter().copied()).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.height && column < self.width);
        row * self.width + column
    }

    /// Check that `column` is inside `[0, width)`.
    #[must_use]
    pub fn contains_column(&self, column: usize) -> bool {
        column < self.width
    }

    /// Cell value at `(row, column)`.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> TurnNumber {
        self.cells[self.index(row, column)]
    }

    /// Cell value at `pos`.
    #[must_use]
    pub fn at(&self, pos: Position) -> TurnNumber {
        self.get(pos.row, pos.column)
    }

    /// Overwrite a cell.
    pub fn set(&mut self, row: usize, column: usize, value: TurnNumber) {
        let idx = self.index(row, column);
        self.cells[idx] = value;
    }

    /// Rows as slices, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[TurnNumber]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// Values in a column, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = TurnNumber> + '_ {
        (0..self.height).map(move |row| self.get(row, column))
    }

    /// Every non-empty cell with its value, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, TurnNumber)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != EMPTY)
            .map(move |(i, &v)| (Position::new(i / width, i % width), v))
    }

    /// All cells holding `turn`. A quantum pair yields two positions.
    #[must_use]
    pub fn positions_of(&self, turn: TurnNumber) -> SmallVec<[Position; 2]> {
        self.pieces()
            .filter(|&(_, v)| v == turn)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }

    /// Number of empty cells in a column.
    #[must_use]
    pub fn empty_in_column(&self, column: usize) -> usize {
        self.column(column).filter(|&v| v == EMPTY).count()
    }

    /// True iff no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != EMPTY)
    }

    /// Clear every cell.
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Owner of a cell under the turn-number convention.
    ///
    /// Returns `None` for empty cells. Callers must check quantum status
    /// themselves: a superposed piece has no owner.
    #[must_use]
    pub fn owner_of(&self, row: usize, column: usize, player_count: usize) -> Option<PlayerId> {
        match self.get(row, column) {
            EMPTY => None,
            turn => Some(PlayerId::owner_of(turn, player_count)),
        }
    }

    // === Placement ===

    /// True iff `column` exists and its topmost cell is empty.
    #[must_use]
    pub fn can_place(&self, column: usize) -> bool {
        self.contains_column(column) && self.height > 0 && self.get(0, column) == EMPTY
    }

    fn check_placement(&self, column: usize) -> Result<(), MoveError> {
        if !self.contains_column(column) {
            return Err(MoveError::InvalidColumnIndex {
                column,
                width: self.width,
            });
        }
        if !self.can_place(column) {
            return Err(MoveError::ColumnFull { column });
        }
        Ok(())
    }

    /// Write a classical piece into the top row of `column`.
    ///
    /// Gravity is not applied. Fails without touching the board if the
    /// column is out of range or full.
    pub fn place_classical(&mut self, column: usize, turn: TurnNumber) -> Result<(), MoveError> {
        self.check_placement(column)?;
        self.set(0, column, turn);
        Ok(())
    }

    /// Write one half of a quantum pair into the top row of `column`.
    ///
    /// Identical to `place_classical` on the grid; registering the pair in
    /// the quantum set is the caller's job.
    pub fn place_quantum_half(&mut self, column: usize, turn: TurnNumber) -> Result<(), MoveError> {
        self.check_placement(column)?;
        self.set(0, column, turn);
        Ok(())
    }
}
