//! Win detection.
//!
//! Every maximal line (rows, columns, both diagonal directions) at least
//! `required_run_length` long is scanned once. Only classical pieces count:
//! an empty cell or a superposed piece breaks a run.
//!
//! Because collapses can complete several runs on one turn, runs are ranked
//! by when they were completed: the largest turn number a run holds at the
//! moment it first reaches the required length. The run completed earliest
//! wins.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, Position, EMPTY};
use crate::core::{GameConfig, PlayerId, TurnNumber};
use crate::quantum::QuantumSet;

use super::Outcome;

/// Direction a line runs in, from its start cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Down and to the right.
    Diagonal,
    /// Down and to the left.
    AntiDiagonal,
}

impl Direction {
    /// Row and column step.
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// A maximal straight line of cells across the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub start: Position,
    pub direction: Direction,
    pub len: usize,
}

impl Line {
    /// Cells of the line, from its start.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let (dr, dc) = self.direction.step();
        (0..self.len as isize).map(move |i| {
            Position::new(
                (self.start.row as isize + dr * i) as usize,
                (self.start.column as isize + dc * i) as usize,
            )
        })
    }

    /// Every maximal line of a `width x height` board with at least
    /// `min_len` cells. Each diagonal appears once per direction.
    #[must_use]
    pub fn all(width: usize, height: usize, min_len: usize) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut push = |row: usize, column: usize, direction: Direction, len: usize| {
            if len >= min_len && len > 0 {
                lines.push(Line {
                    start: Position::new(row, column),
                    direction,
                    len,
                });
            }
        };

        for row in 0..height {
            push(row, 0, Direction::Horizontal, width);
        }
        for column in 0..width {
            push(0, column, Direction::Vertical, height);
        }

        // Diagonals start on the top edge, or on the left (right) edge below it.
        for column in 0..width {
            push(0, column, Direction::Diagonal, height.min(width - column));
            push(0, column, Direction::AntiDiagonal, height.min(column + 1));
        }
        for row in 1..height {
            push(row, 0, Direction::Diagonal, (height - row).min(width));
            if width > 0 {
                push(row, width - 1, Direction::AntiDiagonal, (height - row).min(width));
            }
        }

        lines
    }
}

/// A completed run of the required length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningRun {
    pub player: PlayerId,
    /// Largest turn number in the run: the move that completed it.
    pub completed_at: TurnNumber,
    pub cells: SmallVec<[Position; 4]>,
}

/// Scans the board for completed runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinDetector {
    required_run_length: usize,
    player_count: usize,
}

impl WinDetector {
    #[must_use]
    pub fn new(required_run_length: usize, player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        Self {
            required_run_length,
            player_count,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.required_run_length, config.player_count)
    }

    /// Decide the game: earliest completed run, else tie on a full board.
    #[must_use]
    pub fn check_win(&self, board: &Board, quantum: &QuantumSet) -> Outcome {
        if let Some(run) = self.earliest_run(board, quantum) {
            Outcome::Winner(run.player)
        } else if board.is_full() {
            Outcome::Tie
        } else {
            Outcome::NoWinnerYet
        }
    }

    /// The completed run with the smallest completing turn, if any.
    #[must_use]
    pub fn earliest_run(&self, board: &Board, quantum: &QuantumSet) -> Option<WinningRun> {
        if self.required_run_length == 0 {
            return None;
        }

        let mut best: Option<WinningRun> = None;
        for line in Line::all(board.width(), board.height(), self.required_run_length) {
            if let Some(run) = self.scan_line(board, quantum, &line) {
                if best.as_ref().map_or(true, |b| run.completed_at < b.completed_at) {
                    best = Some(run);
                }
            }
        }
        best
    }

    /// Owner of a cell if it holds a classical piece.
    fn contributor(&self, value: TurnNumber, quantum: &QuantumSet) -> Option<PlayerId> {
        if value == EMPTY || quantum.contains(value) {
            None
        } else {
            Some(PlayerId::owner_of(value, self.player_count))
        }
    }

    /// Earliest-completed run along one line.
    ///
    /// A run is scored once, when it first reaches the required length, at
    /// the largest turn number it holds at that point. Cells added later do
    /// not change its score.
    fn scan_line(&self, board: &Board, quantum: &QuantumSet, line: &Line) -> Option<WinningRun> {
        let required = self.required_run_length;
        let cells: SmallVec<[Position; 16]> = line.cells().collect();

        let mut best: Option<WinningRun> = None;
        let mut run_owner: Option<PlayerId> = None;
        let mut run_start = 0;
        let mut run_max = EMPTY;

        for (i, &pos) in cells.iter().enumerate() {
            let value = board.at(pos);
            match self.contributor(value, quantum) {
                None => {
                    run_owner = None;
                    continue;
                }
                Some(player) if run_owner == Some(player) => {
                    run_max = run_max.max(value);
                }
                Some(player) => {
                    run_owner = Some(player);
                    run_start = i;
                    run_max = value;
                }
            }

            if i + 1 - run_start != required {
                continue;
            }

            if best.as_ref().map_or(true, |b| run_max < b.completed_at) {
                best = run_owner.map(|player| WinningRun {
                    player,
                    completed_at: run_max,
                    cells: cells[run_start..=i].iter().copied().collect(),
                });
            }
        }

        best
    }
}
