//! Forced measurement and collapse.
//!
//! A superposed piece must collapse as soon as its state becomes observable:
//!
//! - **Covered**: a classical piece sits anywhere above it in its column.
//! - **Self-stacked**: both halves of one pair ended up in the same column.
//!
//! `QuantumEngine::resolve_all` runs detection and collapse to a fixed point,
//! compacting the touched columns after each collapse so the next scan sees
//! the cascaded board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, GravityEngine, Position, EMPTY};
use crate::core::{RandomSource, TurnNumber};

use super::QuantumSet;

/// Why a superposition had to be measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementReason {
    /// A classical piece lies above the quantum piece.
    Covered,
    /// Both halves of the pair share the column.
    SelfStacked,
}

/// A quantum piece that must collapse before play can continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForcedMeasurement {
    /// Column that was scanned.
    pub column: usize,
    /// Row of the quantum piece that triggered the measurement.
    pub row: usize,
    /// Turn number of the pair to collapse.
    pub turn: TurnNumber,
    pub reason: MeasurementReason,
}

/// Result of one collapse. Positions are as they were before gravity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Collapse {
    pub turn: TurnNumber,
    /// Cell that keeps the piece, which is now classical.
    pub survivor: Position,
    /// Cell that reverted to empty.
    pub vanished: Position,
}

/// Detects and performs forced collapses.
pub struct QuantumEngine;

impl QuantumEngine {
    /// Scan `column` top to bottom for a quantum piece that must collapse.
    ///
    /// Expects the column to be compacted. Reports the shallowest quantum
    /// piece that has a classical piece above it, or the lower half of a
    /// pair whose two halves both sit in this column, whichever is met first.
    ///
    /// The halves of a self-stacked pair need not touch: any two cells of
    /// one turn in the same column count, even with other quantum pieces
    /// between them. In play the halves always end up adjacent.
    #[must_use]
    pub fn scan_column_for_forced_measurement(
        board: &Board,
        quantum: &QuantumSet,
        column: usize,
    ) -> Option<ForcedMeasurement> {
        let mut shallowest_classical: Option<usize> = None;
        let mut seen_quantum: SmallVec<[TurnNumber; 4]> = SmallVec::new();

        for (row, turn) in board.column(column).enumerate() {
            if turn == EMPTY {
                continue;
            }

            if !quantum.contains(turn) {
                shallowest_classical.get_or_insert(row);
                continue;
            }

            let reason = if shallowest_classical.is_some() {
                MeasurementReason::Covered
            } else if seen_quantum.contains(&turn) {
                MeasurementReason::SelfStacked
            } else {
                seen_quantum.push(turn);
                continue;
            };

            log::trace!("column {column}: turn {turn} at row {row} forced ({reason:?})");
            return Some(ForcedMeasurement {
                column,
                row,
                turn,
                reason,
            });
        }

        None
    }

    /// Collapse the superposition of `turn`.
    ///
    /// One of its two cells is chosen by `rng` to survive; the other is
    /// emptied and `turn` leaves the quantum set. No gravity is applied.
    ///
    /// # Panics
    ///
    /// Panics if `turn` is not superposed or does not occupy exactly two
    /// cells. Both mean the board and quantum set have diverged.
    pub fn collapse<R: RandomSource + ?Sized>(
        board: &mut Board,
        quantum: &mut QuantumSet,
        turn: TurnNumber,
        rng: &mut R,
    ) -> Collapse {
        assert!(quantum.contains(turn), "turn {turn} is not in superposition");

        let cells = board.positions_of(turn);
        assert_eq!(
            cells.len(),
            2,
            "quantum turn {turn} occupies {} cells, expected 2",
            cells.len()
        );

        let pick = rng.choose_survivor(cells.len());
        assert!(pick < cells.len(), "random source picked survivor {pick} of {}", cells.len());

        let survivor = cells[pick];
        let vanished = cells[1 - pick];
        board.set(vanished.row, vanished.column, EMPTY);
        quantum.remove(turn);

        log::debug!("turn {turn} collapsed to {survivor}, {vanished} emptied");
        Collapse {
            turn,
            survivor,
            vanished,
        }
    }

    /// Perform forced collapses until no column needs one.
    ///
    /// Columns are scanned starting at `start_column`, wrapping around. After
    /// each collapse both affected columns are compacted and the scan
    /// restarts. Every collapse removes a turn from `quantum`, so the loop
    /// runs at most `quantum.len()` times.
    pub fn resolve_all<R: RandomSource + ?Sized>(
        board: &mut Board,
        quantum: &mut QuantumSet,
        start_column: usize,
        rng: &mut R,
    ) -> Vec<Collapse> {
        let width = board.width();
        let mut collapses = Vec::new();
        if width == 0 {
            return collapses;
        }

        loop {
            let forced = (0..width)
                .map(|offset| (start_column + offset) % width)
                .find_map(|column| Self::scan_column_for_forced_measurement(board, quantum, column));

            let Some(forced) = forced else {
                break;
            };

            let live = quantum.len();
            let collapse = Self::collapse(board, quantum, forced.turn, rng);
            debug_assert!(
                quantum.len() < live,
                "collapse of turn {} left the quantum set at {live}",
                collapse.turn
            );
            GravityEngine::apply_column(board, collapse.survivor.column);
            GravityEngine::apply_column(board, collapse.vanished.column);
            collapses.push(collapse);
        }

        collapses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of survivor picks.
    struct Scripted(VecDeque<usize>);

    impl Scripted {
        fn new(picks: &[usize]) -> Self {
            Self(picks.iter().copied().collect())
        }
    }

    impl RandomSource for Scripted {
        fn choose_survivor(&mut self, _candidates: usize) -> usize {
            self.0.pop_front().expect("script exhausted")
        }
    }

    fn quantum_of(turns: &[TurnNumber]) -> QuantumSet {
        let mut set = QuantumSet::new();
        for &turn in turns {
            set.insert(turn);
        }
        set
    }

    #[test]
    fn test_uncovered_quantum_is_stable() {
        // Quantum 1 resting on classical 2 in column 0.
        let board = Board::from_rows(&[&[0, 0], &[1, 0], &[2, 1]]);
        let quantum = quantum_of(&[1]);

        assert_eq!(QuantumEngine::scan_column_for_forced_measurement(&board, &quantum, 0), None);
        assert_eq!(QuantumEngine::scan_column_for_forced_measurement(&board, &quantum, 1), None);
    }

    #[test]
    fn test_covered_quantum_is_forced() {
        let board = Board::from_rows(&[&[0, 0], &[2, 0], &[1, 1]]);
        let quantum = quantum_of(&[1]);

        let forced = QuantumEngine::scan_column_for_forced_measurement(&board, &quantum, 0).unwrap();
        assert_eq!(
            forced,
            ForcedMeasurement {
                column: 0,
                row: 2,
                turn: 1,
                reason: MeasurementReason::Covered,
            }
        );
    }

    #[test]
    fn test_shallowest_covered_piece_reported() {
        // Classical 5 over quantum 3 over quantum 1.
        let board = Board::from_rows(&[&[5, 0], &[3, 3], &[1, 1]]);
        let quantum = quantum_of(&[1, 3]);

        let forced = QuantumEngine::scan_column_for_forced_measurement(&board, &quantum, 0).unwrap();
        assert_eq!(forced.turn, 3);
        assert_eq!(forced.row, 1);
    }

    #[test]
    fn test_quantum_on_quantum_is_stable() {
        let board = Board::from_rows(&[&[0, 0], &[3, 3], &[1, 1]]);
        let quantum = quantum_of(&[1, 3]);
        assert_eq!(QuantumEngine::scan_column_for_forced_measurement(&board, &quantum, 0), None);
    }

    #[test]
    fn test_self_stacked_pair_is_forced() {
        let board = Board::from_rows(&[&[0], &[4], &[4], &[1]]);
        let quantum = quantum_of(&[4]);

        let forced = QuantumEngine::scan_column_for_forced_measurement(&board, &quantum, 0).unwrap();
        assert_eq!(forced.reason, MeasurementReason::SelfStacked);
        assert_eq!(forced.row, 2);
        assert_eq!(forced.turn, 4);
    }

    #[test]
    fn test_self_stacked_pair_need_not_touch() {
        // Quantum 7 sits between the two halves of pair 4.
        let board = Board::from_rows(&[&[4, 0], &[7, 0], &[4, 7]]);
        let quantum = quantum_of(&[4, 7]);

        let forced = QuantumEngine::scan_column_for_forced_measurement(&board, &quantum, 0).unwrap();
        assert_eq!(forced.reason, MeasurementReason::SelfStacked);
        assert_eq!(forced.row, 2);
        assert_eq!(forced.turn, 4);
    }

    #[test]
    fn test_collapse_keeps_chosen_cell() {
        let mut board = Board::from_rows(&[&[0, 0, 0], &[1, 0, 1]]);
        let mut quantum = quantum_of(&[1]);

        let collapse = QuantumEngine::collapse(&mut board, &mut quantum, 1, &mut Scripted::new(&[1]));

        assert_eq!(collapse.survivor, Position::new(1, 2));
        assert_eq!(collapse.vanished, Position::new(1, 0));
        assert_eq!(board.get(1, 0), EMPTY);
        assert_eq!(board.get(1, 2), 1);
        assert!(quantum.is_empty());
    }

    #[test]
    #[should_panic(expected = "not in superposition")]
    fn test_collapse_of_classical_turn_panics() {
        let mut board = Board::from_rows(&[&[2, 2]]);
        let mut quantum = QuantumSet::new();
        QuantumEngine::collapse(&mut board, &mut quantum, 2, &mut Scripted::new(&[0]));
    }

    #[test]
    #[should_panic(expected = "expected 2")]
    fn test_collapse_of_malformed_pair_panics() {
        let mut board = Board::from_rows(&[&[2, 0]]);
        let mut quantum = quantum_of(&[2]);
        QuantumEngine::collapse(&mut board, &mut quantum, 2, &mut Scripted::new(&[0]));
    }

    #[test]
    fn test_resolve_all_cascades() {
        // Pair 1 in columns 0 and 1, pair 3 in columns 1 and 2.
        // Classical 4 covers pair 1 in column 0.
        let mut board = Board::from_rows(&[
            &[0, 0, 0],
            &[4, 3, 0],
            &[1, 1, 3],
        ]);
        let mut quantum = quantum_of(&[1, 3]);

        // Pair 1 survives in column 1, under quantum 3: stable.
        let collapses = QuantumEngine::resolve_all(&mut board, &mut quantum, 0, &mut Scripted::new(&[1]));
        assert_eq!(collapses.len(), 1);
        assert_eq!(board.column(0).collect::<Vec<_>>(), vec![0, 0, 4]);
        assert_eq!(quantum.sorted(), vec![3]);

        // Now cover pair 3 in column 2; it survives there, so column 1's
        // copy vanishes and nothing else is covered.
        board.set(1, 2, 6);
        let collapses = QuantumEngine::resolve_all(&mut board, &mut quantum, 2, &mut Scripted::new(&[1]));
        assert_eq!(collapses.len(), 1);
        assert_eq!(collapses[0].turn, 3);
        assert_eq!(board.column(1).collect::<Vec<_>>(), vec![0, 0, 1]);
        assert_eq!(board.column(2).collect::<Vec<_>>(), vec![0, 6, 3]);
        assert!(quantum.is_empty());
    }

    #[test]
    fn test_resolve_all_chain_reaction() {
        // Classical 6 covers pair 1 in column 0, classical 5 covers pair 2 in
        // column 2. Pair 1 stays in column 0, which drops pair 2's other half
        // to the bottom of column 1; pair 2 then stays in column 2.
        let mut board = Board::from_rows(&[
            &[0, 0, 0],
            &[6, 2, 5],
            &[1, 1, 2],
        ]);
        let mut quantum = quantum_of(&[1, 2]);

        let collapses = QuantumEngine::resolve_all(&mut board, &mut quantum, 0, &mut Scripted::new(&[0, 1]));

        assert_eq!(collapses.iter().map(|c| c.turn).collect::<Vec<_>>(), vec![1, 2]);
        assert!(quantum.is_empty());
        assert_eq!(board.column(0).collect::<Vec<_>>(), vec![0, 6, 1]);
        assert_eq!(board.column(1).collect::<Vec<_>>(), vec![0, 0, 0]);
        assert_eq!(board.column(2).collect::<Vec<_>>(), vec![0, 5, 2]);
    }

    #[test]
    fn test_resolve_all_removes_one_turn_per_collapse() {
        // Same cascade as above next to an uncovered pair 9.
        let mut board = Board::from_rows(&[
            &[0, 0, 0, 0, 0],
            &[6, 2, 5, 0, 0],
            &[1, 1, 2, 9, 9],
        ]);
        let mut quantum = quantum_of(&[1, 2, 9]);
        let live = quantum.len();

        let collapses = QuantumEngine::resolve_all(&mut board, &mut quantum, 0, &mut Scripted::new(&[0, 1]));

        assert_eq!(collapses.len(), 2);
        assert_eq!(quantum.len(), live - collapses.len());
        assert_eq!(quantum.sorted(), vec![9]);
        for collapse in &collapses {
            assert_eq!(board.positions_of(collapse.turn).len(), 1);
        }
    }

    #[test]
    fn test_resolve_all_without_work() {
        let mut board = Board::from_rows(&[&[0, 0], &[1, 1]]);
        let mut quantum = quantum_of(&[1]);
        let collapses = QuantumEngine::resolve_all(&mut board, &mut quantum, 1, &mut Scripted::new(&[]));
        assert!(collapses.is_empty());
        assert_eq!(quantum.len(), 1);
    }
}
