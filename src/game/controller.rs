//! The move controller.
//!
//! `Game` owns the `GameState` and the random source and is the only thing
//! that mutates them. Each move runs to completion before the next one is
//! accepted:
//!
//! 1. placement (rejected moves leave the state untouched)
//! 2. gravity on the placed column(s)
//! 3. forced-measurement resolution, cascading until stable
//! 4. gravity on every column
//! 5. win check
//!
//! A quantum move is split in two calls. Between them the first half sits
//! uncompacted in the top row of its column and `pending_second_quantum_move`
//! is true.

use crate::board::{Board, GravityEngine, EMPTY};
use crate::core::{ConfigError, GameConfig, GameRng, MoveError, PlayerId, RandomSource, TurnNumber};
use crate::quantum::{Collapse, QuantumEngine};
use crate::rules::{Outcome, WinDetector};

use super::state::{GameState, PendingQuantumMove};

/// A running game.
#[derive(Clone, Debug)]
pub struct Game<R = GameRng> {
    state: GameState,
    rng: R,
    last_collapses: Vec<Collapse>,
}

impl Game<GameRng> {
    /// Start a game with a seeded `GameRng`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, GameRng::new(seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// Start a game with an injected random source.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        let state = GameState::new(config)?;
        log::info!(
            "new game: {}x{} board, {} players, run of {}",
            state.config.width,
            state.config.height,
            state.config.player_count,
            state.config.required_run_length
        );

        Ok(Self {
            state,
            rng,
            last_collapses: Vec::new(),
        })
    }

    /// Reinitialize in place, keeping the random source.
    ///
    /// On error the current game is left as it was.
    pub fn new_game(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        self.state = GameState::new(config)?;
        self.last_collapses.clear();
        log::info!("game reset");
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Read-only view of the board for rendering.
    #[must_use]
    pub fn current_board_snapshot(&self) -> &Board {
        &self.state.board
    }

    /// True if a cell value belongs to a piece still in superposition.
    #[must_use]
    pub fn is_quantum(&self, value: TurnNumber) -> bool {
        self.state.is_quantum(value)
    }

    /// Turn number the next placement will use.
    #[must_use]
    pub fn current_turn_number(&self) -> TurnNumber {
        self.state.turn
    }

    /// True strictly between the two halves of a quantum move.
    #[must_use]
    pub fn pending_second_quantum_move(&self) -> bool {
        self.state.pending.is_some()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    /// Collapses performed by the most recent completed move.
    #[must_use]
    pub fn last_collapses(&self) -> &[Collapse] {
        &self.last_collapses
    }

    /// Columns that accept the next placement.
    ///
    /// While a quantum move is pending, the first half's own column is legal
    /// as long as it has a free cell besides the half itself.
    #[must_use]
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }

        let board = &self.state.board;
        (0..board.width())
            .filter(|&column| match self.state.pending {
                Some(p) if p.column == column => board.empty_in_column(column) > 0,
                _ => board.can_place(column),
            })
            .collect()
    }

    // === Moves ===

    fn ensure_in_progress(&self) -> Result<(), MoveError> {
        if self.state.outcome.is_terminal() {
            return Err(MoveError::GameOver);
        }
        Ok(())
    }

    /// Drop a classical piece into `column`.
    pub fn attempt_classical_move(&mut self, column: usize) -> Result<Outcome, MoveError> {
        self.ensure_in_progress()?;
        if let Some(pending) = self.state.pending {
            return Err(MoveError::QuantumMovePending {
                column: pending.column,
            });
        }

        let turn = self.state.turn;
        self.state.board.place_classical(column, turn)?;
        self.state.turn += 1;
        log::debug!("turn {turn}: classical piece in column {column}");

        GravityEngine::apply_column(&mut self.state.board, column);
        Ok(self.finish_move(column))
    }

    /// Place the first half of a quantum pair in `column`.
    pub fn attempt_quantum_move_first_half(&mut self, column: usize) -> Result<(), MoveError> {
        self.ensure_in_progress()?;
        if let Some(pending) = self.state.pending {
            return Err(MoveError::QuantumMovePending {
                column: pending.column,
            });
        }

        let turn = self.state.turn;
        self.state.board.place_quantum_half(column, turn)?;
        self.state.pending = Some(PendingQuantumMove { column, turn });
        log::debug!("turn {turn}: first quantum half in column {column}");
        Ok(())
    }

    /// Place the second half and complete the quantum move.
    ///
    /// Choosing the first half's column makes a self-stacked pair, which
    /// collapses straight away.
    pub fn attempt_quantum_move_second_half(&mut self, column: usize) -> Result<Outcome, MoveError> {
        self.ensure_in_progress()?;
        let pending = self.state.pending.ok_or(MoveError::NoPendingQuantumMove)?;
        let board = &mut self.state.board;

        if !board.contains_column(column) {
            return Err(MoveError::InvalidColumnIndex {
                column,
                width: board.width(),
            });
        }

        if column == pending.column {
            // The first half still blocks the top row; settle it first.
            if board.empty_in_column(column) == 0 {
                return Err(MoveError::ColumnFull { column });
            }
            GravityEngine::apply_column(board, column);
        }

        board.place_quantum_half(column, pending.turn)?;
        self.state.quantum.insert(pending.turn);
        self.state.pending = None;
        self.state.turn += 1;
        log::debug!(
            "turn {}: quantum pair in columns {} and {column}",
            pending.turn,
            pending.column
        );

        GravityEngine::apply_column(&mut self.state.board, pending.column);
        GravityEngine::apply_column(&mut self.state.board, column);
        Ok(self.finish_move(column))
    }

    /// Withdraw a pending first half. No turn number is consumed.
    pub fn cancel_quantum_move(&mut self) -> Result<(), MoveError> {
        let pending = self.state.pending.take().ok_or(MoveError::NoPendingQuantumMove)?;
        debug_assert_eq!(self.state.board.get(0, pending.column), pending.turn);
        self.state.board.set(0, pending.column, EMPTY);
        log::debug!("turn {}: quantum move withdrawn", pending.turn);
        Ok(())
    }

    /// Resolve forced measurements, compact, and decide the game.
    fn finish_move(&mut self, start_column: usize) -> Outcome {
        let state = &mut self.state;
        self.last_collapses =
            QuantumEngine::resolve_all(&mut state.board, &mut state.quantum, start_column, &mut self.rng);
        GravityEngine::apply_all(&mut state.board);

        let outcome = WinDetector::from_config(&state.config).check_win(&state.board, &state.quantum);
        state.outcome = outcome;
        if outcome.is_terminal() {
            log::info!("game over after turn {}: {outcome}", state.turn - 1);
        }
        outcome
    }
}
