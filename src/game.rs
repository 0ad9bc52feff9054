use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use tracing::{info, trace};

use crate::board::Board;
use crate::cell::Cell;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_finished(self) -> bool {
        matches!(self, Outcome::Won | Outcome::Lost)
    }
}

/// A player input, addressed by raw `(row, col)` coordinates that have not
/// been checked against the board yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal(i32, i32),
    ToggleFlag(i32, i32),
}

/// A board plus the flag bookkeeping and outcome of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    flags_placed: usize,
    flags_on_mines: usize,
    outcome: Outcome,
}

impl GameState {
    /// Starts a game on a random board. Without a seed the generator is seeded
    /// from the operating system.
    pub fn new(width: usize, height: usize, num_mines: usize, seed: Option<u64>) -> Result<GameState> {
        let mut rng = match seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };
        let board = Board::new(width, height, num_mines, &mut rng)?;
        Ok(GameState::from_board(board))
    }

    pub fn from_board(board: Board) -> GameState {
        GameState {
            board,
            flags_placed: 0,
            flags_on_mines: 0,
            outcome: Outcome::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, row: i32, col: i32) -> Option<&Cell> {
        self.board
            .point_at(row, col)
            .and_then(|point| self.board.get(&point))
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn flags_placed(&self) -> usize {
        self.flags_placed
    }

    pub fn flags_on_mines(&self) -> usize {
        self.flags_on_mines
    }

    pub fn num_mines(&self) -> usize {
        self.board.num_mines()
    }

    /// Mine counter for display; negative once more flags than mines are down.
    pub fn remaining_mines(&self) -> i64 {
        self.num_mines() as i64 - self.flags_placed as i64
    }

    pub fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::Reveal(row, col) => self.reveal(row, col),
            Action::ToggleFlag(row, col) => self.toggle_flag(row, col),
        }
    }

    /// Uncovers a cell. Flagged and already revealed cells, clicks off the
    /// board and clicks after the game ended are ignored.
    pub fn reveal(&mut self, row: i32, col: i32) -> Outcome {
        if self.is_finished() {
            trace!(row, col, "reveal after game end ignored");
            return self.outcome;
        }
        let point = match self.board.point_at(row, col) {
            Some(point) => point,
            None => {
                trace!(row, col, "reveal outside board ignored");
                return self.outcome;
            }
        };

        let cell = self.board.cell(&point);
        if cell.is_flagged() || cell.is_revealed() {
            return self.outcome;
        }
        let has_mine = cell.has_mine();

        let revealed = self.board.reveal_flood_from(&point);
        trace!(%point, revealed, "cells revealed");
        if has_mine {
            self.outcome = Outcome::Lost;
            self.board.reveal_mines();
            info!(%point, "mine revealed, game lost");
        }
        self.outcome
    }

    /// Places or removes a flag on a covered cell, then checks for a win:
    /// every mine flagged and no flag anywhere else.
    pub fn toggle_flag(&mut self, row: i32, col: i32) -> Outcome {
        if self.is_finished() {
            trace!(row, col, "flag after game end ignored");
            return self.outcome;
        }
        let point = match self.board.point_at(row, col) {
            Some(point) => point,
            None => {
                trace!(row, col, "flag outside board ignored");
                return self.outcome;
            }
        };

        let cell = self.board.retrieve_cell_mutable(&point);
        if cell.revealed {
            return self.outcome;
        }
        cell.flagged = !cell.flagged;
        let (flagged, has_mine) = (cell.flagged, cell.has_mine);

        if flagged {
            self.flags_placed += 1;
            if has_mine {
                self.flags_on_mines += 1;
            }
        } else {
            self.flags_placed -= 1;
            if has_mine {
                self.flags_on_mines -= 1;
            }
        }

        let num_mines = self.board.num_mines();
        if self.flags_on_mines == num_mines && self.flags_placed == num_mines {
            self.outcome = Outcome::Won;
            self.board.reveal_all();
            info!(flags = self.flags_placed, "all mines flagged, game won");
        }
        self.outcome
    }
}
