/*
game.rs

Copyright 2025 Hervé Quatremain

This file is part of Net Puzzles.

Net Puzzles is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Net Puzzles is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Net Puzzles. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Manage the status of a game in progress.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::draw;
use crate::generator::{self, Puzzle};
use crate::generator::params::{NetParams, ParamsError};
use crate::history::History;
use crate::moves::{self, Move};
use crate::player_input::{self, Button};
use crate::solver::ActiveMap;
use crate::state::NetState;
use crate::topology::DirSet;

/// Everything needed to generate a puzzle again.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Descriptor {
    pub params: NetParams,
    pub seed: u64,
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} barriers {} seed {}",
            self.params.name(),
            self.params.barrier_probability,
            self.seed
        )
    }
}

/// Error returned when a saved history does not belong to the puzzle it is restored with.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryMismatch;

impl fmt::Display for HistoryMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "The saved game does not match its puzzle")
    }
}

impl Error for HistoryMismatch {}

/// Manage the status of the game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    /// Puzzle parameters and seed.
    descriptor: Descriptor,

    /// Unshuffled connection masks.
    solution: Vec<DirSet>,

    /// Current position with the undo and redo lists.
    history: History,

    /// Whether the player asked for the solution.
    pub user_has_cheated: bool,
}

impl Game {
    /// Generate the puzzle and start a game.
    ///
    /// # Errors
    ///
    /// The function returns an error when the parameters are invalid.
    pub fn new(params: NetParams, seed: u64) -> Result<Self, ParamsError> {
        let puzzle: Puzzle = generator::new_puzzle(&params, seed)?;
        Ok(Self {
            descriptor: Descriptor { params, seed },
            solution: puzzle.solution,
            history: History::new(puzzle.state),
            user_has_cheated: false,
        })
    }

    /// Start a game for the puzzle identified by the descriptor.
    pub fn from_descriptor(descriptor: &Descriptor) -> Result<Self, ParamsError> {
        Self::new(descriptor.params, descriptor.seed)
    }

    /// Rebuild a game from its descriptor and a saved history.
    ///
    /// The puzzle is generated again to retrieve the solution, and its starting position must
    /// be the one recorded in the history. Every snapshot must have the grid and the barriers
    /// of the generated puzzle.
    pub fn with_history(
        descriptor: &Descriptor,
        mut history: History,
    ) -> Result<Self, Box<dyn Error>> {
        let mut game: Game = Self::from_descriptor(descriptor)?;
        let expected: &NetState = game.history.initial();
        let consistent: bool = history.snapshots().all(|s| {
            s.grid() == expected.grid()
                && s.tiles().len() == expected.tiles().len()
                && s.barriers() == expected.barriers()
        });
        if !consistent {
            debug!("Saved snapshots do not fit the {descriptor} grid");
            return Err(Box::new(HistoryMismatch));
        }
        history.refresh_active();
        if history.initial() != game.history.initial() {
            return Err(Box::new(HistoryMismatch));
        }
        game.history = history;
        debug!("Game {descriptor} restored");
        Ok(game)
    }

    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    pub fn params(&self) -> &NetParams {
        &self.descriptor.params
    }

    pub fn seed(&self) -> u64 {
        self.descriptor.seed
    }

    pub fn solution(&self) -> &[DirSet] {
        &self.solution
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current position.
    pub fn state(&self) -> &NetState {
        self.history.current()
    }

    /// Process a mouse click. Return whether the position changed.
    pub fn click(&mut self, px: i32, py: i32, button: Button) -> bool {
        match player_input::interpret_click(self.state(), px, py, button) {
            Some(mv) => self.apply(mv),
            None => false,
        }
    }

    /// Play a move. Return whether the position changed.
    pub fn apply(&mut self, mv: Move) -> bool {
        match moves::make_move(self.state(), mv) {
            Some(state) => {
                self.history.push(state);
                true
            }
            None => false,
        }
    }

    /// Undo the last move. Return `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    /// Redo the last undone move. Return `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    /// Go back to the starting position.
    pub fn restart(&mut self) {
        self.history.restart();
    }

    /// Turn every tile to its solution. The solution can be undone.
    pub fn solve(&mut self) -> bool {
        let Some(state) = moves::solve(self.state(), &self.solution) else {
            return false;
        };
        debug!("Solving game {}", self.descriptor);
        self.user_has_cheated = true;
        self.history.push(state);
        true
    }

    /// Whether the current position is marked completed.
    pub fn is_completed(&self) -> bool {
        self.state().completed
    }

    /// Number of tiles connected to the center.
    pub fn active_count(&self) -> usize {
        let active: ActiveMap = self.state().compute_active();
        active.count()
    }

    /// Status bar text for the current position.
    pub fn status_text(&self) -> String {
        let active: ActiveMap = self.state().compute_active();
        draw::status_text(self.state(), &active)
    }
}
