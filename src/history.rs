/*
history.rs

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

//! Undo and redo lists.
//!
//! Moves never modify a [`NetState`] snapshot, so the history only has to keep the snapshots
//! themselves: undoing a move is going back to the previous snapshot.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::state::NetState;

/// Current snapshot, and the undo and redo lists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct History {
    /// Starting position, used when restarting the game.
    initial: NetState,

    /// Current position.
    current: NetState,

    /// List of undo snapshots. The last one is the previous position.
    undo_op: Vec<NetState>,

    /// List of redo snapshots.
    redo_op: Vec<NetState>,
}

impl History {
    /// Create a [`History`] object that starts at the given position.
    pub fn new(initial: NetState) -> Self {
        Self {
            current: initial.clone(),
            initial,
            undo_op: Vec::new(),
            redo_op: Vec::new(),
        }
    }

    pub fn current(&self) -> &NetState {
        &self.current
    }

    pub fn initial(&self) -> &NetState {
        &self.initial
    }

    /// Make `state` the current position and store the previous one in the undo list.
    /// The redo list is cleared.
    pub fn push(&mut self, state: NetState) {
        let previous: NetState = std::mem::replace(&mut self.current, state);
        self.undo_op.push(previous);
        self.redo_op.clear();
    }

    /// Undo the last move. Return `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_op.pop() else {
            return false;
        };
        let current: NetState = std::mem::replace(&mut self.current, previous);
        self.redo_op.push(current);
        debug!(
            "Undo ({} undo, {} redo)",
            self.undo_op.len(),
            self.redo_op.len()
        );
        true
    }

    /// Redo the last undone move. Return `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_op.pop() else {
            return false;
        };
        let current: NetState = std::mem::replace(&mut self.current, next);
        self.undo_op.push(current);
        debug!(
            "Redo ({} undo, {} redo)",
            self.undo_op.len(),
            self.redo_op.len()
        );
        true
    }

    /// Go back to the starting position. The restart can itself be undone.
    pub fn restart(&mut self) {
        debug!("Restarting the game");
        self.push(self.initial.clone());
    }

    /// Return the length of the undo list.
    pub fn undo_len(&self) -> usize {
        self.undo_op.len()
    }

    /// Return the length of the redo list.
    pub fn redo_len(&self) -> usize {
        self.redo_op.len()
    }

    /// Every snapshot: the starting position, the current one, then the undo and redo lists.
    pub fn snapshots(&self) -> impl Iterator<Item = &NetState> {
        std::iter::once(&self.initial)
            .chain(std::iter::once(&self.current))
            .chain(self.undo_op.iter())
            .chain(self.redo_op.iter())
    }

    /// Recompute the active flags of all the snapshots. Used after loading a saved game,
    /// because the flags are not saved.
    pub fn refresh_active(&mut self) {
        self.initial.refresh_active();
        self.current.refresh_active();
        for state in self.undo_op.iter_mut().chain(self.redo_op.iter_mut()) {
            state.refresh_active();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{self, params::NetParams};
    use crate::moves::{Move, make_move};
    use crate::state::RotateDir;
    use crate::topology::Coord;

    fn history() -> History {
        let puzzle = generator::new_puzzle(&NetParams::new(3, 3, false), 21).expect("valid");
        History::new(puzzle.state)
    }

    fn turn(history: &mut History, x: usize, y: usize) {
        let mv = Move::Rotate {
            cell: Coord::new(x, y),
            dir: RotateDir::Clockwise,
        };
        let next = make_move(history.current(), mv).expect("moved");
        history.push(next);
    }

    #[test]
    fn test_undo_redo() {
        let mut h = history();
        let start = h.current().clone();
        assert!(!h.undo());
        assert!(!h.redo());

        turn(&mut h, 0, 0);
        let first = h.current().clone();
        turn(&mut h, 1, 2);
        let second = h.current().clone();
        assert_eq!(h.undo_len(), 2);

        assert!(h.undo());
        assert_eq!(*h.current(), first);
        assert!(h.undo());
        assert_eq!(*h.current(), start);
        assert_eq!(h.redo_len(), 2);

        assert!(h.redo());
        assert!(h.redo());
        assert_eq!(*h.current(), second);
        assert_eq!(h.redo_len(), 0);
    }

    #[test]
    fn test_new_move_clears_redo() {
        let mut h = history();
        turn(&mut h, 0, 0);
        turn(&mut h, 0, 1);
        h.undo();
        assert_eq!(h.redo_len(), 1);
        turn(&mut h, 2, 2);
        assert_eq!(h.redo_len(), 0);
        assert_eq!(h.undo_len(), 2);
    }

    #[test]
    fn test_restart_is_undoable() {
        let mut h = history();
        turn(&mut h, 1, 1);
        let moved = h.current().clone();

        h.restart();
        assert_eq!(h.current(), h.initial());
        assert_eq!(h.undo_len(), 2);

        assert!(h.undo());
        assert_eq!(*h.current(), moved);
    }

    #[test]
    fn test_refresh_active_after_json() {
        let mut h = history();
        turn(&mut h, 2, 0);
        h.undo();
        let json = serde_json::to_string(&h).expect("serialize");
        let mut restored: History = serde_json::from_str(&json).expect("deserialize");
        restored.refresh_active();
        assert_eq!(restored, h);
    }
}
