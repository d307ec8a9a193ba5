/*
moves.rs

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

//! Apply player moves to a Net puzzle.
//!
//! Each move returns a new [`NetState`] snapshot and leaves the given one untouched.
//! A move that has no effect (rotating a locked tile, or a cell outside the grid) returns
//! `None`, which is not an error: the caller simply keeps the current state.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::solver::ActiveMap;
use crate::state::{NetState, RotateDir};
use crate::topology::{Coord, DirSet};

/// Player move.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Move {
    /// Turn a tile one quarter turn.
    Rotate { cell: Coord, dir: RotateDir },

    /// Lock or unlock a tile.
    ToggleLock { cell: Coord },
}

/// Apply a move and return the new snapshot, or `None` if the move does nothing.
pub fn make_move(state: &NetState, mv: Move) -> Option<NetState> {
    match mv {
        Move::ToggleLock { cell } => {
            let mut ret: NetState = state.clone();
            let tile = ret.tile_mut(cell)?;
            tile.locked = !tile.locked;
            debug!("Tile {cell} locked: {}", tile.locked);
            Some(ret)
        }
        Move::Rotate { cell, dir } => {
            if state.tile(cell)?.locked {
                debug!("Tile {cell} is locked");
                return None;
            }
            let mut ret: NetState = state.clone();
            let tile = ret.tile_mut(cell)?;
            tile.links = tile.links.rotate(dir.steps());
            ret.last_rotate_dir = dir;
            debug!("Tile {cell} rotated {dir:?}");
            update_completion(&mut ret);
            Some(ret)
        }
    }
}

/// Return a snapshot with every tile turned to its solution orientation.
///
/// `solution` holds the unshuffled masks in row-major order. Locks are kept. Return `None` when
/// the solution does not match the grid.
pub fn solve(state: &NetState, solution: &[DirSet]) -> Option<NetState> {
    if solution.len() != state.tiles().len() {
        return None;
    }
    let mut ret: NetState = state.clone();
    for (i, mask) in solution.iter().enumerate() {
        let cell: Coord = state.grid().coord(i);
        if let Some(tile) = ret.tile_mut(cell) {
            tile.links = *mask;
        }
    }
    update_completion(&mut ret);
    Some(ret)
}

/// Refresh the active flags and mark the puzzle completed when everything is connected.
fn update_completion(state: &mut NetState) {
    let active: ActiveMap = state.refresh_active();
    if active.all_active() && !state.completed {
        debug!("Puzzle completed");
        state.completed = true;
    }
}
