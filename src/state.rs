/*
state.rs

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

//! Snapshot of a Net puzzle in progress.
//!
//! A [`NetState`] is never modified once it has been handed to the caller.
//! The move engine in [`crate::moves`] clones the snapshot, changes the copy, and returns it.

use serde::{Deserialize, Serialize};

use crate::solver::{self, ActiveMap};
use crate::topology::{Coord, DirSet, Grid};

/// One grid cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tile {
    /// Directions the pipe segments of the tile point into.
    pub links: DirSet,

    /// Set by the player to prevent rotating the tile by accident.
    pub locked: bool,

    /// Whether the tile is connected to the center.
    /// Derived from the other tiles; refreshed by [`NetState::refresh_active`].
    #[serde(skip)]
    pub active: bool,
}

impl Tile {
    pub fn new(links: DirSet) -> Self {
        Self {
            links,
            locked: false,
            active: false,
        }
    }
}

/// Barriers around one cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CellBarriers {
    /// Blocked edges of the cell.
    pub edges: DirSet,

    /// Cosmetic corner pieces where barriers meet. Corner `d` is the corner between direction
    /// `d` and the next direction anticlockwise.
    pub corners: DirSet,
}

/// Direction of the last rotation, used to animate the tile the right way round.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RotateDir {
    #[default]
    Anticlockwise,
    Clockwise,
}

impl RotateDir {
    /// Number of quarter turns for one rotation in this direction.
    pub fn steps(self) -> i32 {
        match self {
            RotateDir::Anticlockwise => 1,
            RotateDir::Clockwise => -1,
        }
    }
}

/// Snapshot of a Net puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NetState {
    grid: Grid,

    /// Tiles in row-major order.
    tiles: Vec<Tile>,

    /// Barriers in row-major order. Set at generation time and never changed afterwards.
    barriers: Vec<CellBarriers>,

    /// Whether every tile has been connected to the center. Never reset once set.
    pub completed: bool,

    /// Direction of the last rotation.
    pub last_rotate_dir: RotateDir,
}

impl NetState {
    /// Create a [`NetState`] object from generated tiles and barriers.
    ///
    /// The active flags are computed, but the state is not marked completed even if the tiles
    /// happen to be connected already: only a move can complete the puzzle.
    pub fn new(grid: Grid, links: &[DirSet], barriers: Vec<CellBarriers>) -> Self {
        let mut state: NetState = Self {
            grid,
            tiles: links.iter().map(|l| Tile::new(*l)).collect(),
            barriers,
            completed: false,
            last_rotate_dir: RotateDir::default(),
        };
        state.refresh_active();
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn barriers(&self) -> &[CellBarriers] {
        &self.barriers
    }

    /// Return the tile at the given position, or `None` outside the grid.
    pub fn tile(&self, cell: Coord) -> Option<&Tile> {
        if !self.grid.contains(cell) {
            return None;
        }
        self.tiles.get(self.grid.index(cell))
    }

    /// Mutable access for the move engine. Callers only use it on their own copy.
    pub(crate) fn tile_mut(&mut self, cell: Coord) -> Option<&mut Tile> {
        if !self.grid.contains(cell) {
            return None;
        }
        let i: usize = self.grid.index(cell);
        self.tiles.get_mut(i)
    }

    /// Return the barriers of the cell at the given position, or `None` outside the grid.
    pub fn cell_barriers(&self, cell: Coord) -> Option<&CellBarriers> {
        if !self.grid.contains(cell) {
            return None;
        }
        self.barriers.get(self.grid.index(cell))
    }

    /// Connection masks of all the tiles, in row-major order.
    pub fn links(&self) -> Vec<DirSet> {
        self.tiles.iter().map(|t| t.links).collect()
    }

    /// Run the connectivity solver on the current tiles.
    pub fn compute_active(&self) -> ActiveMap {
        solver::compute_active(&self.grid, &self.tiles, &self.barriers)
    }

    /// Recompute the active flags of the tiles and return the solver result.
    pub fn refresh_active(&mut self) -> ActiveMap {
        let active: ActiveMap = self.compute_active();
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            tile.active = active.is_active_index(i);
        }
        active
    }
}
