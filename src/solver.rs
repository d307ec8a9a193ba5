/*
solver.rs

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

//! Compute which tiles are connected to the center.
//!
//! The result is a quick visual aid (powered wires are drawn in another color) and also the
//! completion test: the puzzle is solved when every tile is active.

use log::debug;
use std::collections::VecDeque;

use crate::state::{CellBarriers, Tile};
use crate::topology::{Coord, Direction, Grid};

/// Active status of every cell, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMap {
    grid: Grid,
    active: Vec<bool>,
    count: usize,
}

impl ActiveMap {
    pub fn is_active(&self, cell: Coord) -> bool {
        self.grid.contains(cell) && self.active[self.grid.index(cell)]
    }

    pub fn is_active_index(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    /// Number of active cells.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether every cell is connected to the center, which means the puzzle is solved.
    pub fn all_active(&self) -> bool {
        self.count == self.active.len()
    }
}

/// Whether the edge from the cell in the given direction carries power.
fn is_connected(
    grid: &Grid,
    tiles: &[Tile],
    barriers: &[CellBarriers],
    cell: Coord,
    direction: Direction,
) -> Option<Coord> {
    let i1: usize = grid.index(cell);
    if !tiles[i1].links.contains(direction) || barriers[i1].edges.contains(direction) {
        return None;
    }
    let neighbor: Coord = grid.offset(cell, direction)?;
    let i2: usize = grid.index(neighbor);
    let back: Direction = direction.opposite();
    if !tiles[i2].links.contains(back) || barriers[i2].edges.contains(back) {
        return None;
    }
    Some(neighbor)
}

/// Flood fill from the center across linked, unblocked edges.
///
/// `tiles` and `barriers` are in row-major order and must both cover the whole grid.
pub fn compute_active(grid: &Grid, tiles: &[Tile], barriers: &[CellBarriers]) -> ActiveMap {
    let mut active: Vec<bool> = vec![false; grid.len()];
    let mut count: usize = 0;
    let mut todo: VecDeque<Coord> = VecDeque::with_capacity(grid.len());

    if !grid.is_empty() {
        let center: Coord = grid.center();
        active[grid.index(center)] = true;
        count += 1;
        todo.push_back(center);
    }

    while let Some(cell) = todo.pop_front() {
        for d in Direction::ALL {
            if let Some(neighbor) = is_connected(grid, tiles, barriers, cell, d) {
                let i: usize = grid.index(neighbor);
                if !active[i] {
                    active[i] = true;
                    count += 1;
                    todo.push_back(neighbor);
                }
            }
        }
    }
    debug!("Active tiles: {count}/{}", grid.len());

    ActiveMap {
        grid: *grid,
        active,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::DirSet;

    fn tiles(masks: &[u8]) -> Vec<Tile> {
        masks.iter().map(|m| Tile::new(DirSet::from_bits(*m))).collect()
    }

    #[test]
    fn test_connected_row() {
        // 3x1: R, L+R, L
        let grid = Grid::new(3, 1, false);
        let t = tiles(&[0x01, 0x05, 0x04]);
        let b = vec![CellBarriers::default(); 3];
        let active = compute_active(&grid, &t, &b);
        assert!(active.all_active());
        assert_eq!(active.count(), 3);
    }

    #[test]
    fn test_one_sided_link_does_not_connect() {
        // The right cell points up instead of back to the center
        let grid = Grid::new(3, 1, false);
        let t = tiles(&[0x01, 0x05, 0x02]);
        let b = vec![CellBarriers::default(); 3];
        let active = compute_active(&grid, &t, &b);
        assert_eq!(active.count(), 2);
        assert!(active.is_active(Coord::new(0, 0)));
        assert!(!active.is_active(Coord::new(2, 0)));
        assert!(!active.all_active());
    }

    #[test]
    fn test_barrier_blocks_either_side() {
        let grid = Grid::new(3, 1, false);
        let t = tiles(&[0x01, 0x05, 0x04]);

        let mut b = vec![CellBarriers::default(); 3];
        b[1].edges.insert(Direction::Right);
        assert_eq!(compute_active(&grid, &t, &b).count(), 2);

        let mut b = vec![CellBarriers::default(); 3];
        b[2].edges.insert(Direction::Left);
        assert_eq!(compute_active(&grid, &t, &b).count(), 2);
    }

    #[test]
    fn test_wrapping_connection() {
        // 3x1 wrapping: the center links left and right, the edge cells link across the wrap
        let grid = Grid::new(3, 1, true);
        let t = tiles(&[0x01, 0x04, 0x00]);
        let b = vec![CellBarriers::default(); 3];
        let active = compute_active(&grid, &t, &b);
        assert_eq!(active.count(), 2);

        let t = tiles(&[0x05, 0x04, 0x01]);
        let active = compute_active(&grid, &t, &b);
        assert!(active.all_active());

        // Same tiles on a bounded grid: the wrap link does not exist
        let bounded = Grid::new(3, 1, false);
        let t = tiles(&[0x05, 0x04, 0x01]);
        assert_eq!(compute_active(&bounded, &t, &b).count(), 2);
    }
}
