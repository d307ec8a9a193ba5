/*
barriers.rs

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

//! Place barriers on edges that the solution does not use.
//!
//! Barriers are drawn one by one from a fixed pool of candidates.
//! For the same seed, asking for more barriers therefore gives the previous barriers plus some
//! new ones, instead of a completely different set.

use log::{Level, debug, log_enabled};
use rand::Rng;

use super::random_set::{Candidate, RandomSet};
use crate::state::CellBarriers;
use crate::topology::{Coord, DirSet, Direction, Grid};

/// Permanent barriers along the border of a bounded grid. Empty on a wrapping grid.
pub fn border_barriers(grid: &Grid) -> Vec<CellBarriers> {
    grid.cells()
        .map(|cell| CellBarriers {
            edges: grid.border_directions(cell),
            corners: DirSet::EMPTY,
        })
        .collect()
}

/// List the edges that may receive a barrier: the edges between two neighbors that the
/// solution leaves unconnected.
///
/// `links` must be the unshuffled network. Every edge is listed once, from its left or top
/// cell, in row-major order.
pub fn candidates(grid: &Grid, links: &[DirSet]) -> RandomSet<Candidate> {
    let mut set: RandomSet<Candidate> = RandomSet::new();

    for cell in grid.cells() {
        let mask: DirSet = links[grid.index(cell)];
        for d in [Direction::Right, Direction::Down] {
            if !mask.contains(d) && grid.offset(cell, d).is_some() {
                set.insert((cell, d));
            }
        }
    }
    debug!("{} candidate barrier locations", set.len());
    set
}

/// Number of barriers to place for the given probability.
pub fn barrier_count(probability: f32, num_candidates: usize) -> usize {
    let n: f64 = (f64::from(probability) * num_candidates as f64).round();
    (n.max(0.0) as usize).min(num_candidates)
}

/// Draw barriers from the candidates and add them to both sides of each edge.
///
/// Return the number of barriers placed.
pub fn place<R: Rng + ?Sized>(
    grid: &Grid,
    barriers: &mut [CellBarriers],
    mut candidates: RandomSet<Candidate>,
    probability: f32,
    rng: &mut R,
) -> usize {
    let count: usize = barrier_count(probability, candidates.len());

    for _ in 0..count {
        let Some((c1, d1)) = candidates.take_random(rng) else {
            break;
        };
        let Some(c2) = grid.offset(c1, d1) else {
            continue;
        };
        barriers[grid.index(c1)].edges.insert(d1);
        barriers[grid.index(c2)].edges.insert(d1.opposite());
        debug!("Barrier between {c1} and {c2}");
    }

    if log_enabled!(Level::Debug) {
        debug!("{count} barriers placed, {} candidates left", candidates.len());
    }
    count
}

/// Cell at the given position, without wrapping.
fn cell_at(grid: &Grid, x: isize, y: isize) -> Option<Coord> {
    if x < 0 || y < 0 || x >= grid.width() as isize || y >= grid.height() as isize {
        return None;
    }
    Some(Coord::new(x as usize, y as usize))
}

/// Set the corner flags so that barriers meeting at a grid vertex are drawn joined.
///
/// A corner `d` is the vertex between direction `d` and the next direction anticlockwise.
/// The corner is flagged on all the cells (up to four) around that vertex.
pub fn set_corners(grid: &Grid, barriers: &mut [CellBarriers]) {
    for cell in grid.cells() {
        let edges: DirSet = barriers[grid.index(cell)].edges;

        for dir in edges.iter() {
            let dir2: Direction = dir.rotate(1);
            let (dx, dy) = dir.delta();
            let (dx2, dy2) = dir2.delta();
            let x: isize = cell.x as isize;
            let y: isize = cell.y as isize;

            let across: Option<Coord> = cell_at(grid, x + dx, y + dy);
            let beside: Option<Coord> = cell_at(grid, x + dx2, y + dy2);
            let diagonal: Option<Coord> = cell_at(grid, x + dx + dx2, y + dy + dy2);

            let corner: bool = edges.contains(dir2)
                || across.is_some_and(|c| barriers[grid.index(c)].edges.contains(dir2))
                || beside.is_some_and(|c| barriers[grid.index(c)].edges.contains(dir));
            if !corner {
                continue;
            }

            barriers[grid.index(cell)].corners.insert(dir);
            if let Some(c) = across {
                barriers[grid.index(c)].corners.insert(dir.rotate(1));
            }
            if let Some(c) = beside {
                barriers[grid.index(c)].corners.insert(dir.rotate(-1));
            }
            if let Some(c) = diagonal {
                barriers[grid.index(c)].corners.insert(dir.opposite());
            }
        }
    }
}
