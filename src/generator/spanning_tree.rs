/*
spanning_tree.rs

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

//! Generate the solved network: a random spanning tree rooted at the center cell.
//!
//! Starting from the center, the generator repeatedly picks a random edge from a used cell
//! into an unused one and connects it.
//! When a cell gets its third connection, its fourth direction is withdrawn from the frontier so
//! that no cell ends up as a full cross (a cross has only one orientation, which would give the
//! answer away).
//!
//! Withdrawing those directions never leaves a cell unreachable. An unreachable group of cells
//! would have to be surrounded on all sides by T-pieces pointing away from it, so the group
//! would be a rectangle whose border is a closed loop of connected pipes. The generator never
//! closes a loop, so the situation cannot happen.

use log::debug;
use rand::Rng;

use super::random_set::{Candidate, RandomSet};
use crate::topology::{Coord, DirSet, Direction, Grid};

/// Generate the connection masks of a loop-free network that reaches every cell.
///
/// The masks are returned in row-major order. Every link has its reciprocal link on the
/// neighbor cell.
pub fn generate<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Vec<DirSet> {
    let mut links: Vec<DirSet> = vec![DirSet::EMPTY; grid.len()];
    let mut frontier: RandomSet<Candidate> = RandomSet::new();

    let center: Coord = grid.center();
    for d in Direction::ALL {
        if grid.offset(center, d).is_some() {
            frontier.insert((center, d));
        }
    }

    while let Some((c1, d1)) = frontier.take_random(rng) {
        // Candidates are only created towards existing neighbors
        let Some(c2) = grid.offset(c1, d1) else {
            continue;
        };
        let d2: Direction = d1.opposite();
        let i1: usize = grid.index(c1);
        let i2: usize = grid.index(c2);
        debug!("Picked {c1}{d1} <-> {c2}{d2}");

        // The frontier never points into a used cell
        debug_assert!(links[i2].is_empty(), "Frontier edge {c1}{d1} leads to a used cell");
        links[i1].insert(d1);
        links[i2].insert(d2);

        // A T-piece must not become a cross
        if links[i1].count() == 3 {
            for d in links[i1].complement().iter() {
                if frontier.remove(&(c1, d)) {
                    debug!("    T-piece; removing {c1}{d}");
                }
            }
        }

        // The target is now used: other cells must not connect into it, which would close a loop
        for d in Direction::ALL {
            if let Some(c3) = grid.offset(c2, d)
                && frontier.remove(&(c3, d.opposite()))
            {
                debug!("    Loop avoidance; removing {c3}{}", d.opposite());
            }
        }

        // Extend the frontier from the target into its unused neighbors
        for d in Direction::ALL {
            if d == d2 {
                continue;
            }
            if let Some(c3) = grid.offset(c2, d)
                && links[grid.index(c3)].is_empty()
            {
                debug!("    New frontier; adding {c2}{d}");
                frontier.insert((c2, d));
            }
        }
    }

    debug_assert!(
        links.iter().all(|l| !l.is_empty()),
        "Some cells were not reached"
    );
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver;
    use crate::state::{CellBarriers, Tile};
    use crate::topology::seeded_rng;
    use proptest::prelude::*;

    /// Verify the tree properties and return a description of the first violation.
    fn check_tree(grid: &Grid, links: &[DirSet]) -> Result<(), String> {
        if links.len() != grid.len() {
            return Err(format!("{} masks for {} cells", links.len(), grid.len()));
        }

        let mut half_edges: u32 = 0;
        for cell in grid.cells() {
            let mask: DirSet = links[grid.index(cell)];
            if mask == DirSet::FULL {
                return Err(format!("Full cross at {cell}"));
            }
            half_edges += mask.count();
            for d in Direction::ALL {
                let reciprocal: bool = grid
                    .offset(cell, d)
                    .is_some_and(|n| links[grid.index(n)].contains(d.opposite()));
                if mask.contains(d) != reciprocal {
                    return Err(format!("Link {cell}{d} is not reciprocal"));
                }
            }
        }

        if half_edges as usize / 2 != grid.len() - 1 {
            return Err(format!(
                "{} edges for {} cells",
                half_edges / 2,
                grid.len()
            ));
        }

        let tiles: Vec<Tile> = links.iter().map(|l| Tile::new(*l)).collect();
        let barriers: Vec<CellBarriers> = vec![CellBarriers::default(); grid.len()];
        let active = solver::compute_active(grid, &tiles, &barriers);
        if !active.all_active() {
            return Err(format!(
                "Only {}/{} cells connected",
                active.count(),
                grid.len()
            ));
        }
        Ok(())
    }

    #[test]
    fn test_small_grids() {
        for (w, h, wrapping) in [
            (2, 1, false),
            (1, 2, false),
            (2, 2, false),
            (2, 2, true),
            (1, 5, true),
            (2, 3, true),
            (5, 5, false),
            (7, 7, true),
        ] {
            let grid = Grid::new(w, h, wrapping);
            for seed in 0..20 {
                let links = generate(&grid, &mut seeded_rng(seed));
                if let Err(msg) = check_tree(&grid, &links) {
                    panic!("{w}x{h} wrapping={wrapping} seed={seed}: {msg}");
                }
            }
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let grid = Grid::new(9, 7, true);
        let a = generate(&grid, &mut seeded_rng(2025));
        let b = generate(&grid, &mut seeded_rng(2025));
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounded_grid_has_no_outward_links() {
        let grid = Grid::new(6, 4, false);
        let links = generate(&grid, &mut seeded_rng(3));
        for cell in grid.cells() {
            let outward = grid.border_directions(cell);
            for d in outward.iter() {
                assert!(!links[grid.index(cell)].contains(d), "{cell}{d} leaves the grid");
            }
        }
    }

    proptest! {
        #[test]
        fn test_spanning_tree_validity(
            width in 1usize..10,
            height in 1usize..10,
            wrapping in any::<bool>(),
            seed in any::<u64>(),
        ) {
            prop_assume!(width > 1 || height > 1);
            let grid = Grid::new(width, height, wrapping);
            let links = generate(&grid, &mut seeded_rng(seed));
            prop_assert_eq!(check_tree(&grid, &links), Ok(()));
        }
    }
}
