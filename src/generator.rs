/*
generator.rs

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

//! Generate Net puzzles.
//!
//! [`params::NetParams`] objects describe the puzzle: size, wrapping, and barrier rate.
//!
//! A puzzle is built from a seed in four steps, always in this order:
//!
//! * [`spanning_tree::generate`] builds the solved network, a random spanning tree rooted at
//!   the center cell.
//! * [`barriers::candidates`] lists the edges that the solved network does not use.
//! * [`shuffle::shuffle`] rotates every tile by a random amount.
//! * [`barriers::place`] draws barriers from the candidates.
//!
//! Because barriers come last, changing only the barrier rate of a puzzle keeps the same
//! network and the same shuffle, and a higher rate adds barriers to the previous ones.

pub mod barriers;
pub mod params;
pub mod random_set;
pub mod shuffle;
pub mod spanning_tree;

use log::{Level, debug, info, log_enabled};
use rand::Rng;
use std::time::Instant;

use crate::state::{CellBarriers, NetState};
use crate::topology::{DirSet, Grid, seeded_rng};
use params::{NetParams, ParamsError};

/// A generated puzzle and its solution.
#[derive(Debug, Clone)]
pub struct Puzzle {
    /// Starting position.
    pub state: NetState,

    /// Unshuffled connection masks, in row-major order.
    pub solution: Vec<DirSet>,

    /// Number of barriers placed inside the grid (the border of a bounded grid not included).
    pub num_barriers: usize,

    /// Duration in seconds it took to generate the puzzle.
    pub duration: f32,
}

/// Generate the puzzle for the given parameters and seed.
///
/// # Errors
///
/// The function returns an error when the parameters are invalid.
pub fn new_puzzle(params: &NetParams, seed: u64) -> Result<Puzzle, ParamsError> {
    params.validate()?;
    debug!("Generating {} puzzle with seed {seed}", params.name());
    Ok(generate_puzzle(params, &mut seeded_rng(seed)))
}

/// Generate a puzzle from an already validated set of parameters.
pub fn generate_puzzle<R: Rng + ?Sized>(params: &NetParams, rng: &mut R) -> Puzzle {
    let start: Instant = Instant::now();
    let grid: Grid = params.grid();

    let mut barriers: Vec<CellBarriers> = barriers::border_barriers(&grid);
    let solution: Vec<DirSet> = spanning_tree::generate(&grid, rng);
    let candidates = barriers::candidates(&grid, &solution);
    let shuffled: Vec<DirSet> = shuffle::shuffle(&solution, rng);
    let num_barriers: usize = barriers::place(
        &grid,
        &mut barriers,
        candidates,
        params.barrier_probability,
        rng,
    );
    barriers::set_corners(&grid, &mut barriers);

    let state: NetState = NetState::new(grid, &shuffled, barriers);
    let duration: f32 = start.elapsed().as_secs_f32();

    if log_enabled!(Level::Debug) {
        for y in 0..grid.height() {
            let row: Vec<String> = (0..grid.width())
                .map(|x| format!("{:>5}", solution[y * grid.width() + x].to_string()))
                .collect();
            debug!("{}", row.join(""));
        }
    }
    info!(
        "Generated {} puzzle with {num_barriers} barriers in {duration}s",
        params.name()
    );

    Puzzle {
        state,
        solution,
        num_barriers,
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Coord, Direction};
    use proptest::prelude::*;

    /// Inner barrier half-edges as (cell index, direction) pairs.
    fn barrier_edges(puzzle: &Puzzle) -> Vec<(usize, Direction)> {
        let grid = puzzle.state.grid();
        let mut edges = Vec::new();
        for cell in grid.cells() {
            let i = grid.index(cell);
            let border = grid.border_directions(cell);
            for d in puzzle.state.barriers()[i].edges.iter() {
                if !border.contains(d) {
                    edges.push((i, d));
                }
            }
        }
        edges
    }

    #[test]
    fn test_invalid_params() {
        assert_eq!(
            new_puzzle(&NetParams::new(1, 1, false), 1).err(),
            Some(ParamsError::SingleCell)
        );
    }

    #[test]
    fn test_seed_reproduces_puzzle() {
        let mut params = NetParams::new(7, 7, true);
        params.barrier_probability = 0.3;
        let a = new_puzzle(&params, 77).expect("valid params");
        let b = new_puzzle(&params, 77).expect("valid params");
        assert_eq!(a.state, b.state);
        assert_eq!(a.solution, b.solution);

        let c = new_puzzle(&params, 78).expect("valid params");
        assert_ne!(a.state, c.state);
    }

    #[test]
    fn test_barrier_rate_keeps_network_and_shuffle() {
        let mut params = NetParams::new(9, 9, false);
        let plain = new_puzzle(&params, 5).expect("valid params");
        params.barrier_probability = 0.8;
        let blocked = new_puzzle(&params, 5).expect("valid params");

        assert_eq!(plain.solution, blocked.solution);
        assert_eq!(plain.state.links(), blocked.state.links());
        assert_eq!(barrier_edges(&plain).len(), 0);
        assert!(blocked.num_barriers > 0);
        assert_eq!(barrier_edges(&blocked).len(), 2 * blocked.num_barriers);
    }

    #[test]
    fn test_shuffled_tiles_are_rotations_of_solution() {
        let puzzle = new_puzzle(&NetParams::new(11, 11, true), 3).expect("valid params");
        for (tile, solved) in puzzle.state.tiles().iter().zip(&puzzle.solution) {
            assert!((0..4).any(|n| solved.rotate(n) == tile.links));
            assert!(!tile.locked);
        }
        assert!(!puzzle.state.completed);
        // The center is always powered
        let center = puzzle.state.grid().center();
        assert!(puzzle.state.tile(center).is_some_and(|t| t.active));
    }

    #[test]
    fn test_bounded_grid_has_border_barriers() {
        let puzzle = new_puzzle(&NetParams::new(4, 3, false), 9).expect("valid params");
        let state = &puzzle.state;
        let corner = state.cell_barriers(Coord::new(0, 0)).expect("in grid");
        assert!(corner.edges.contains(Direction::Up));
        assert!(corner.edges.contains(Direction::Left));
        // The border meets at the grid corner
        assert!(corner.corners.contains(Direction::Up));
    }

    proptest! {
        #[test]
        fn test_barrier_monotonicity(
            width in 2usize..9,
            height in 2usize..9,
            wrapping in any::<bool>(),
            seed in any::<u64>(),
            p1 in 0.0f32..=1.0,
            p2 in 0.0f32..=1.0,
        ) {
            let (low, high) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let mut params = NetParams::new(width, height, wrapping);
            params.barrier_probability = low;
            let few = new_puzzle(&params, seed).expect("valid params");
            params.barrier_probability = high;
            let many = new_puzzle(&params, seed).expect("valid params");

            let few_edges = barrier_edges(&few);
            let many_edges = barrier_edges(&many);
            for edge in &few_edges {
                prop_assert!(many_edges.contains(edge));
            }
            prop_assert_eq!(few.state.links(), many.state.links());
        }

        #[test]
        fn test_solution_is_fully_connected_with_barriers(
            width in 1usize..9,
            height in 1usize..9,
            wrapping in any::<bool>(),
            seed in any::<u64>(),
            probability in 0.0f32..=1.0,
        ) {
            prop_assume!(width > 1 || height > 1);
            let mut params = NetParams::new(width, height, wrapping);
            params.barrier_probability = probability;
            let puzzle = new_puzzle(&params, seed).expect("valid params");
            let solved = NetState::new(
                *puzzle.state.grid(),
                &puzzle.solution,
                puzzle.state.barriers().to_vec(),
            );
            prop_assert!(solved.compute_active().all_active());
        }
    }
}
