/*
topology.rs

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

//! Grid topology: directions, direction sets, and coordinate arithmetic.
//!
//! A Net tile is described by the set of directions its pipe segments point into.
//! [`DirSet`] stores such a set in four bits and rotates it through a lookup table.
//! [`Grid`] translates coordinates for both toroidal (wrapping) and bounded grids.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// The four cardinal directions, in anticlockwise order.
///
/// The discriminant is the bit position of the direction in a [`DirSet`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Direction {
    Right = 0,
    Up = 1,
    Left = 2,
    Down = 3,
}

impl Direction {
    /// All the directions, in the order used for every iteration in the crate.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// Bit of the direction in a [`DirSet`].
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Rotate the direction by the given number of quarter turns.
    /// Positive values turn anticlockwise.
    pub fn rotate(self, steps: i32) -> Direction {
        let index: i32 = (self as i32 + steps).rem_euclid(4);
        Direction::from_repr(index as u8).unwrap_or(self)
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        self.rotate(2)
    }

    /// Horizontal and vertical displacement. The y axis points down.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Right => write!(f, "R"),
            Direction::Up => write!(f, "U"),
            Direction::Left => write!(f, "L"),
            Direction::Down => write!(f, "D"),
        }
    }
}

/// Build the rotation table: `ROTATIONS[n][bits]` is `bits` turned `n` quarter turns
/// anticlockwise.
const fn build_rotations() -> [[u8; 16]; 4] {
    let mut table: [[u8; 16]; 4] = [[0; 16]; 4];
    let mut n: usize = 0;
    while n < 4 {
        let mut bits: usize = 0;
        while bits < 16 {
            table[n][bits] = (((bits << n) | (bits >> (4 - n))) & 0x0F) as u8;
            bits += 1;
        }
        n += 1;
    }
    table
}

const ROTATIONS: [[u8; 16]; 4] = build_rotations();

/// Set of directions, stored in the four low bits of a byte.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct DirSet(u8);

impl DirSet {
    /// No direction.
    pub const EMPTY: DirSet = DirSet(0);

    /// All four directions.
    pub const FULL: DirSet = DirSet(0x0F);

    /// Create a set from raw bits. Bits above the fourth are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// Create a set from a list of directions.
    pub fn from_directions(directions: &[Direction]) -> Self {
        directions
            .iter()
            .fold(Self::EMPTY, |set, d| set.with(*d))
    }

    /// Raw bits of the set.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    /// Copy of the set with the direction added.
    pub fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    /// Copy of the set with the direction toggled.
    pub fn toggled(self, direction: Direction) -> Self {
        Self(self.0 ^ direction.bit())
    }

    /// Directions not in the set.
    pub fn complement(self) -> Self {
        Self(!self.0 & 0x0F)
    }

    /// Number of directions in the set.
    ///
    /// 1 is an endpoint, 2 a straight or corner piece, 3 a T-piece, and 4 a cross.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Rotate every direction of the set by the given number of quarter turns.
    /// Positive values turn anticlockwise, and 2 flips the set.
    pub fn rotate(self, steps: i32) -> Self {
        Self(ROTATIONS[steps.rem_euclid(4) as usize][self.0 as usize])
    }

    /// Iterate over the directions in the set.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl fmt::Display for DirSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for d in self.iter() {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Position of a cell in the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Dimensions and adjacency rules of a puzzle grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,

    /// Whether the edges of the grid connect to the opposite edges (torus).
    wrapping: bool,
}

impl Grid {
    /// Create a [`Grid`] object. The dimensions are validated by
    /// [`crate::generator::params::NetParams::validate`].
    pub fn new(width: usize, height: usize, wrapping: bool) -> Self {
        Self {
            width,
            height,
            wrapping,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn wrapping(&self) -> bool {
        self.wrapping
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The center cell, which is the power source of the network.
    pub fn center(&self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Coord) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Row-major index of the cell.
    pub fn index(&self, cell: Coord) -> usize {
        cell.y * self.width + cell.x
    }

    /// Cell at the given row-major index.
    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    /// Iterate over all the cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + use<> {
        let width: usize = self.width;
        (0..self.len()).map(move |i| Coord::new(i % width, i / width))
    }

    /// Return the neighbor of the cell in the given direction.
    ///
    /// On a wrapping grid, stepping off an edge lands on the opposite edge. On a bounded grid,
    /// there is no neighbor beyond the edges. A step that would land back on the same cell
    /// (wrapping along an axis of length 1) has no neighbor either.
    pub fn offset(&self, cell: Coord, direction: Direction) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        let w: isize = self.width as isize;
        let h: isize = self.height as isize;
        let mut x: isize = cell.x as isize + dx;
        let mut y: isize = cell.y as isize + dy;

        if self.wrapping {
            x = x.rem_euclid(w);
            y = y.rem_euclid(h);
        } else if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }

        let target: Coord = Coord::new(x as usize, y as usize);
        if target == cell { None } else { Some(target) }
    }

    /// Directions that leave the grid from the given cell. Always empty on a wrapping grid.
    pub fn border_directions(&self, cell: Coord) -> DirSet {
        let mut set: DirSet = DirSet::EMPTY;
        if self.wrapping {
            return set;
        }
        if cell.x + 1 == self.width {
            set.insert(Direction::Right);
        }
        if cell.y == 0 {
            set.insert(Direction::Up);
        }
        if cell.x == 0 {
            set.insert(Direction::Left);
        }
        if cell.y + 1 == self.height {
            set.insert(Direction::Down);
        }
        set
    }
}

/// Create the random number generator for a puzzle seed.
///
/// The same seed always produces the same stream, as long as the draws happen in the same order
/// and with the same ranges.
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
