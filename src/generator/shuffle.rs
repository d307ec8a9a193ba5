/*
shuffle.rs

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

//! Rotate every tile of the solved network by a random number of quarter turns.

use rand::Rng;

use crate::topology::DirSet;

/// Rotate each mask, in row-major order, by a random number of quarter turns (0 to 3).
///
/// Exactly one value is drawn per tile.
pub fn shuffle<R: Rng + ?Sized>(links: &[DirSet], rng: &mut R) -> Vec<DirSet> {
    links
        .iter()
        .map(|mask| mask.rotate(rng.random_range(0..4)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::seeded_rng;

    #[test]
    fn test_shuffle_only_rotates() {
        let links: Vec<DirSet> = (1..15u8).map(DirSet::from_bits).collect();
        let shuffled = shuffle(&links, &mut seeded_rng(8));
        assert_eq!(shuffled.len(), links.len());
        for (orig, new) in links.iter().zip(&shuffled) {
            assert!((0..4).any(|n| orig.rotate(n) == *new));
        }
    }

    #[test]
    fn test_shuffle_changes_something() {
        let links: Vec<DirSet> = vec![DirSet::from_bits(0x01); 50];
        let shuffled = shuffle(&links, &mut seeded_rng(8));
        assert_ne!(shuffled, links);
    }
}
