/*
random_set.rs

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

//! Set with constant-time insertion, removal by key, and removal of a random element.

use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;

/// Candidate edge during generation: a cell and the direction leaving it.
pub type Candidate = (crate::topology::Coord, crate::topology::Direction);

/// Unordered set used for the generation frontier and the barrier candidates.
///
/// The elements live in a vector. Removing an element swaps the last element into its slot, and
/// the map keeps track of where each element is stored.
#[derive(Debug, Clone)]
pub struct RandomSet<T> {
    items: Vec<T>,
    position: HashMap<T, usize>,
}

impl<T: Copy + Eq + Hash> Default for RandomSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> RandomSet<T> {
    /// Create an empty [`RandomSet`] object.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            position: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.position.contains_key(item)
    }

    /// Add an element. Return `false` if it was already in the set.
    pub fn insert(&mut self, item: T) -> bool {
        if self.position.contains_key(&item) {
            return false;
        }
        self.position.insert(item, self.items.len());
        self.items.push(item);
        true
    }

    /// Remove an element. Return `false` if it was not in the set.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.position.remove(item) {
            Some(i) => {
                self.take_at(i);
                true
            }
            None => false,
        }
    }

    /// Remove and return a uniformly chosen element, or `None` if the set is empty.
    ///
    /// Exactly one value is drawn from the random source for a non-empty set.
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let i: usize = rng.random_range(0..self.items.len());
        let item: T = self.items[i];
        self.position.remove(&item);
        self.take_at(i);
        Some(item)
    }

    /// Swap-remove the element at the given slot and fix the position of the moved element.
    fn take_at(&mut self, i: usize) {
        self.items.swap_remove(i);
        if let Some(moved) = self.items.get(i) {
            self.position.insert(*moved, i);
        }
    }

    /// Elements in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}
