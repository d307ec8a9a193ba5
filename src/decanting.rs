/*
decanting.rs

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

//! Decanting, a liquid-sorting puzzle.
//!
//! Layers of coloured liquid are mixed up in tubes. The player pours the top of one tube into
//! another until each tube holds a single colour. Liquid can only be poured onto the same
//! colour or into an empty tube, and a tube cannot hold more than its number of layers.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Maximum number of layers in a tube.
pub const MAX_LAYERS: usize = 8;

/// Maximum number of colours.
pub const MAX_COLOURS: usize = 12;

/// Maximum number of tubes.
pub const MAX_TUBES: usize = 16;

/// Parameters of a Decanting puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecantParams {
    pub colours: usize,
    pub tubes: usize,
    pub layers: usize,

    /// Hide the layers below the top of each tube.
    pub hidden_layers: bool,
}

impl Default for DecantParams {
    fn default() -> Self {
        Self {
            colours: 7,
            tubes: 9,
            layers: 4,
            hidden_layers: false,
        }
    }
}

impl DecantParams {
    /// Return the list of presets with their names.
    pub fn presets() -> Vec<(&'static str, DecantParams)> {
        let default: DecantParams = DecantParams::default();
        vec![
            (
                "Easy",
                DecantParams {
                    colours: 4,
                    tubes: 6,
                    ..default
                },
            ),
            ("Default", default),
            (
                "Hard",
                DecantParams {
                    colours: 12,
                    tubes: 14,
                    layers: 5,
                    ..default
                },
            ),
        ]
    }

    /// Return the preset with the given name, ignoring case.
    pub fn preset(name: &str) -> Option<DecantParams> {
        Self::presets()
            .into_iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, p)| p)
    }

    /// Verify the parameters before creating a puzzle.
    ///
    /// # Errors
    ///
    /// The method returns a message describing the first invalid parameter.
    pub fn validate(&self) -> Result<(), String> {
        if self.colours < 2 {
            return Err("Colours must be at least 2".to_string());
        }
        if self.layers < 2 {
            return Err("Layers must be at least 2".to_string());
        }
        if self.tubes < 3 {
            return Err("Tubes must be at least 3".to_string());
        }
        if self.colours > MAX_COLOURS {
            return Err("Too many colours".to_string());
        }
        if self.layers > MAX_LAYERS {
            return Err("Too many layers".to_string());
        }
        if self.tubes > MAX_TUBES {
            return Err("Too many tubes".to_string());
        }
        if self.tubes <= self.colours {
            return Err("There must be more tubes than colours".to_string());
        }
        Ok(())
    }
}

/// Snapshot of a Decanting puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DecantState {
    params: DecantParams,

    /// Colours in each tube, from the bottom layer up.
    tubes: Vec<Vec<u8>>,

    /// Whether every tube is empty or filled with a single colour.
    pub solved: bool,
}

impl DecantState {
    /// Build a puzzle from explicit tube contents, listed from the bottom layer up.
    ///
    /// # Errors
    ///
    /// The function returns an error when the parameters are invalid, or when the tubes do not
    /// hold exactly one full tube of each colour.
    pub fn from_tubes(params: DecantParams, tubes: Vec<Vec<u8>>) -> Result<Self, String> {
        params.validate()?;
        if tubes.len() != params.tubes {
            return Err(format!("Expected {} tubes", params.tubes));
        }
        let mut counts: Vec<usize> = vec![0; params.colours];
        for tube in &tubes {
            if tube.len() > params.layers {
                return Err("Too many layers in a tube".to_string());
            }
            for colour in tube {
                match counts.get_mut(*colour as usize) {
                    Some(n) => *n += 1,
                    None => return Err(format!("Unknown colour {colour}")),
                }
            }
        }
        if counts.iter().any(|n| *n != params.layers) {
            return Err("Each colour must fill exactly one tube".to_string());
        }
        let mut state: DecantState = Self {
            params,
            tubes,
            solved: false,
        };
        state.solved = state.is_sorted();
        Ok(state)
    }

    /// Generate a new puzzle: each colour fills one tube's worth of layers, the layers are
    /// mixed over the first tubes, and the remaining tubes start empty.
    ///
    /// # Errors
    ///
    /// The function returns an error when the parameters are invalid.
    pub fn new_game<R: Rng + ?Sized>(params: DecantParams, rng: &mut R) -> Result<Self, String> {
        params.validate()?;

        let mut units: Vec<u8> = (0..params.colours)
            .flat_map(|c| std::iter::repeat_n(c as u8, params.layers))
            .collect();

        loop {
            units.shuffle(rng);
            let mut tubes: Vec<Vec<u8>> = units
                .chunks(params.layers)
                .map(|chunk| chunk.to_vec())
                .collect();
            tubes.resize(params.tubes, Vec::new());

            let state: DecantState = Self {
                params,
                tubes,
                solved: false,
            };
            if !state.is_sorted() {
                debug!(
                    "New Decanting game: {} colours, {} tubes, {} layers",
                    params.colours, params.tubes, params.layers
                );
                return Ok(state);
            }
            debug!("Shuffle came out sorted, shuffling again");
        }
    }

    pub fn params(&self) -> &DecantParams {
        &self.params
    }

    /// Content of a tube from the bottom layer up, or `None` for an unknown tube.
    pub fn tube(&self, index: usize) -> Option<&[u8]> {
        self.tubes.get(index).map(|t| t.as_slice())
    }

    /// Whether every tube is empty or full with a single colour.
    fn is_sorted(&self) -> bool {
        self.tubes.iter().all(|t| {
            t.is_empty() || (t.len() == self.params.layers && t.iter().all(|c| *c == t[0]))
        })
    }

    /// Pour the top of tube `from` into tube `to`, and return the new snapshot.
    ///
    /// As many layers of the top colour as fit are poured. Return `None` when the move is not
    /// allowed: same or unknown tube, empty source, full target, or a different colour on top
    /// of the target.
    pub fn pour(&self, from: usize, to: usize) -> Option<DecantState> {
        if from == to {
            return None;
        }
        let source: &Vec<u8> = self.tubes.get(from)?;
        let target: &Vec<u8> = self.tubes.get(to)?;
        let colour: u8 = *source.last()?;
        if target.len() >= self.params.layers {
            return None;
        }
        if let Some(top) = target.last()
            && *top != colour
        {
            return None;
        }

        let run: usize = source.iter().rev().take_while(|c| **c == colour).count();
        let count: usize = run.min(self.params.layers - target.len());

        let mut ret: DecantState = self.clone();
        let remaining: usize = ret.tubes[from].len() - count;
        ret.tubes[from].truncate(remaining);
        ret.tubes[to].extend(std::iter::repeat_n(colour, count));
        if ret.is_sorted() {
            ret.solved = true;
        }
        debug!("Poured {count} layers of colour {colour} from tube {from} to tube {to}");
        Some(ret)
    }

    /// Text rendering: one line per layer from the top, one column per tube.
    ///
    /// Colours are hexadecimal digits and empty layers are `_`. With hidden layers, the filled
    /// layers below the top of each tube are shown as `?`.
    pub fn text_format(&self) -> String {
        let mut out: String = String::new();
        for layer in (0..self.params.layers).rev() {
            let row: Vec<String> = self
                .tubes
                .iter()
                .map(|tube| match tube.get(layer) {
                    None => "_".to_string(),
                    Some(_) if self.params.hidden_layers && layer + 1 < tube.len() => {
                        "?".to_string()
                    }
                    Some(c) => format!("{c:x}"),
                })
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }
}
