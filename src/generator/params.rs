/*
params.rs

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

//! Net puzzle parameters.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::topology::Grid;

/// Type of errors for invalid parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamsError {
    /// Width is zero.
    WidthTooSmall,

    /// Height is zero.
    HeightTooSmall,

    /// The grid is a single cell.
    SingleCell,

    /// The barrier probability is not a number between 0 and 1.
    BarrierProbability(f32),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamsError::WidthTooSmall => write!(f, "Width must be at least 1"),
            ParamsError::HeightTooSmall => write!(f, "Height must be at least 1"),
            ParamsError::SingleCell => {
                write!(f, "At least one of width and height must be greater than 1")
            }
            ParamsError::BarrierProbability(p) => {
                write!(f, "Barrier probability must be between 0 and 1 (got {p})")
            }
        }
    }
}

impl Error for ParamsError {}

/// Parameters of a Net puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct NetParams {
    pub width: usize,
    pub height: usize,

    /// Whether the grid edges connect to the opposite edges.
    pub wrapping: bool,

    /// Fraction of the unconnected edges that get a barrier.
    pub barrier_probability: f32,
}

impl Default for NetParams {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            wrapping: false,
            barrier_probability: 0.0,
        }
    }
}

/// Preset sizes: width, height, wrapping.
const PRESETS: [(usize, usize, bool); 10] = [
    (5, 5, false),
    (7, 7, false),
    (9, 9, false),
    (11, 11, false),
    (13, 11, false),
    (5, 5, true),
    (7, 7, true),
    (9, 9, true),
    (11, 11, true),
    (13, 11, true),
];

impl NetParams {
    /// Create a [`NetParams`] object without barriers.
    pub fn new(width: usize, height: usize, wrapping: bool) -> Self {
        Self {
            width,
            height,
            wrapping,
            barrier_probability: 0.0,
        }
    }

    /// Return the list of presets with their names.
    pub fn presets() -> Vec<(String, NetParams)> {
        PRESETS
            .iter()
            .map(|(w, h, wrap)| {
                let params: NetParams = NetParams::new(*w, *h, *wrap);
                (params.name(), params)
            })
            .collect()
    }

    /// Return the preset with the given name, such as `7x7` or `9x9 wrapping`.
    pub fn preset(name: &str) -> Option<NetParams> {
        Self::presets()
            .into_iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, p)| p)
    }

    /// Name of the puzzle size, as used for the presets.
    pub fn name(&self) -> String {
        format!(
            "{}x{}{}",
            self.width,
            self.height,
            if self.wrapping { " wrapping" } else { "" }
        )
    }

    /// Verify the parameters before generating a puzzle.
    ///
    /// # Errors
    ///
    /// The method returns a [`ParamsError`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.width < 1 {
            return Err(ParamsError::WidthTooSmall);
        }
        if self.height < 1 {
            return Err(ParamsError::HeightTooSmall);
        }
        if self.width == 1 && self.height == 1 {
            return Err(ParamsError::SingleCell);
        }
        if !self.barrier_probability.is_finite()
            || !(0.0..=1.0).contains(&self.barrier_probability)
        {
            return Err(ParamsError::BarrierProbability(self.barrier_probability));
        }
        Ok(())
    }

    /// Grid described by the parameters.
    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height, self.wrapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(NetParams::default().validate().is_ok());
        assert!(NetParams::new(1, 2, false).validate().is_ok());
        assert_eq!(
            NetParams::new(0, 5, false).validate(),
            Err(ParamsError::WidthTooSmall)
        );
        assert_eq!(
            NetParams::new(5, 0, true).validate(),
            Err(ParamsError::HeightTooSmall)
        );
        assert_eq!(
            NetParams::new(1, 1, false).validate(),
            Err(ParamsError::SingleCell)
        );

        let mut params = NetParams::default();
        params.barrier_probability = 1.5;
        assert_eq!(
            params.validate(),
            Err(ParamsError::BarrierProbability(1.5))
        );
        params.barrier_probability = f32::NAN;
        assert!(params.validate().is_err());
        params.barrier_probability = 1.0;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let presets = NetParams::presets();
        assert_eq!(presets.len(), 10);
        assert_eq!(presets[0].0, "5x5");
        assert_eq!(presets[9].0, "13x11 wrapping");

        let p = NetParams::preset("9x9 Wrapping").expect("preset exists");
        assert_eq!((p.width, p.height, p.wrapping), (9, 9, true));
        assert!(NetParams::preset("4x4").is_none());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParamsError::SingleCell.to_string(),
            "At least one of width and height must be greater than 1"
        );
    }
}
