/*
player_input.rs

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

//! Translate mouse clicks into Net moves.
//!
//! All moves in Net are made with the mouse:
//!
//! * The left button turns the clicked tile anticlockwise.
//! * The right button turns it clockwise.
//! * The middle button locks or unlocks it. A locked tile cannot be turned, so that players
//!   can mark the tiles they are sure about.

use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::FromRepr;

use crate::generator::params::NetParams;
use crate::moves::Move;
use crate::state::{NetState, RotateDir};
use crate::topology::Coord;

/// Size of a tile in pixels, including one border line.
pub const TILE_SIZE: i32 = 32;

/// Width of the line between tiles.
pub const TILE_BORDER: i32 = 1;

/// Margin around the grid.
pub const WINDOW_OFFSET: i32 = 16;

/// Mouse buttons, numbered the way the front ends report them.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(u32)]
pub enum Button {
    Left = 1,
    Middle = 2,
    Right = 3,
}

/// Size in pixels of the play area for the given parameters.
pub fn game_size(params: &NetParams) -> (i32, i32) {
    (
        WINDOW_OFFSET * 2 + TILE_SIZE * params.width as i32 + TILE_BORDER,
        WINDOW_OFFSET * 2 + TILE_SIZE * params.height as i32 + TILE_BORDER,
    )
}

/// Return the cell under the given pixel, or `None` outside the grid or on a tile border.
pub fn pixel_to_cell(state: &NetState, px: i32, py: i32) -> Option<Coord> {
    let x: i32 = px - WINDOW_OFFSET - TILE_BORDER;
    let y: i32 = py - WINDOW_OFFSET - TILE_BORDER;
    if x < 0 || y < 0 {
        return None;
    }
    if x % TILE_SIZE >= TILE_SIZE - TILE_BORDER || y % TILE_SIZE >= TILE_SIZE - TILE_BORDER {
        return None;
    }
    let cell: Coord = Coord::new((x / TILE_SIZE) as usize, (y / TILE_SIZE) as usize);
    if !state.grid().contains(cell) {
        return None;
    }
    Some(cell)
}

/// Translate a click into a move. Clicks that do not land on a tile are ignored.
pub fn interpret_click(state: &NetState, px: i32, py: i32, button: Button) -> Option<Move> {
    let cell: Coord = pixel_to_cell(state, px, py)?;
    let mv: Move = match button {
        Button::Left => Move::Rotate {
            cell,
            dir: RotateDir::Anticlockwise,
        },
        Button::Right => Move::Rotate {
            cell,
            dir: RotateDir::Clockwise,
        },
        Button::Middle => Move::ToggleLock { cell },
    };
    debug!("Click at ({px},{py}) with {button:?}: {mv:?}");
    Some(mv)
}

/// Same as [`interpret_click`], but with the raw button number from the front end.
/// Buttons other than the first three are ignored.
pub fn interpret_raw_click(state: &NetState, px: i32, py: i32, button: u32) -> Option<Move> {
    interpret_click(state, px, py, Button::from_repr(button)?)
}
