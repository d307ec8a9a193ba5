/*
lib.rs

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

//! Net and Decanting puzzles.
//!
//! Net is a pipe-rotation puzzle: the tiles of a grid carry pipe segments, and the player turns
//! them until every tile is connected to the power source in the center.
//! The crate generates Net puzzles ([`generator`]), finds the tiles connected to the center
//! ([`solver`]), applies player moves ([`moves`], [`player_input`]), keeps the undo history
//! ([`history`]), tells a front end what to draw ([`draw`]), and saves games in progress
//! ([`saver`]). [`game::Game`] ties everything together for one game.
//!
//! Decanting ([`decanting`]) is a liquid-sorting puzzle played with tubes.

pub mod decanting;
pub mod draw;
pub mod game;
pub mod generator;
pub mod history;
pub mod moves;
pub mod player_input;
pub mod saver;
pub mod solver;
pub mod state;
pub mod topology;
