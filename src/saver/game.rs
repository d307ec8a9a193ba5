/*
game.rs

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

//! Save and restore the game in progress.
//!
//! The game status is saved in the `savegame.json` file.
//!
//! Only the puzzle descriptor (parameters and seed) and the history of positions are saved.
//! When loading, the puzzle is generated again from its descriptor to retrieve the solution,
//! and the derived `active` flags of the tiles are recomputed.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::game::{Descriptor, Game};
use crate::history::History;

/// Content of the save file.
#[derive(Serialize, Deserialize, Debug)]
struct SavedGame {
    /// Date and time when the game was saved.
    saved_at: DateTime<Utc>,

    descriptor: Descriptor,
    history: History,
    user_has_cheated: bool,
}

/// Object to save and restore a puzzle in progress.
pub struct SaverGame {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverGame {
    /// Create a [`SaverGame`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the puzzle must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("savegame.json");
        debug!("Save game file: {data_dir:?}");
        SaverGame {
            save_file: data_dir,
        }
    }

    pub fn save_file(&self) -> &Path {
        &self.save_file
    }

    /// Retrieve the [`Game`] object for the saved puzzle.
    ///
    /// Return the [`Game`] object or None if there is no saved puzzle.
    pub fn get_game(&self) -> Result<Option<Game>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let saved: SavedGame = serde_json::from_reader(reader)?;
        debug!(
            "Loading game {} saved on {}",
            saved.descriptor,
            saved.saved_at.to_rfc3339()
        );

        let mut game: Game = Game::with_history(&saved.descriptor, saved.history)?;
        game.user_has_cheated = saved.user_has_cheated;
        Ok(Some(game))
    }

    /// Save the provided [`Game`] object.
    pub fn save_game(&self, game: &Game) -> Result<(), Box<dyn Error>> {
        let saved: SavedGame = SavedGame {
            saved_at: Utc::now(),
            descriptor: game.descriptor(),
            history: game.history().clone(),
            user_has_cheated: game.user_has_cheated,
        };
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, &saved)?;
        writer.flush()?;
        debug!("Game {} saved", saved.descriptor);
        Ok(())
    }

    /// Delete the saved game.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
