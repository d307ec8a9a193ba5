/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers working on the puzzle generators.
//!
//! # Examples
//!
//! List the Net presets:
//!
//! ```text
//! $ net-puzzles --ls
//! 5x5
//! 7x7
//! ...
//! 13x11 wrapping
//! ```
//!
//! Generate three 7x7 wrapping puzzles with barriers, and print some statistics:
//!
//! ```text
//! $ net-puzzles -p "7x7 wrapping" -b 0.3 -c 3 -s
//! ```
//!
//! Play two moves on a puzzle, then save it:
//!
//! ```text
//! $ net-puzzles -W 4 -H 4 --seed 12 -m a:1,1 -m l:0,0 --save /tmp/net
//! ```

use clap::{Parser, ValueEnum};
use log::debug;
use rand::Rng;
use std::env;
use std::path::PathBuf;

use net_puzzles::decanting::{DecantParams, DecantState};
use net_puzzles::draw;
use net_puzzles::game::{Descriptor, Game};
use net_puzzles::generator::{self, Puzzle};
use net_puzzles::generator::params::NetParams;
use net_puzzles::moves::{self, Move};
use net_puzzles::saver::game::SaverGame;
use net_puzzles::state::{NetState, RotateDir};
use net_puzzles::topology::{Coord, seeded_rng};

const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPL-3.0-or-later <https://www.gnu.org/licenses/>";

/// Puzzle to work on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum GameKind {
    Net,
    Decanting,
}

/// Generate and play Net and Decanting puzzles from the command line.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the presets
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Puzzle to generate
    #[arg(value_enum, short, long, default_value_t = GameKind::Net)]
    game: GameKind,

    /// Name of a preset, such as "9x9 wrapping" or "Hard"
    #[arg(short, long)]
    preset: Option<String>,

    /// Width of the Net grid
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the Net grid
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Connect the edges of the Net grid to the opposite edges
    #[arg(short, long, default_value_t = false)]
    wrapping: bool,

    /// Barrier probability for Net, between 0 and 1
    #[arg(short, long, default_value_t = 0.0)]
    barriers: f32,

    /// Number of Decanting colours
    #[arg(long)]
    colours: Option<usize>,

    /// Number of Decanting tubes
    #[arg(long)]
    tubes: Option<usize>,

    /// Number of Decanting layers
    #[arg(long)]
    layers: Option<usize>,

    /// Hide the Decanting layers below the top of each tube
    #[arg(long, default_value_t = false)]
    hidden: bool,

    /// Seed of the first puzzle (random by default)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of puzzles to generate, with consecutive seeds
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Print the solution of each Net puzzle
    #[arg(long, default_value_t = false)]
    solution: bool,

    /// Moves to play. Net: a:X,Y (anticlockwise), c:X,Y (clockwise), l:X,Y (lock), undo, redo,
    /// restart, solve. Decanting: FROM,TO
    #[arg(short, long)]
    moves: Vec<String>,

    /// Directory where the Net game is saved after the moves
    #[arg(long)]
    save: Option<PathBuf>,

    /// Directory where a Net game was saved, to continue it
    #[arg(long, conflicts_with = "preset")]
    load: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        println!("DEBUG");
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the presets
    //
    if args.ls {
        match args.game {
            GameKind::Net => {
                for (name, _) in NetParams::presets() {
                    println!("{name}");
                }
            }
            GameKind::Decanting => {
                for (name, p) in DecantParams::presets() {
                    println!(
                        "{name}: {} colours, {} tubes, {} layers",
                        p.colours, p.tubes, p.layers
                    );
                }
            }
        }
        return 0;
    }

    match args.game {
        GameKind::Net => run_net(&args),
        GameKind::Decanting => run_decanting(&args),
    }
}

/// Net parameters from the preset or from the individual options.
fn net_params(args: &Args) -> Result<NetParams, String> {
    let mut params: NetParams = match &args.preset {
        Some(name) => NetParams::preset(name)
            .ok_or_else(|| format!("Unknown preset {name}. Use --ls to list the presets."))?,
        None => NetParams::default(),
    };
    if let Some(w) = args.width {
        params.width = w;
    }
    if let Some(h) = args.height {
        params.height = h;
    }
    params.wrapping |= args.wrapping;
    params.barrier_probability = args.barriers;
    params.validate().map_err(|e| e.to_string())?;
    Ok(params)
}

/// Parse a Net move such as `a:2,3`.
fn parse_net_move(text: &str) -> Result<Move, String> {
    let (kind, position) = text
        .split_once(':')
        .ok_or_else(|| format!("Invalid move {text}: expecting a:X,Y, c:X,Y, or l:X,Y"))?;
    let (x, y) = parse_pair(position)?;
    let cell: Coord = Coord::new(x, y);
    match kind {
        "a" => Ok(Move::Rotate {
            cell,
            dir: RotateDir::Anticlockwise,
        }),
        "c" => Ok(Move::Rotate {
            cell,
            dir: RotateDir::Clockwise,
        }),
        "l" => Ok(Move::ToggleLock { cell }),
        _ => Err(format!("Invalid move {text}: unknown move type {kind}")),
    }
}

/// Parse two numbers separated by a comma.
fn parse_pair(text: &str) -> Result<(usize, usize), String> {
    let (a, b) = text
        .split_once(',')
        .ok_or_else(|| format!("Invalid position {text}: expecting two numbers"))?;
    let a: usize = a
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number {a} in {text}"))?;
    let b: usize = b
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number {b} in {text}"))?;
    Ok((a, b))
}

/// Play a command-line move on the game. Return an error for unparsable moves.
fn play(game: &mut Game, text: &str) -> Result<(), String> {
    let changed: bool = match text {
        "undo" => game.undo(),
        "redo" => game.redo(),
        "restart" => {
            game.restart();
            true
        }
        "solve" => game.solve(),
        _ => game.apply(parse_net_move(text)?),
    };
    if !changed {
        println!("Move {text}: no change");
    }
    Ok(())
}

/// Print a Net position.
fn print_state(state: &NetState) {
    print!("{}", draw::text_format(state));
}

fn run_net(args: &Args) -> u8 {
    if let Some(dir) = &args.load {
        let saver: SaverGame = SaverGame::new(dir.clone());
        return match saver.get_game() {
            Ok(Some(game)) => play_and_save(args, game),
            Ok(None) => {
                eprintln!("No saved game in {}", dir.display());
                1
            }
            Err(e) => {
                eprintln!("Cannot load the saved game: {e}");
                1
            }
        };
    }

    let params: NetParams = match net_params(args) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("Error: {msg}");
            return 1;
        }
    };
    let first_seed: u64 = args.seed.unwrap_or_else(|| rand::rng().random());

    if !args.moves.is_empty() || args.save.is_some() {
        if args.count != 1 {
            eprintln!("Error: moves and --save work on a single puzzle");
            return 1;
        }
        return match Game::new(params, first_seed) {
            Ok(game) => play_and_save(args, game),
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        };
    }

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut barriers: usize = 0;
    for i in 0..args.count {
        let seed: u64 = first_seed.wrapping_add(i as u64);
        debug!("Iteration {i}, seed {seed}");

        let puzzle: Puzzle = match generator::new_puzzle(&params, seed) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        };
        total += puzzle.duration;
        if puzzle.duration > max {
            max = puzzle.duration;
        }
        barriers += puzzle.num_barriers;

        println!("{}", Descriptor { params, seed });
        print_state(&puzzle.state);
        if args.solution
            && let Some(solved) = moves::solve(&puzzle.state, &puzzle.solution)
        {
            println!("Solution:");
            print_state(&solved);
        }
        println!();
    }

    // Print some stats
    if args.summary && args.count > 0 {
        println!(
            "
     total time = {}s
   average time = {}s
       max time = {}s
average barriers = {}",
            total,
            total / args.count as f32,
            max,
            barriers as f32 / args.count as f32,
        );
    }
    0
}

/// Play the moves from the command line, print the result, and save the game if requested.
fn play_and_save(args: &Args, mut game: Game) -> u8 {
    println!("{}", game.descriptor());
    for text in &args.moves {
        if let Err(msg) = play(&mut game, text) {
            eprintln!("Error: {msg}");
            return 1;
        }
    }
    print_state(game.state());
    if args.solution {
        println!("Solution:");
        let mut solved: Game = game.clone();
        solved.solve();
        print_state(solved.state());
    }

    if let Some(dir) = &args.save {
        let saver: SaverGame = SaverGame::new(dir.clone());
        if let Err(e) = saver.save_game(&game) {
            eprintln!("Cannot save the game: {e}");
            return 1;
        }
        println!("Game saved in {}", saver.save_file().display());
    }
    0
}

fn run_decanting(args: &Args) -> u8 {
    let mut params: DecantParams = match &args.preset {
        Some(name) => match DecantParams::preset(name) {
            Some(p) => p,
            None => {
                eprintln!("Unknown preset {name}. Use --ls --game decanting to list the presets.");
                return 1;
            }
        },
        None => DecantParams::default(),
    };
    if let Some(c) = args.colours {
        params.colours = c;
    }
    if let Some(t) = args.tubes {
        params.tubes = t;
    }
    if let Some(l) = args.layers {
        params.layers = l;
    }
    params.hidden_layers |= args.hidden;

    let seed: u64 = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut state: DecantState = match DecantState::new_game(params, &mut seeded_rng(seed)) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {msg}");
            return 1;
        }
    };
    println!("Decanting seed {seed}");

    for text in &args.moves {
        let (from, to) = match parse_pair(text) {
            Ok(pair) => pair,
            Err(msg) => {
                eprintln!("Error: {msg}");
                return 1;
            }
        };
        match state.pour(from, to) {
            Some(s) => state = s,
            None => println!("Move {text}: no change"),
        }
    }

    print!("{}", state.text_format());
    if state.solved {
        println!("SOLVED!");
    }
    0
}
