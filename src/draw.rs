/*
draw.rs

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

//! Decide what to draw.
//!
//! The drawing primitives belong to the front end, which implements the [`Frontend`] trait.
//! [`DrawState`] remembers what the front end currently shows, and only asks it to draw the
//! tiles that changed since the previous frame.

use log::{Level, debug, log_enabled};

use crate::solver::ActiveMap;
use crate::state::{CellBarriers, NetState};
use crate::topology::{Coord, DirSet, Direction, Grid};

/// Duration in seconds of a tile rotation animation.
pub const ROTATE_TIME: f32 = 0.1;

/// Duration in seconds of one frame of the completion flash.
pub const FLASH_FRAME: f32 = 0.05;

/// Everything that changes the appearance of a tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileView {
    pub links: DirSet,

    /// Shown locked. During the completion flash this is not the real lock state.
    pub locked: bool,

    /// Connected to the center.
    pub active: bool,

    pub barriers: CellBarriers,
}

/// Piece of barrier drawn outside the grid, next to the border cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BorderSegment {
    /// Barrier along the given edge of the outside position.
    Edge(Direction),

    /// Corner piece, named like [`CellBarriers::corners`].
    Corner(Direction),
}

/// Drawing primitives provided by the front end.
pub trait Frontend {
    /// Draw a tile. `angle` is in degrees, anticlockwise, and is not zero only for the tile
    /// being rotated.
    fn draw_tile(&mut self, cell: Coord, view: &TileView, angle: f32);

    /// Draw a barrier piece at a position just outside the grid (`x` or `y` is -1, or equal to
    /// the width or height of the grid).
    fn draw_border_barrier(&mut self, x: isize, y: isize, segment: BorderSegment);

    /// Display the status text.
    fn status_bar(&mut self, text: &str);
}

/// What the front end currently displays.
#[derive(Debug, Clone, Default)]
pub struct DrawState {
    /// Whether the first frame, with the exterior barriers, has been drawn.
    started: bool,

    /// Last drawn view of each tile. `None` means that the tile must be drawn again.
    visible: Vec<Option<TileView>>,
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a frame.
    ///
    /// `old` is the previous state while a move is being animated, `anim_time` the time
    /// elapsed in the rotation animation, and `flash_time` the time elapsed in the completion
    /// flash (zero when there is no flash).
    pub fn redraw(
        &mut self,
        frontend: &mut dyn Frontend,
        old: Option<&NetState>,
        new: &NetState,
        anim_time: f32,
        flash_time: f32,
    ) {
        let grid: Grid = *new.grid();

        if !self.started || self.visible.len() != grid.len() {
            self.started = true;
            self.visible = vec![None; grid.len()];
            draw_exterior_barriers(frontend, new);
        }

        // Rotation animation: draw the previous state, with the turning tile at an angle
        let mut state: &NetState = new;
        let mut turning: Option<Coord> = None;
        let mut angle: f32 = 0.0;
        if let Some(old) = old
            && anim_time < ROTATE_TIME
            && old.grid() == new.grid()
            && let Some(cell) = rotating_tile(old, new)
        {
            angle = rotation_angle(old, new, cell, anim_time);
            turning = Some(cell);
            state = old;
        }

        let frame: Option<i32> = if flash_time > 0.0 {
            Some((flash_time / FLASH_FRAME) as i32)
        } else {
            None
        };

        let active: ActiveMap = state.compute_active();
        let center: Coord = grid.center();
        let mut drawn: usize = 0;

        for cell in grid.cells() {
            let i: usize = grid.index(cell);
            let tile = state.tiles()[i];
            let mut view: TileView = TileView {
                links: tile.links,
                locked: tile.locked,
                active: active.is_active_index(i),
                barriers: state.barriers()[i],
            };

            if let Some(frame) = frame {
                let dist: i32 = cell.x.abs_diff(center.x).max(cell.y.abs_diff(center.y)) as i32;
                if frame >= dist && frame < dist + 4 {
                    view.locked = (frame - dist) & 1 == 1;
                }
            }

            if turning == Some(cell) {
                frontend.draw_tile(cell, &view, angle);
                // Whatever comes next, this tile has to be drawn again
                self.visible[i] = None;
                drawn += 1;
            } else if self.visible[i] != Some(view) {
                frontend.draw_tile(cell, &view, 0.0);
                self.visible[i] = Some(view);
                drawn += 1;
            }
        }

        if log_enabled!(Level::Debug) && drawn > 0 {
            debug!("Redraw: {drawn} tiles drawn");
        }

        frontend.status_bar(&status_text(state, &active));
    }
}

/// Draw the barriers of the border cells again just outside the grid, so that they look
/// like a frame around the puzzle.
fn draw_exterior_barriers(frontend: &mut dyn Frontend, state: &NetState) {
    let grid: &Grid = state.grid();
    let w: isize = grid.width() as isize;
    let h: isize = grid.height() as isize;
    let barrier = |x: usize, y: usize| -> CellBarriers {
        state.barriers()[grid.index(Coord::new(x, y))]
    };

    // For each side: the side of the border cell, the mirrored edge, and the corner mapping
    // from the border cell to the outside position.
    for x in 0..grid.width() {
        let top: CellBarriers = barrier(x, 0);
        let outside: (isize, isize) = (x as isize, -1);
        mirror(
            frontend,
            top,
            outside,
            Direction::Up,
            &[(Direction::Up, Direction::Left), (Direction::Right, Direction::Down)],
        );

        let bottom: CellBarriers = barrier(x, grid.height() - 1);
        let outside: (isize, isize) = (x as isize, h);
        mirror(
            frontend,
            bottom,
            outside,
            Direction::Down,
            &[(Direction::Down, Direction::Right), (Direction::Left, Direction::Up)],
        );
    }

    for y in 0..grid.height() {
        let left: CellBarriers = barrier(0, y);
        let outside: (isize, isize) = (-1, y as isize);
        mirror(
            frontend,
            left,
            outside,
            Direction::Left,
            &[(Direction::Up, Direction::Right), (Direction::Left, Direction::Down)],
        );

        let right: CellBarriers = barrier(grid.width() - 1, y);
        let outside: (isize, isize) = (w, y as isize);
        mirror(
            frontend,
            right,
            outside,
            Direction::Right,
            &[(Direction::Right, Direction::Up), (Direction::Down, Direction::Left)],
        );
    }
}

/// Draw the outside copy of the barriers of one border cell.
fn mirror(
    frontend: &mut dyn Frontend,
    barriers: CellBarriers,
    (x, y): (isize, isize),
    side: Direction,
    corners: &[(Direction, Direction)],
) {
    for (inside, outside) in corners {
        if barriers.corners.contains(*inside) {
            frontend.draw_border_barrier(x, y, BorderSegment::Corner(*outside));
        }
    }
    if barriers.edges.contains(side) {
        frontend.draw_border_barrier(x, y, BorderSegment::Edge(side.opposite()));
    }
}

/// Return the first tile, in column-major order, whose links differ between the two states.
fn rotating_tile(old: &NetState, new: &NetState) -> Option<Coord> {
    let grid: &Grid = old.grid();
    (0..grid.width())
        .flat_map(|x| (0..grid.height()).map(move |y| Coord::new(x, y)))
        .find(|cell| {
            let i: usize = grid.index(*cell);
            old.tiles()[i].links != new.tiles().get(i).map(|t| t.links).unwrap_or_default()
        })
}

/// Angle of the rotating tile, in degrees.
///
/// The tile turns in the direction of the last rotation, or the other way when the new state
/// is not that rotation of the old one (the move is being undone).
fn rotation_angle(old: &NetState, new: &NetState, cell: Coord, anim_time: f32) -> f32 {
    let steps: i32 = new.last_rotate_dir.steps();
    let before: DirSet = old.tile(cell).map(|t| t.links).unwrap_or_default();
    let after: DirSet = new.tile(cell).map(|t| t.links).unwrap_or_default();
    let sign: f32 = if after == before.rotate(steps) { 1.0 } else { -1.0 };
    sign * steps as f32 * 90.0 * (anim_time / ROTATE_TIME)
}

/// Status bar text.
pub fn status_text(state: &NetState, active: &ActiveMap) -> String {
    format!(
        "{}Active: {}/{}",
        if state.completed { "COMPLETED! " } else { "" },
        active.count(),
        active.len()
    )
}

/// Length of the animation between two states: a rotation if any tile turned.
pub fn anim_length(old: &NetState, new: &NetState) -> f32 {
    if old.grid() == new.grid() && old.links() != new.links() {
        ROTATE_TIME
    } else {
        0.0
    }
}

/// Length of the completion flash: only when the new state has just been completed.
pub fn flash_length(old: &NetState, new: &NetState) -> f32 {
    if old.completed || !new.completed {
        return 0.0;
    }
    let grid: &Grid = new.grid();
    let center: Coord = grid.center();
    let size: usize = (center.x + 1)
        .max(center.y + 1)
        .max(grid.width() - center.x)
        .max(grid.height() - center.y);
    FLASH_FRAME * (size + 4) as f32
}

/// Box-drawing character for a connection mask, indexed by the mask bits.
const BOX_CHARS: [char; 16] = [
    ' ', '╶', '╵', '└', '╴', '─', '┘', '┴', '╷', '┌', '│', '├', '┐', '┬', '┤', '┼',
];

/// Text rendering of the grid: one box-drawing character per tile, followed by the status
/// line. Locked tiles are not shown.
pub fn text_format(state: &NetState) -> String {
    let grid: &Grid = state.grid();
    let mut out: String = String::with_capacity((grid.width() + 1) * grid.height() + 32);
    for (i, tile) in state.tiles().iter().enumerate() {
        out.push(BOX_CHARS[tile.links.bits() as usize]);
        if (i + 1) % grid.width() == 0 {
            out.push('\n');
        }
    }
    out.push_str(&status_text(state, &state.compute_active()));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{self, params::NetParams};
    use crate::moves::{self, Move};
    use crate::state::RotateDir;

    /// Front end that records the drawing calls.
    #[derive(Default)]
    struct Recorder {
        tiles: Vec<(Coord, TileView, f32)>,
        border: Vec<(isize, isize, BorderSegment)>,
        status: Vec<String>,
    }

    impl Frontend for Recorder {
        fn draw_tile(&mut self, cell: Coord, view: &TileView, angle: f32) {
            self.tiles.push((cell, *view, angle));
        }

        fn draw_border_barrier(&mut self, x: isize, y: isize, segment: BorderSegment) {
            self.border.push((x, y, segment));
        }

        fn status_bar(&mut self, text: &str) {
            self.status.push(text.to_string());
        }
    }

    fn puzzle(w: usize, h: usize, wrapping: bool) -> generator::Puzzle {
        generator::new_puzzle(&NetParams::new(w, h, wrapping), 6).expect("valid")
    }

    fn rotate(state: &NetState, x: usize, y: usize, dir: RotateDir) -> NetState {
        let mv = Move::Rotate {
            cell: Coord::new(x, y),
            dir,
        };
        moves::make_move(state, mv).expect("moved")
    }

    #[test]
    fn test_first_frame_draws_everything() {
        let p = puzzle(4, 3, false);
        let mut ds = DrawState::new();
        let mut rec = Recorder::default();
        ds.redraw(&mut rec, None, &p.state, 0.0, 0.0);

        assert_eq!(rec.tiles.len(), 12);
        assert!(rec.tiles.iter().all(|(_, _, angle)| *angle == 0.0));
        // Each border cell side is mirrored outside: 2 * (4 + 3) edges
        let edges = rec
            .border
            .iter()
            .filter(|(_, _, s)| matches!(s, BorderSegment::Edge(_)))
            .count();
        assert_eq!(edges, 14);
        assert!(rec.border.contains(&(0, -1, BorderSegment::Edge(Direction::Down))));
        assert!(rec.border.contains(&(4, 2, BorderSegment::Edge(Direction::Left))));
        assert_eq!(rec.status.len(), 1);

        // Nothing changed: nothing drawn, except the status bar
        let mut rec = Recorder::default();
        ds.redraw(&mut rec, None, &p.state, 0.0, 0.0);
        assert!(rec.tiles.is_empty());
        assert!(rec.border.is_empty());
        assert_eq!(rec.status.len(), 1);
    }

    #[test]
    fn test_wrapping_grid_has_no_exterior_barriers() {
        let p = puzzle(4, 4, true);
        let mut rec = Recorder::default();
        DrawState::new().redraw(&mut rec, None, &p.state, 0.0, 0.0);
        assert!(rec.border.is_empty());
    }

    #[test]
    fn test_rotation_animation() {
        let p = puzzle(3, 3, true);
        let mut ds = DrawState::new();
        ds.redraw(&mut Recorder::default(), None, &p.state, 0.0, 0.0);

        let new = rotate(&p.state, 2, 1, RotateDir::Clockwise);
        assert_eq!(anim_length(&p.state, &new), ROTATE_TIME);

        let mut rec = Recorder::default();
        ds.redraw(&mut rec, Some(&p.state), &new, ROTATE_TIME / 2.0, 0.0);
        let (cell, view, angle) = rec
            .tiles
            .iter()
            .find(|(_, _, a)| *a != 0.0)
            .copied()
            .expect("rotating tile");
        assert_eq!(cell, Coord::new(2, 1));
        // Drawn from the old state, half way through a clockwise quarter turn
        assert_eq!(view.links, p.state.tile(cell).expect("in grid").links);
        assert!((angle + 45.0).abs() < 1e-4);

        // Undoing the same move turns the tile the other way
        let mut rec = Recorder::default();
        ds.redraw(&mut rec, Some(&new), &p.state, ROTATE_TIME / 2.0, 0.0);
        let (_, _, angle) = rec
            .tiles
            .iter()
            .find(|(c, _, _)| *c == Coord::new(2, 1))
            .copied()
            .expect("rotating tile");
        // Undoing a clockwise turn is an anticlockwise turn
        assert!((angle - 45.0).abs() < 1e-4);

        // At the end of the animation, the new state is drawn flat
        let mut rec = Recorder::default();
        ds.redraw(&mut rec, Some(&p.state), &new, ROTATE_TIME, 0.0);
        let (_, view, angle) = rec
            .tiles
            .iter()
            .find(|(c, _, _)| *c == Coord::new(2, 1))
            .copied()
            .expect("redrawn tile");
        assert_eq!(angle, 0.0);
        assert_eq!(view.links, new.tile(Coord::new(2, 1)).expect("in grid").links);
    }

    #[test]
    fn test_lock_has_no_animation() {
        let p = puzzle(3, 3, false);
        let locked = moves::make_move(
            &p.state,
            Move::ToggleLock {
                cell: Coord::new(0, 0),
            },
        )
        .expect("locked");
        assert_eq!(anim_length(&p.state, &locked), 0.0);
        assert_eq!(flash_length(&p.state, &locked), 0.0);
    }

    #[test]
    fn test_flash_length() {
        let p = puzzle(5, 3, false);
        let solved = moves::solve(&p.state, &p.solution).expect("matching grid");
        // Center (2,1): size = max(3, 2, 3, 2) = 3
        assert!((flash_length(&p.state, &solved) - FLASH_FRAME * 7.0).abs() < 1e-6);
        assert_eq!(flash_length(&solved, &solved), 0.0);
    }

    #[test]
    fn test_flash_toggles_lock_appearance() {
        let p = puzzle(5, 5, false);
        let solved = moves::solve(&p.state, &p.solution).expect("matching grid");
        let mut ds = DrawState::new();
        ds.redraw(&mut Recorder::default(), None, &solved, 0.0, 0.0);

        // Frame 1: the center (distance 0) shows locked, distance 1 shows unlocked
        let mut rec = Recorder::default();
        ds.redraw(&mut rec, None, &solved, 0.0, FLASH_FRAME * 1.5);
        let center = rec
            .tiles
            .iter()
            .find(|(c, _, _)| *c == Coord::new(2, 2))
            .expect("center drawn");
        assert!(center.1.locked);
        assert!(rec.tiles.iter().all(|(c, _, _)| *c == Coord::new(2, 2)));
        assert_eq!(rec.status, vec!["COMPLETED! Active: 25/25".to_string()]);

        // Frame 2: the ring at distance 1 shows locked, the center is back to unlocked
        let mut rec = Recorder::default();
        ds.redraw(&mut rec, None, &solved, 0.0, FLASH_FRAME * 2.5);
        assert_eq!(rec.tiles.len(), 9);
        for (cell, view, _) in &rec.tiles {
            let ring: bool = *cell != Coord::new(2, 2);
            assert_eq!(view.locked, ring, "tile {cell:?}");
        }
        let corner = rec
            .tiles
            .iter()
            .find(|(c, _, _)| *c == Coord::new(1, 1))
            .expect("distance 1 drawn");
        assert!(corner.1.locked);
    }

    #[test]
    fn test_old_state_of_another_size_is_not_animated() {
        let small = puzzle(3, 3, false);
        let large = puzzle(4, 4, false);
        let mut ds = DrawState::new();
        let mut rec = Recorder::default();
        ds.redraw(&mut rec, Some(&small.state), &large.state, ROTATE_TIME / 2.0, 0.0);
        assert_eq!(rec.tiles.len(), 16);
        assert!(rec.tiles.iter().all(|(_, _, angle)| *angle == 0.0));
        assert_eq!(anim_length(&small.state, &large.state), 0.0);
    }

    #[test]
    fn test_text_format() {
        let p = puzzle(2, 2, false);
        let solved = moves::solve(&p.state, &p.solution).expect("matching grid");
        let text = text_format(&solved);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), 2);
        assert_eq!(lines[2], "COMPLETED! Active: 4/4");
        assert!(!text.contains('┼'));

        let horizontal = DirSet::from_directions(&[Direction::Right, Direction::Left]);
        assert_eq!(BOX_CHARS[horizontal.bits() as usize], '─');
        let vertical = DirSet::from_directions(&[Direction::Up, Direction::Down]);
        assert_eq!(BOX_CHARS[vertical.bits() as usize], '│');
    }
}
