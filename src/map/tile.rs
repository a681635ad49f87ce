//! Tiles and the scrollable grid
//!
//! The camera never moves: the player is drawn at a fixed screen
//! position and the *world* scrolls underneath it. "Player moves right"
//! is therefore "every tile shifts left", and collision is a post-hoc
//! test: shift the whole grid, then check whether any collidable tile now
//! coincides exactly with the player's fixed position. If one does, the
//! entire shift for that axis is reverted in one corrective pass; any one
//! blocking tile cancels the whole requested scroll.
//!
//! Coincidence testing is exact, not a bounding-box overlap, so the model
//! is only correct when each scroll delta equals exactly one tile
//! dimension. That constraint is a documented invariant of the callers,
//! not something the grid enforces.

use super::data::{MapData, COLLIDABLE_CODE};

/// A scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One grid cell: a screen position, the atlas code it is drawn with, and
/// whether actors collide with it. The code and the collidable flag are
/// fixed at grid construction; only the position moves.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    x: i32,
    y: i32,
    code: u8,
    collidable: bool,
}

impl Tile {
    pub fn new(x: i32, y: i32, code: u8, collidable: bool) -> Self {
        Self {
            x,
            y,
            code,
            collidable,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Atlas index this tile is drawn with.
    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn is_collidable(&self) -> bool {
        self.collidable
    }

    fn shift(&mut self, axis: Axis, amount: i32) {
        match axis {
            Axis::X => self.x += amount,
            Axis::Y => self.y += amount,
        }
    }
}

/// The full matrix of tiles composing the scrollable world.
#[derive(Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    rows: usize,
    cols: usize,
}

impl TileGrid {
    /// Build the grid from map data. Cell `(row, col)` starts at
    /// `origin + (col * tile_width, row * tile_height)`; cells whose code
    /// is the collidable code block the player.
    pub fn new(map: &MapData, origin: (i32, i32)) -> Self {
        let mut tiles = Vec::with_capacity(map.map_width * map.map_height);
        for row in 0..map.map_height {
            for col in 0..map.map_width {
                let code = map.cell(row, col);
                tiles.push(Tile::new(
                    origin.0 + col as i32 * map.tile_width,
                    origin.1 + row as i32 * map.tile_height,
                    code,
                    code == COLLIDABLE_CODE,
                ));
            }
        }
        Self {
            tiles,
            rows: map.map_height,
            cols: map.map_width,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile(&self, row: usize, col: usize) -> &Tile {
        &self.tiles[row * self.cols + col]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Scroll the whole grid by `amount` along `axis`, then revert the
    /// entire shift if any collidable tile now coincides with
    /// `player_pos`. Movement is all-or-nothing per axis per call.
    ///
    /// Returns the accepted delta: `amount` if the scroll stands, 0 if it
    /// was reverted. A zero `amount` is a harmless no-op that still
    /// re-checks collision.
    pub fn translate(&mut self, axis: Axis, amount: i32, player_pos: (i32, i32)) -> i32 {
        for tile in &mut self.tiles {
            tile.shift(axis, amount);
        }

        let blocked = self
            .tiles
            .iter()
            .any(|tile| tile.collidable && tile.position() == player_pos);

        if blocked {
            for tile in &mut self.tiles {
                tile.shift(axis, -amount);
            }
            0
        } else {
            amount
        }
    }
}
