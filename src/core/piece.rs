//! Piece module - the falling three-tile unit
//!
//! A piece occupies a single column of the grid: with its position at
//! (x, y), `tiles[i]` sits at row `y - i`, so `tiles[0]` is the bottom tile
//! and `tiles[2]` the top one. Rows above the grid top simply are not there
//! yet; they are neither drawn nor collision-checked.
//!
//! Movement is collision-checked against the grid but never mutates it; the
//! engine consolidates the tiles into the grid only at lock-in.

use crate::core::grid::Grid;
use crate::core::rng::Randomizer;
use crate::types::MAX_TILE;

/// The falling unit under player control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Piece {
    /// Tile colors bottom to top; values in `1..=MAX_TILE`.
    pub tiles: [u8; 3],
    /// Column of the piece in the grid.
    pub x: i32,
    /// Row of the piece's bottom tile. Only ever increases while falling;
    /// it resets to 0 when the piece respawns.
    pub y: i32,
}

impl Piece {
    /// Create a piece with freshly randomized tiles at (0, 0).
    pub fn new(rng: &mut dyn Randomizer) -> Self {
        let mut piece = Self::default();
        piece.randomize(rng);
        piece
    }

    /// Assign all three slots a random color in `1..=MAX_TILE`.
    pub fn randomize(&mut self, rng: &mut dyn Randomizer) {
        for tile in &mut self.tiles {
            *tile = rng.below(MAX_TILE as u32) as u8 + 1;
        }
    }

    /// Move one column left if that cell is inside the grid and empty.
    pub fn move_left(&mut self, grid: &Grid) {
        if self.x > 0 && grid.is_empty(self.x - 1, self.y) {
            self.x -= 1;
        }
    }

    /// Move one column right if that cell is inside the grid and empty.
    pub fn move_right(&mut self, grid: &Grid) {
        if self.x < grid.width() as i32 - 1 && grid.is_empty(self.x + 1, self.y) {
            self.x += 1;
        }
    }

    /// Move one row down. Returns false if the piece cannot fall further,
    /// which is the signal to lock it into the grid.
    pub fn move_down(&mut self, grid: &Grid) -> bool {
        if self.y < grid.height() as i32 - 1 && grid.is_empty(self.x, self.y + 1) {
            self.y += 1;
            return true;
        }
        false
    }

    /// Shift the tile stack downward: `[a, b, c] -> [c, a, b]`.
    ///
    /// Rotation never changes the piece's footprint, so no collision check
    /// is needed.
    pub fn rotate(&mut self) {
        self.tiles.rotate_right(1);
    }

    /// Take over the tiles of `next` and reset to the spawn position.
    pub fn reset_from(&mut self, next: &Piece, spawn_column: i32) {
        self.tiles = next.tiles;
        self.x = spawn_column;
        self.y = 0;
    }
}
