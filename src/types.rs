//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Highest tile color a piece slot can hold. Colors range `1..=MAX_TILE`.
pub const MAX_TILE: u8 = 6;

/// Standard play-field dimensions (in tiles), as per the commercial versions
pub const STANDARD_WIDTH: usize = 6;
pub const STANDARD_HEIGHT: usize = 13;

/// A single grid cell.
///
/// `Marked` is a transient state: match detection flags cells with it and the
/// next settle pass clears them. Outside of a mark/settle cascade every cell
/// is either `Empty` or `Tile(1..=MAX_TILE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Marked,
    Tile(u8),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The tile color, if this cell holds a live (unmarked) tile.
    pub fn tile(&self) -> Option<u8> {
        match self {
            Cell::Tile(color) => Some(*color),
            _ => None,
        }
    }
}

/// Commands a driver can send to a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    /// Player-facing pause toggle
    TogglePause,
    /// Internal suspend toggle, distinct from pause; lets a driver freeze
    /// gameplay while it runs removal animations or similar
    ToggleWait,
    Quit,
}
