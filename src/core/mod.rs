//! Core game logic - pure, deterministic, and presentation-agnostic
//!
//! Everything under this module is synchronous and free of I/O: the grid
//! with its matching and gravity algorithms, the falling piece, and the
//! randomizer capability. The concurrent control loop that drives them
//! lives in [`crate::engine`].

pub mod grid;
pub mod piece;
pub mod rng;

pub use grid::Grid;
pub use piece::Piece;
pub use rng::{Randomizer, RngRandomizer, SequenceRandomizer};
