//! Events emitted by a running game
//!
//! Every observable state change is reported through exactly one of these
//! variants, each carrying value snapshots taken at the moment of emission.
//! A driver never needs to read engine state directly; pattern-matching the
//! event stream is the whole consumption contract. The stream closing is
//! the termination signal, for quit and game over alike.

use crate::core::{Grid, Piece};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Response to every accepted command and to every gravity step that
    /// did not lock the piece. While paused or waiting the piece snapshot
    /// is simply unchanged; commands are never dropped from the stream.
    Updated { piece: Piece, paused: bool },
    /// One cascade pass matched and flagged tiles. The grid snapshot still
    /// shows the marked cells, so a driver can animate the removal before
    /// the next event arrives.
    Scored {
        grid: Grid,
        /// Cascade pass index, starting at 1 for the lock-in pass.
        combo: u32,
        /// Tiles removed by this pass alone.
        removed: u32,
        level: u32,
    },
    /// A new piece entered the grid, including the very first spawn. The
    /// snapshot shows the settled grid; `next_tiles` previews the piece
    /// after this one.
    Renewed {
        grid: Grid,
        piece: Piece,
        next_tiles: [u8; 3],
    },
    /// Terminal event, emitted immediately before the stream closes.
    Finished,
}
