//! Simulation core for a falling-tile match-three game.
//!
//! Pieces of three stacked tiles drop into a grid; aligning three or more
//! same-colored tiles horizontally, vertically, or diagonally removes them,
//! pulls the tiles above down, and can chain into combo cascades. This crate
//! is the complete game engine and nothing else: it owns the rules, the
//! clock, and the scoring inputs, and talks to the outside world purely
//! through channels. Any front end works - terminal, graphical, or a
//! headless test harness.
//!
//! # Module structure
//!
//! - [`core`]: pure game logic - [`core::Grid`] (matching and gravity),
//!   [`core::Piece`] (movement and rotation), [`core::Randomizer`]
//!   (injectable randomness)
//! - [`engine`]: the concurrent control loop - [`engine::play`],
//!   [`engine::Config`], and the [`engine::Event`] stream
//! - [`types`]: shared plain types - [`types::Cell`], [`types::Command`],
//!   tile and dimension constants
//!
//! # Protocol
//!
//! The driver owns both ends of the conversation: it sends [`types::Command`]
//! values on a rendezvous channel and consumes [`engine::Event`] snapshots
//! from the stream returned by [`engine::play`]. Events carry value copies of
//! the grid and pieces, so there is no shared mutable state and no locking.
//! The stream closing is the single termination signal, whether the player
//! quit or the grid filled up.
//!
//! # Example
//!
//! ```
//! use columns_engine::core::{Grid, RngRandomizer};
//! use columns_engine::engine::{play, Config, Event};
//! use columns_engine::types::{Command, STANDARD_HEIGHT, STANDARD_WIDTH};
//! use crossbeam::channel::bounded;
//!
//! let (commands, commands_rx) = bounded(0);
//! let config = Config {
//!     tiles_per_level: 10,
//!     initial_speed: 0.25,
//!     speed_increment: 0.25,
//!     max_speed: 13.0,
//! };
//! let events = play(
//!     Grid::new(STANDARD_WIDTH, STANDARD_HEIGHT),
//!     Box::new(RngRandomizer::from_entropy()),
//!     config,
//!     commands_rx,
//! )
//! .unwrap();
//!
//! // The first event is always a renewal carrying the initial piece.
//! assert!(matches!(events.recv().unwrap(), Event::Renewed { .. }));
//!
//! commands.send(Command::MoveLeft).unwrap();
//! assert!(matches!(events.recv().unwrap(), Event::Updated { .. }));
//!
//! // Quitting closes the stream after a final Finished event.
//! commands.send(Command::Quit).unwrap();
//! let remaining: Vec<Event> = events.iter().collect();
//! assert_eq!(remaining, vec![Event::Finished]);
//! ```

pub mod core;
pub mod engine;
pub mod types;

pub use crate::core::{Grid, Piece, Randomizer, RngRandomizer, SequenceRandomizer};
pub use crate::engine::{play, Config, Event};
pub use crate::types::{Cell, Command, MAX_TILE, STANDARD_HEIGHT, STANDARD_WIDTH};
