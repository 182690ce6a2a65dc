//! Engine module - the tick-driven control loop and its boundary protocol
//!
//! - [`config`]: session tuning, validated at construction
//! - [`events`]: the outbound event sum type
//! - [`game`]: the logic thread started by [`play`]

pub mod config;
pub mod events;
pub mod game;

pub use config::Config;
pub use events::Event;
pub use game::play;
