//! Engine configuration and its construction-time validation

use anyhow::{bail, Result};

/// Tuning parameters for a game session.
///
/// Speeds are measured in cells per second; the gravity tick period is the
/// inverse of the current speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// How many tiles a player has to clear to advance to the next level.
    /// Zero disables leveling.
    pub tiles_per_level: u32,
    /// Falling speed at the beginning of the game.
    pub initial_speed: f64,
    /// How much the speed increases on each level-up.
    pub speed_increment: f64,
    /// Upper bound on the falling speed.
    pub max_speed: f64,
}

impl Config {
    /// Reject invalid configurations before the game loop ever starts.
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            bail!("initial_speed must be a finite value greater than 0");
        }
        if !self.speed_increment.is_finite() || self.speed_increment < 0.0 {
            bail!("speed_increment must be a finite value of at least 0");
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            bail!("max_speed must be a finite value greater than 0");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tiles_per_level: 10,
            initial_speed: 1.0,
            speed_increment: 0.5,
            max_speed: 13.0,
        }
    }
}
