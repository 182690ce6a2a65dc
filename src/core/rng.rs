//! Randomizer module - the engine's only source of randomness
//!
//! The engine never touches a global RNG; it draws tile colors through the
//! [`Randomizer`] capability injected at construction. Production drivers
//! wrap a `rand` generator with [`RngRandomizer`]; tests script exact tile
//! sequences with [`SequenceRandomizer`].

use rand::Rng;

/// Source of random integers for tile generation.
pub trait Randomizer {
    /// A value in `[0, n)`.
    fn below(&mut self, n: u32) -> u32;
}

/// [`Randomizer`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngRandomizer<R: Rng> {
    rng: R,
}

impl<R: Rng> RngRandomizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRandomizer<rand::rngs::StdRng> {
    /// Randomizer seeded from system entropy. `StdRng` is `Send`, so the
    /// result can move onto the engine's logic thread.
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self::new(rand::rngs::StdRng::from_entropy())
    }
}

impl<R: Rng> Randomizer for RngRandomizer<R> {
    fn below(&mut self, n: u32) -> u32 {
        self.rng.gen_range(0..n)
    }
}

/// Scripted [`Randomizer`] that replays a fixed list of values, cycling
/// back to the start once exhausted. The argument to [`Randomizer::below`]
/// is ignored; callers are expected to script in-range values.
#[derive(Debug, Clone)]
pub struct SequenceRandomizer {
    values: Vec<u32>,
    current: usize,
}

impl SequenceRandomizer {
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "sequence must hold at least one value");
        Self { values, current: 0 }
    }
}

impl Randomizer for SequenceRandomizer {
    fn below(&mut self, _n: u32) -> u32 {
        let value = self.values[self.current];
        self.current = (self.current + 1) % self.values.len();
        value
    }
}
