//! RNG module - seedable color dealing and the two-slot piece queue
//!
//! Randomness is injected: the queue deals from any [`ColorSource`], and the
//! bundled [`SimpleRng`] LCG makes games reproducible from a seed.

use crate::types::{Color, ColorPair};

/// A source of bounded random indices
pub trait ColorSource {
    /// Uniform-ish value in `[0, bound)`; `bound` is never 0.
    fn next_index(&mut self, bound: u32) -> u32;

    /// Deal one palette color from the first `color_count` entries.
    fn next_color(&mut self, color_count: u8) -> Color {
        let count = color_count.clamp(1, Color::PALETTE.len() as u8);
        Color::PALETTE[self.next_index(count as u32) as usize]
    }

    /// Deal an `[anchor, second]` pair.
    fn next_pair(&mut self, color_count: u8) -> ColorPair {
        [self.next_color(color_count), self.next_color(color_count)]
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current internal state (feed back into `new` to resume the stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl ColorSource for SimpleRng {
    fn next_index(&mut self, bound: u32) -> u32 {
        self.next_range(bound)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Current and next pair
#[derive(Debug, Clone)]
pub struct PieceQueue<R: ColorSource = SimpleRng> {
    current: ColorPair,
    next: ColorPair,
    color_count: u8,
    rng: R,
}

impl<R: ColorSource> PieceQueue<R> {
    /// Deal the first two pairs from `rng`
    pub fn new(mut rng: R, color_count: u8) -> Self {
        let current = rng.next_pair(color_count);
        let next = rng.next_pair(color_count);
        Self {
            current,
            next,
            color_count,
            rng,
        }
    }

    /// Pair that spawns next
    pub fn current(&self) -> ColorPair {
        self.current
    }

    /// Pair queued after the current one
    pub fn peek_next(&self) -> ColorPair {
        self.next
    }

    /// Promote next to current and deal a fresh next. Returns the new current.
    pub fn advance(&mut self) -> ColorPair {
        self.current = self.next;
        self.next = self.rng.next_pair(self.color_count);
        self.current
    }

    /// Discard both slots and deal two fresh pairs from the same stream.
    pub fn refill(&mut self) {
        self.current = self.rng.next_pair(self.color_count);
        self.next = self.rng.next_pair(self.color_count);
    }
}
