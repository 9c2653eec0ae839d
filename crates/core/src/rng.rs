//! RNG module - seedable random source and the one-piece lookahead queue
//!
//! Pieces are drawn independently and uniformly from the session's catalog (no bag, no
//! history). The random source is injected so tests and replays can reproduce exact piece
//! sequences.

use crate::types::PieceKind;

/// Anything that can pick a uniform index in `0..len`
pub trait RandomSource {
    /// Return a value in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }
}

/// Next-piece buffer: exactly one piece of lookahead over a fixed catalog
#[derive(Debug, Clone)]
pub struct PieceQueue<R> {
    pieces: &'static [PieceKind],
    rng: R,
    next: PieceKind,
}

impl<R: RandomSource> PieceQueue<R> {
    /// Create a queue over `pieces` and draw the first lookahead piece
    ///
    /// # Panics
    ///
    /// Panics if `pieces` is empty.
    pub fn new(pieces: &'static [PieceKind], mut rng: R) -> Self {
        assert!(!pieces.is_empty(), "piece catalog must not be empty");
        let next = pieces[rng.next_index(pieces.len())];
        Self { pieces, rng, next }
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the lookahead piece and draw a fresh one behind it
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.next;
        let idx = self.rng.next_index(self.pieces.len());
        self.next = self.pieces[idx];
        piece
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}
