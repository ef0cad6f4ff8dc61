//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm. Each bag contains one of
//! each piece (O, I, T, S, Z, J, L), shuffled. Pieces are drawn from the bag
//! until it is empty, then a new bag is generated.
//!
//! The random source is injectable through [`RandomSource`]:
//! [`SimpleRng`] is a seedable LCG for ordinary play and reproducible tests,
//! [`ScriptedRng`] replays fixed shuffle choices when a test needs a known
//! piece order.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::types::PieceKind;

/// Source of uniformly distributed indices
pub trait RandomSource {
    /// Uniform value in `0..bound`. `bound` is at least 1.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
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

    /// Current internal state, usable as a seed to replay from here
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    /// Multiply-shift with rejection (Lemire). Uses the high bits of the LCG,
    /// which are far better distributed than the low bits a modulo would pick.
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let m = u64::from(self.next_u32()) * u64::from(bound);
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }
}

/// Replays scripted shuffle choices.
///
/// Each call consumes the next scripted value (reduced modulo the bound).
/// Once the script runs out every call returns `bound - 1`, which makes the
/// Fisher-Yates pass a no-op, so later bags come out in catalog order and are
/// drawn as L, J, Z, S, T, I, O.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    script: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Script whose first bag deals `kind` first
    pub fn first(kind: PieceKind) -> Self {
        let index = PieceKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or_default();
        Self::new([index as u32])
    }
}

impl RandomSource for ScriptedRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        let bound = bound.max(1);
        match self.script.pop_front() {
            Some(value) => value % bound,
            None => bound - 1,
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag<R = SimpleRng> {
    /// Pieces not yet dealt this cycle; drawn from the end
    bag: ArrayVec<PieceKind, 7>,
    rng: R,
    /// Number of bags generated so far
    cycles: u32,
}

impl Bag<SimpleRng> {
    /// Create a new bag backed by a seeded [`SimpleRng`]
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Bag<R> {
    /// Create a new bag and fill it immediately
    pub fn new(rng: R) -> Self {
        let mut bag = Self {
            bag: ArrayVec::new(),
            rng,
            cycles: 0,
        };
        bag.refill();
        bag
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
        self.cycles = self.cycles.wrapping_add(1);
        debug!(cycle = self.cycles, bag = ?self.bag.as_slice(), "refilled piece bag");
    }

    /// Draw the next piece, refilling first if the bag is exhausted
    pub fn draw(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                trace!(%kind, remaining = self.bag.len(), "dealt piece");
                return kind;
            }
            self.refill();
        }
    }

    /// Throw away the current bag and start a fresh cycle.
    ///
    /// The random stream continues, so the new sequence differs from the old one.
    pub fn reset(&mut self) {
        self.cycles = 0;
        self.refill();
    }

    /// Pieces still to be dealt this cycle (the next draw is the last element)
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }

    /// Bags generated since creation or the last reset
    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}

impl Default for Bag<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
