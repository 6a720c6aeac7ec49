//! RNG module - seedable piece sources
//!
//! The driver never draws randomness on its own: it pulls kinds from a
//! [`PieceSource`]. Sources provided here:
//!
//! - [`BagRandomizer`]: shuffled bags of all seven kinds (no droughts)
//! - [`UniformRandomizer`]: independent uniform draws
//! - [`Sequence`]: a fixed list replayed in a loop, for tests and scripts
//!
//! Both random sources sit on a small LCG so a seed fully determines the
//! piece sequence.

use crate::config::RandomizerKind;
use crate::types::PieceKind;

/// Where the driver gets its next piece kind from.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    bag: [PieceKind; 7],
    bag_index: usize,
    rng: SimpleRng,
}

impl BagRandomizer {
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }
}

impl PieceSource for BagRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }
}

/// Every draw is independent and uniform over the seven kinds.
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: SimpleRng,
}

impl UniformRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Replays a fixed list of kinds forever.
#[derive(Debug, Clone)]
pub struct Sequence {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl Sequence {
    /// An empty list falls back to the seven kinds in table order.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.extend(PieceKind::ALL);
        }
        Self { kinds, next: 0 }
    }

    /// The same kind every time.
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for Sequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

/// The random source selected by [`RandomizerKind`].
#[derive(Debug, Clone)]
pub enum Randomizer {
    Bag(BagRandomizer),
    Uniform(UniformRandomizer),
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        match kind {
            RandomizerKind::Bag => Randomizer::Bag(BagRandomizer::new(seed)),
            RandomizerKind::Uniform => Randomizer::Uniform(UniformRandomizer::new(seed)),
        }
    }
}

impl PieceSource for Randomizer {
    fn next_kind(&mut self) -> PieceKind {
        match self {
            Randomizer::Bag(bag) => bag.next_kind(),
            Randomizer::Uniform(uniform) => uniform.next_kind(),
        }
    }
}
