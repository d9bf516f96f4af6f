//! RNG module - deterministic uniform piece selection
//!
//! Pieces are drawn uniformly at random from the shape catalog. The generator
//! is a small LCG so a seed fully determines a game, which keeps tests and
//! replays reproducible.

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits, which are far better distributed than the low bits
    /// of a power-of-two LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Uniform catalog index picker with a one-piece preview
#[derive(Debug, Clone)]
pub struct PiecePicker {
    rng: SimpleRng,
    len: usize,
    next: usize,
    seed: u32,
}

impl PiecePicker {
    /// Create a picker over `len` catalog entries
    pub fn new(seed: u32, len: usize) -> Self {
        let len = len.max(1);
        let mut rng = SimpleRng::new(seed);
        let next = rng.next_range(len as u32) as usize;
        Self {
            rng,
            len,
            next,
            seed,
        }
    }

    /// Index the next draw will return
    pub fn peek(&self) -> usize {
        self.next
    }

    /// Draw the next catalog index
    pub fn draw(&mut self) -> usize {
        let current = self.next;
        self.next = self.rng.next_range(self.len as u32) as usize;
        current
    }

    /// The seed this picker started from
    pub fn seed(&self) -> u32 {
        self.seed
    }
}
