use rand::Rng;

const MULTIPLIER_A: i64 = 1103515245;
const INCREMENT_C: i64 = 12345;
const DEFAULT_SEED: i64 = 3819201;
const MODULUS: i64 = i32::MAX as i64;

/// Source of the random draws the engine makes: random moves and tie-breaks
/// between equally good moves.
pub trait RandomGenerator: Default {
    /// Returns a value in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: usize, to: usize) -> usize;

    /// Picks one element uniformly, `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len()))
    }
}

/// Draws from the thread-local generator of the `rand` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        rand::rng().random_range(from..to)
    }
}

/// A seeded linear congruential generator for reproducible games.
#[derive(Debug, Clone)]
pub struct CustomNumberGenerator {
    seed: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        let span = (to - from) as i64;
        (self.step() as i64 % span).unsigned_abs() as usize + from
    }
}

impl CustomNumberGenerator {
    /// Creates a generator from `seed`, reduced modulo `i32::MAX` so the
    /// recurrence never overflows.
    pub const fn new(seed: i64) -> Self {
        Self {
            seed: seed % MODULUS,
        }
    }

    fn step(&mut self) -> i32 {
        self.seed = (self.seed * MULTIPLIER_A + INCREMENT_C) % MODULUS;
        self.seed as i32
    }
}
