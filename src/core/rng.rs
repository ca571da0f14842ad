//! Deterministic random number generation for shuffles and room codes.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals, so games replay in tests
//! - **Explicit**: Passed into every operation that needs randomness, never global
//!
//! ## Usage
//!
//! ```
//! use set_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut left: Vec<u32> = (0..81).collect();
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing every shuffle and room code.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from operating system entropy.
    ///
    /// For live games; tests should use [`GameRng::new`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Generate a random usize in the given inclusive range.
    pub fn gen_inclusive(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Sixteen random bytes, enough for a v4 UUID.
    pub fn bytes16(&mut self) -> [u8; 16] {
        self.inner.gen()
    }

    /// Shuffle a slice in place.
    ///
    /// Fisher-Yates from the last index down to 1, swapping each slot with a
    /// uniformly chosen index in `0..=i`. Uniform over all permutations.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_inclusive(0..=i);
            slice.swap(i, j);
        }
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Generate a code of `length` characters drawn uniformly from `alphabet`.
    ///
    /// Returns an empty string if the alphabet is empty.
    pub fn code(&mut self, alphabet: &str, length: usize) -> String {
        let chars: Vec<char> = alphabet.chars().collect();
        (0..length)
            .filter_map(|_| self.choose(&chars).copied())
            .collect()
    }
}
