//! Deterministic random number generation for dealing and reshuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Forkable**: Each restart deals from an independent branch
//! - **Unbiased shuffle**: Explicit Fisher–Yates over any slice
//!
//! ```
//! use rust_pairs::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut restart_rng = rng.fork();
//!
//! // Original and fork produce different sequences
//! assert_ne!(rng.gen_range_usize(0..1000), restart_rng.gen_range_usize(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing deck generation and mid-game shuffles.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place with Fisher–Yates.
    ///
    /// Walks `n` from the last index down to 1 and swaps element `n` with a
    /// uniformly chosen element in `[0, n]`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for n in (1..slice.len()).rev() {
            let k = self.gen_range_usize(0..n + 1);
            slice.swap(n, k);
        }
    }

    /// Draw `count` distinct values from `pool` without replacement.
    ///
    /// Returns fewer than `count` values only if the pool is smaller.
    pub fn sample_distinct<T: Copy>(&mut self, pool: &[T], count: usize) -> Vec<T> {
        use rand::seq::SliceRandom;
        pool.choose_multiple(&mut self.inner, count).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed(), forked2.seed());
        assert_ne!(forked1.seed(), 42);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Same elements, different order (very likely with this seed)
        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_tiny_slices() {
        let mut rng = GameRng::new(7);

        let mut empty: Vec<u8> = vec![];
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![9];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // The last element must be able to stay put (k == n is allowed).
        let mut rng = GameRng::new(3);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let mut data = [0, 1, 2];
            rng.shuffle(&mut data);
            seen[data[2]] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_sample_distinct() {
        let mut rng = GameRng::new(42);
        let pool: Vec<u32> = (1..=11).collect();

        let mut picked = rng.sample_distinct(&pool, 6);
        assert_eq!(picked.len(), 6);
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 6);
        assert!(picked.iter().all(|id| pool.contains(id)));

        assert_eq!(rng.sample_distinct(&pool, 20).len(), 11);

        let a = GameRng::new(7).sample_distinct(&pool, 4);
        let b = GameRng::new(7).sample_distinct(&pool, 4);
        assert_eq!(a, b);
    }
}
