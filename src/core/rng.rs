//! Seeded randomness for the engine and the bots.
//!
//! Shop refreshes, card draws, missile targets and global events all draw
//! from a `GameRng` handed in by the caller. Bots take their own stream via
//! `fork`, so searching a position never shifts what the live match draws
//! next.
//!
//! ```
//! use card_conquest::core::GameRng;
//!
//! let mut table = GameRng::new(42);
//! let bot = table.fork();
//! let first_draw = table.gen_index(52);
//!
//! let mut replay = GameRng::new(42);
//! let _ = replay.fork();
//! assert_eq!(replay.gen_index(52), first_draw);
//! assert_ne!(bot.seed(), table.seed());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Mixing constant for fork seeds (golden ratio, 64-bit).
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream without consuming draws from this one.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed ^ self.forks.wrapping_mul(FORK_STRIDE))
    }

    /// Fresh seed for a short-lived consumer such as one search.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Uniform pick, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng) -> Vec<usize> {
        (0..16).map(|_| rng.gen_index(100)).collect()
    }

    #[test]
    fn test_same_seed_same_draws() {
        assert_eq!(draws(&mut GameRng::new(9)), draws(&mut GameRng::new(9)));
        assert_ne!(draws(&mut GameRng::new(9)), draws(&mut GameRng::new(10)));
    }

    #[test]
    fn test_fork_leaves_parent_stream_alone() {
        let mut forked = GameRng::new(5);
        let _bot = forked.fork();
        assert_eq!(draws(&mut forked), draws(&mut GameRng::new(5)));
    }

    #[test]
    fn test_successive_forks_differ() {
        let mut table = GameRng::new(5);
        let mut a = table.fork();
        let mut b = table.fork();
        assert_ne!(a.seed(), b.seed());
        assert_ne!(draws(&mut a), draws(&mut b));
    }

    #[test]
    fn test_next_seed_is_reproducible() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(1);
        assert_eq!(a.next_seed(), b.next_seed());
        assert_ne!(a.next_seed(), GameRng::new(1).next_seed());
    }

    #[test]
    fn test_choose_empty_hand() {
        let mut rng = GameRng::new(7);
        let hand: [&str; 0] = [];
        assert!(rng.choose(&hand).is_none());
        assert_eq!(rng.choose(&["farm"]), Some(&"farm"));
    }
}
