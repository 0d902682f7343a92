//! Injected randomness: customer categories, haircut lengths and arrival gaps.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/* ---------- */

/// A source of uniformly distributed values.
///
/// The shop never calls `rand` directly so runs can be replayed from a seed,
/// or scripted entirely in tests.
pub trait RandomSource: Send + Sync {
    /// Returns a value drawn uniformly from `0..bound`, or `0` when `bound` is `0`.
    fn below(&self, bound: u64) -> u64;
}

/// Draws a duration uniformly from `[0, bound)`, with microsecond resolution.
pub fn duration_below(random: &dyn RandomSource, bound: Duration) -> Duration {
    let micros = u64::try_from(bound.as_micros()).unwrap_or(u64::MAX);
    Duration::from_micros(random.below(micros))
}

/* ---------- */

/// Draws from the calling thread's generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    #[inline]
    fn below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }
}

/* ---------- */

/// A seeded generator shared by every thread of the shop.
///
/// The sequence of values is fixed by the seed; which thread gets which value still
/// depends on scheduling.
#[derive(Debug)]
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    /// Returns a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .gen_range(0..bound)
    }
}

/* ---------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bound_yields_zero() {
        assert_eq!(ThreadRandom.below(0), 0);
        assert_eq!(SeededRandom::new(7).below(0), 0);
        assert_eq!(duration_below(&ThreadRandom, Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn values_stay_below_bound() {
        let random = SeededRandom::new(3);
        assert!((0..1_000).all(|_| random.below(4) < 4));
        assert!((0..1_000).all(|_| ThreadRandom.below(10) < 10));

        let bound = Duration::from_millis(5);
        assert!((0..100).all(|_| duration_below(&random, bound) < bound));
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);

        let left = (0..32).map(|_| a.below(1_000)).collect::<Vec<_>>();
        let right = (0..32).map(|_| b.below(1_000)).collect::<Vec<_>>();
        assert_eq!(left, right);
    }
}
