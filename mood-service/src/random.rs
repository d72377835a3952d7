use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::Mutex;

/// Source of the uniform choices the concierge makes: which generic reply to
/// use and how long to "think".
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&self, len: usize) -> usize;

    /// Uniform value in `low..high`, or `low` when the range is empty
    fn between(&self, low: u64, high: u64) -> u64;
}

/// Backed by the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }

    fn between(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        rand::rng().random_range(low..high)
    }
}

/// Reproducible sequence from a fixed seed
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // a poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }
}

impl RandomSource for SeededRandom {
    fn index(&self, len: usize) -> usize {
        self.with_rng(|rng| rng.random_range(0..len))
    }

    fn between(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.with_rng(|rng| rng.random_range(low..high))
    }
}

/// Always returns the same position; `between` picks `low + offset`, clamped
/// below `high`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedRandom {
    pub index: usize,
    pub offset: u64,
}

impl FixedRandom {
    pub fn new(index: usize) -> Self {
        Self { index, offset: 0 }
    }
}

impl RandomSource for FixedRandom {
    fn index(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }

    fn between(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        low + self.offset.min(high - low - 1)
    }
}
