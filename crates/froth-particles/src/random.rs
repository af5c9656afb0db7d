//! Seedable random source for spawn decisions

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct BubbleRng {
    inner: StdRng,
}

impl BubbleRng {
    /// Deterministic generator; equal seeds give equal simulations
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Returns a float in [min, max). Collapsed ranges return `min`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..max)
    }

    /// Returns a float in [-width/2, width/2)
    pub fn spread(&mut self, width: f32) -> f32 {
        let half = width * 0.5;
        self.range(-half, half)
    }

    /// Returns an index in [0, n). `n` must be non-zero.
    pub fn index(&mut self, n: usize) -> usize {
        self.inner.gen_range(0..n)
    }

    /// Returns an angle in [0, 2π)
    pub fn angle(&mut self) -> f32 {
        self.range(0.0, std::f32::consts::TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = BubbleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.15, 0.35);
            assert!(v >= 0.15 && v < 0.35);
        }
    }

    #[test]
    fn spread_is_centered() {
        let mut rng = BubbleRng::new(7);
        for _ in 0..1000 {
            let v = rng.spread(0.25);
            assert!(v >= -0.125 && v < 0.125);
        }
    }

    #[test]
    fn collapsed_range_returns_min() {
        let mut rng = BubbleRng::new(1);
        assert_eq!(rng.range(0.5, 0.5), 0.5);
        assert_eq!(rng.range(0.5, 0.1), 0.5);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = BubbleRng::new(99);
        let mut b = BubbleRng::new(99);
        for _ in 0..16 {
            assert_eq!(a.range(0.0, 1.0), b.range(0.0, 1.0));
        }
    }

    #[test]
    fn index_covers_all_values() {
        let mut rng = BubbleRng::new(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[rng.index(4)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
