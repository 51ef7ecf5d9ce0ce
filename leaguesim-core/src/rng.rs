//! Seeded simulation generator.
//!
//! Every random draw in a run goes through one [`SimRng`] owned by the season
//! loop and lent out by `&mut` to each sampling call. Nothing reads from a
//! global generator, so a seed fully determines the output.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct SimRng {
    inner: StdRng,
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// True with the given probability. `0.0` never fires, `1.0` always does.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Uniform integer in `[min, max]`.
    pub fn int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        self.inner.gen_range(min..=max)
    }

    /// Uniform float in `[min, max]`.
    pub fn float_inclusive(&mut self, min: f64, max: f64) -> f64 {
        self.inner.gen_range(min..=max)
    }

    /// Uniformly pick one element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.inner.gen_range(0..items.len());
        items.get(idx)
    }

    /// Two distinct indices in `0..n`, uniform over ordered pairs.
    ///
    /// Requires `n >= 2`; callers validate this up front.
    pub fn distinct_pair(&mut self, n: usize) -> (usize, usize) {
        debug_assert!(n >= 2, "distinct_pair needs at least two items");
        let first = self.inner.gen_range(0..n);
        let mut second = self.inner.gen_range(0..n - 1);
        if second >= first {
            second += 1;
        }
        (first, second)
    }

    /// Draw from an arbitrary distribution using this generator.
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.inner)
    }
}
