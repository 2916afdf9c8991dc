//! Seedable random value source used by all column samplers

use crate::error::{Result, TableMillError};
use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

/// Random provider for uniform float, integer, and categorical draws.
///
/// Every column samples from an explicit `RandomSource` rather than
/// process-wide state, so runs are reproducible when a seed is given and
/// independent sources can be handed to parallel workers.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a new source, seeded for reproducibility or from entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Reset the source to a known seed
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Uniform draw from `(low, high]`.
    ///
    /// The unit draw is taken from `[0, 1)` and mapped down from `high`,
    /// which keeps the lower bound exclusive and the upper bound inclusive.
    pub fn uniform_float(&mut self, low: f64, high: f64) -> f64 {
        let unit: f64 = self.rng.gen();
        high - unit * (high - low)
    }

    /// Draw `n` uniform floats from `(low, high]`
    pub fn uniform_floats(&mut self, low: f64, high: f64, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.uniform_float(low, high)).collect()
    }

    /// Uniform draw from `[low, high]` inclusive
    pub fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    /// Draw `n` uniform integers from `[low, high]` inclusive
    pub fn uniform_ints(&mut self, low: i64, high: i64, n: usize) -> Vec<i64> {
        let uniform = Uniform::new_inclusive(low, high);
        (0..n).map(|_| uniform.sample(&mut self.rng)).collect()
    }

    /// Unweighted pick from a non-empty candidate set
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        items
            .choose(&mut self.rng)
            .ok_or_else(|| TableMillError::sampling("cannot draw from an empty candidate set"))
    }

    /// Weighted pick from a non-empty candidate set
    pub fn choose_weighted<'a, T>(&mut self, items: &'a [T], weights: &[f64]) -> Result<&'a T> {
        if items.is_empty() {
            return Err(TableMillError::sampling(
                "cannot draw from an empty candidate set",
            ));
        }
        if items.len() != weights.len() {
            return Err(TableMillError::sampling(format!(
                "weight vector length {} does not match candidate count {}",
                weights.len(),
                items.len()
            )));
        }
        let dist = WeightedIndex::new(weights)
            .map_err(|e| TableMillError::sampling(format!("invalid weights: {e}")))?;
        Ok(&items[dist.sample(&mut self.rng)])
    }

    /// Uniform rate draw from `[min, max]`; a degenerate range returns the constant
    pub fn rate_in(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            min
        } else {
            self.rng.gen_range(min..=max)
        }
    }

    /// Draw `amount` distinct indices out of `0..length`, without replacement.
    /// Callers must keep `amount <= length`.
    pub fn distinct_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount).into_vec()
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
