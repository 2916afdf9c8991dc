//! Missing-value injection for sampled columns

use crate::error::{Result, TableMillError};
use crate::random::RandomSource;

// Guards against `rate * n` landing a hair off an integer.
const RATE_EPSILON: f64 = 1e-9;

/// Decides how many and which positions of a sample become missing.
///
/// One target rate is drawn uniformly from `[min_rate, max_rate]` per
/// sample call; the missing count is `round(rate * n)` pulled back into
/// the integer interval that keeps the realized fraction inside the
/// configured bounds whenever such an interval exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingnessInjector {
    min_rate: f64,
    max_rate: f64,
}

impl MissingnessInjector {
    /// Create an injector for a `[min_rate, max_rate]` range
    pub fn new(missing_rate: (f64, f64)) -> Result<Self> {
        let (min_rate, max_rate) = missing_rate;
        if !min_rate.is_finite() || !max_rate.is_finite() {
            return Err(TableMillError::invalid_config(format!(
                "missing rate bounds must be finite, got ({min_rate}, {max_rate})"
            )));
        }
        if !(0.0..=1.0).contains(&min_rate) || !(0.0..=1.0).contains(&max_rate) {
            return Err(TableMillError::invalid_config(format!(
                "missing rates must lie in [0, 1], got ({min_rate}, {max_rate})"
            )));
        }
        if min_rate > max_rate {
            return Err(TableMillError::invalid_config(format!(
                "missing rate range requires min <= max, got ({min_rate}, {max_rate})"
            )));
        }
        Ok(Self { min_rate, max_rate })
    }

    /// An injector that never marks anything missing
    pub fn none() -> Self {
        Self {
            min_rate: 0.0,
            max_rate: 0.0,
        }
    }

    /// The configured `(min_rate, max_rate)` bounds
    pub fn rates(&self) -> (f64, f64) {
        (self.min_rate, self.max_rate)
    }

    /// Positions to blank out for a sample of length `n`
    pub fn missing_positions(&self, n: usize, source: &mut RandomSource) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }
        let rate = source.rate_in(self.min_rate, self.max_rate);
        let count = self.missing_count(rate, n);
        source.distinct_indices(n, count)
    }

    /// Overlay `None` at the selected positions
    pub fn inject<T>(&self, values: &mut [Option<T>], source: &mut RandomSource) {
        for idx in self.missing_positions(values.len(), source) {
            values[idx] = None;
        }
    }

    /// Overlay a sentinel label at the selected positions
    pub fn inject_label(&self, values: &mut [String], na_value: &str, source: &mut RandomSource) {
        for idx in self.missing_positions(values.len(), source) {
            values[idx] = na_value.to_string();
        }
    }

    fn missing_count(&self, rate: f64, n: usize) -> usize {
        let n_f = n as f64;
        let mut count = (rate * n_f).round() as i64;
        let lowest = (self.min_rate * n_f - RATE_EPSILON).ceil() as i64;
        let highest = (self.max_rate * n_f + RATE_EPSILON).floor() as i64;
        if lowest <= highest {
            count = count.clamp(lowest, highest);
        }
        count.clamp(0, n as i64) as usize
    }
}
