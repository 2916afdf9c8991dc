//! Column samplers and their sampling contracts

use crate::error::{Result, TableMillError};
use crate::missing::MissingnessInjector;
use crate::random::RandomSource;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Default float range when none is configured
pub const DEFAULT_FLOAT_RANGE: (f64, f64) = (-1e9, 1e9);

/// Default integer range when none is configured
pub const DEFAULT_INT_RANGE: (i64, i64) = (0, 100);

/// Default label substituted for missing categorical entries
pub const DEFAULT_NA_VALUE: &str = "NA";

/// One sampled column of values.
///
/// Missing numeric entries are tagged (`None`) rather than encoded as a
/// sentinel number, so a legitimate NaN can never be confused with a
/// missing marker. Missing categorical entries carry the column's
/// `na_value` label.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Float(Vec<Option<f64>>),
    Integer(Vec<Option<i64>>),
    Categorical(Vec<String>),
}

impl ColumnData {
    /// Number of entries in this column
    pub fn len(&self) -> usize {
        match self {
            Self::Float(values) => values.len(),
            Self::Integer(values) => values.len(),
            Self::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Float values, if this is a float column
    pub fn as_float(&self) -> Option<&[Option<f64>]> {
        match self {
            Self::Float(values) => Some(values),
            _ => None,
        }
    }

    /// Integer values, if this is an integer column
    pub fn as_integer(&self) -> Option<&[Option<i64>]> {
        match self {
            Self::Integer(values) => Some(values),
            _ => None,
        }
    }

    /// Categorical labels, if this is a categorical column
    pub fn as_categorical(&self) -> Option<&[String]> {
        match self {
            Self::Categorical(values) => Some(values),
            _ => None,
        }
    }
}

/// Column sampling trait
pub trait Column: Send + Sync {
    /// Draw `n` values per this column's distribution policy, then apply
    /// missing-value injection. Configuration is never mutated; repeated
    /// calls yield independent samples.
    fn sample(&self, n: usize, source: &mut RandomSource) -> Result<ColumnData>;
}

/// Uniform floats drawn from `(low, high]`
pub struct FloatRandomColumn {
    low: f64,
    high: f64,
    injector: MissingnessInjector,
}

impl FloatRandomColumn {
    /// Create a float column over `(low, high]` with a missing-rate range
    pub fn new(values_range: (f64, f64), missing_rate: (f64, f64)) -> Result<Self> {
        let (low, high) = values_range;
        if !low.is_finite() || !high.is_finite() {
            return Err(TableMillError::invalid_config(format!(
                "float range bounds must be finite, got ({low}, {high})"
            )));
        }
        if low >= high {
            return Err(TableMillError::invalid_config(format!(
                "float range requires low < high, got ({low}, {high})"
            )));
        }
        Ok(Self {
            low,
            high,
            injector: MissingnessInjector::new(missing_rate)?,
        })
    }

    /// The configured `(low, high)` range
    pub fn values_range(&self) -> (f64, f64) {
        (self.low, self.high)
    }
}

impl Default for FloatRandomColumn {
    fn default() -> Self {
        Self {
            low: DEFAULT_FLOAT_RANGE.0,
            high: DEFAULT_FLOAT_RANGE.1,
            injector: MissingnessInjector::none(),
        }
    }
}

impl Column for FloatRandomColumn {
    fn sample(&self, n: usize, source: &mut RandomSource) -> Result<ColumnData> {
        let mut values: Vec<Option<f64>> = source
            .uniform_floats(self.low, self.high, n)
            .into_iter()
            .map(Some)
            .collect();
        self.injector.inject(&mut values, source);
        Ok(ColumnData::Float(values))
    }
}

/// Uniform integers drawn from `[low, high]` inclusive
pub struct IntegerRandomColumn {
    low: i64,
    high: i64,
    injector: MissingnessInjector,
}

impl IntegerRandomColumn {
    /// Create an integer column over `[low, high]` with a missing-rate range
    pub fn new(values_range: (i64, i64), missing_rate: (f64, f64)) -> Result<Self> {
        let (low, high) = values_range;
        if low > high {
            return Err(TableMillError::invalid_config(format!(
                "integer range requires low <= high, got ({low}, {high})"
            )));
        }
        Ok(Self {
            low,
            high,
            injector: MissingnessInjector::new(missing_rate)?,
        })
    }

    /// The configured `(low, high)` range
    pub fn values_range(&self) -> (i64, i64) {
        (self.low, self.high)
    }
}

impl Default for IntegerRandomColumn {
    fn default() -> Self {
        Self {
            low: DEFAULT_INT_RANGE.0,
            high: DEFAULT_INT_RANGE.1,
            injector: MissingnessInjector::none(),
        }
    }
}

impl Column for IntegerRandomColumn {
    fn sample(&self, n: usize, source: &mut RandomSource) -> Result<ColumnData> {
        let mut values: Vec<Option<i64>> = source
            .uniform_ints(self.low, self.high, n)
            .into_iter()
            .map(Some)
            .collect();
        self.injector.inject(&mut values, source);
        Ok(ColumnData::Integer(values))
    }
}

/// Labels drawn uniformly from a fixed category set
pub struct CategoricalRandomColumn {
    categories: Vec<String>,
    na_value: String,
    injector: MissingnessInjector,
}

impl CategoricalRandomColumn {
    /// Create a categorical column over a non-empty set of distinct labels
    pub fn new(categories: Vec<String>, missing_rate: (f64, f64)) -> Result<Self> {
        validate_categories(&categories)?;
        Ok(Self {
            categories,
            na_value: DEFAULT_NA_VALUE.to_string(),
            injector: MissingnessInjector::new(missing_rate)?,
        })
    }

    /// Set the label substituted for missing entries
    pub fn with_na_value(mut self, na_value: impl Into<String>) -> Self {
        self.na_value = na_value.into();
        warn_on_na_collision(&self.categories, &self.na_value);
        self
    }

    /// The configured category labels
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

impl Column for CategoricalRandomColumn {
    fn sample(&self, n: usize, source: &mut RandomSource) -> Result<ColumnData> {
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            values.push(source.choose(&self.categories)?.clone());
        }
        self.injector
            .inject_label(&mut values, &self.na_value, source);
        Ok(ColumnData::Categorical(values))
    }
}

/// Labels allocated to match fixed proportions as closely as possible.
///
/// Allocation is deterministic largest-remainder, not weighted random:
/// each category receives `floor(p * n)` entries and the leftover slots
/// go to the largest fractional remainders, so proportions that round
/// exactly produce exact counts. Label order is shuffled.
pub struct CategoricalProportionalColumn {
    categories: Vec<String>,
    proportions: Vec<f64>,
    na_value: String,
    injector: MissingnessInjector,
}

impl CategoricalProportionalColumn {
    /// Create a proportional column; proportions must be non-negative,
    /// match the category count, and sum to 1.
    pub fn new(
        categories: Vec<String>,
        proportions: Vec<f64>,
        missing_rate: (f64, f64),
    ) -> Result<Self> {
        validate_categories(&categories)?;
        if proportions.len() != categories.len() {
            return Err(TableMillError::invalid_config(format!(
                "got {} proportions for {} categories",
                proportions.len(),
                categories.len()
            )));
        }
        if let Some(p) = proportions.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(TableMillError::invalid_config(format!(
                "proportions must be non-negative, got {p}"
            )));
        }
        let total: f64 = proportions.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(TableMillError::invalid_config(format!(
                "proportions must sum to 1, got {total}"
            )));
        }
        Ok(Self {
            categories,
            proportions,
            na_value: DEFAULT_NA_VALUE.to_string(),
            injector: MissingnessInjector::new(missing_rate)?,
        })
    }

    /// Set the label substituted for missing entries
    pub fn with_na_value(mut self, na_value: impl Into<String>) -> Self {
        self.na_value = na_value.into();
        warn_on_na_collision(&self.categories, &self.na_value);
        self
    }

    /// Per-category counts for a sample of length `n` (largest-remainder)
    fn allocate(&self, n: usize) -> Vec<usize> {
        let n_f = n as f64;
        let mut counts = Vec::with_capacity(self.proportions.len());
        let mut remainders = Vec::with_capacity(self.proportions.len());
        for &p in &self.proportions {
            let exact = p * n_f;
            // The epsilon keeps an exact product that lands a hair under
            // an integer from losing a whole slot.
            let base = (exact + 1e-9).floor().min(n_f) as usize;
            counts.push(base);
            remainders.push(exact - base as f64);
        }

        let assigned: usize = counts.iter().sum();
        let mut order: Vec<usize> = (0..counts.len()).collect();
        order.sort_by(|&a, &b| {
            remainders[b]
                .partial_cmp(&remainders[a])
                .unwrap_or(Ordering::Equal)
        });
        for idx in order.into_iter().cycle().take(n.saturating_sub(assigned)) {
            counts[idx] += 1;
        }
        counts
    }
}

impl Column for CategoricalProportionalColumn {
    fn sample(&self, n: usize, source: &mut RandomSource) -> Result<ColumnData> {
        let counts = self.allocate(n);
        let mut values = Vec::with_capacity(n);
        for (category, count) in self.categories.iter().zip(counts) {
            values.extend(std::iter::repeat(category.clone()).take(count));
        }
        source.shuffle(&mut values);
        self.injector
            .inject_label(&mut values, &self.na_value, source);
        Ok(ColumnData::Categorical(values))
    }
}

fn validate_categories(categories: &[String]) -> Result<()> {
    if categories.is_empty() {
        return Err(TableMillError::invalid_config(
            "categories must not be empty",
        ));
    }
    let mut seen = HashSet::new();
    for category in categories {
        if !seen.insert(category) {
            return Err(TableMillError::invalid_config(format!(
                "duplicate category: {category}"
            )));
        }
    }
    Ok(())
}

fn warn_on_na_collision(categories: &[String], na_value: &str) {
    if categories.iter().any(|c| c == na_value) {
        tracing::warn!(
            na_value,
            "missing-value label collides with a real category; \
             missing entries will be indistinguishable from drawn ones"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_column_rejects_bad_range() {
        assert!(FloatRandomColumn::new((1.0, 1.0), (0.0, 0.0)).is_err());
        assert!(FloatRandomColumn::new((2.0, 1.0), (0.0, 0.0)).is_err());
        assert!(FloatRandomColumn::new((f64::NEG_INFINITY, 1.0), (0.0, 0.0)).is_err());
        assert!(FloatRandomColumn::new((1.0, 2.0), (0.0, 0.0)).is_ok());
    }

    #[test]
    fn test_integer_column_allows_degenerate_range() {
        // A single-value range is legal for integers, unlike floats
        let column = IntegerRandomColumn::new((5, 5), (0.0, 0.0)).unwrap();
        let mut source = RandomSource::new(Some(42));
        let data = column.sample(4, &mut source).unwrap();
        assert_eq!(
            data.as_integer().unwrap(),
            &[Some(5), Some(5), Some(5), Some(5)]
        );
    }

    #[test]
    fn test_integer_column_rejects_inverted_range() {
        assert!(IntegerRandomColumn::new((10, -5), (0.0, 0.0)).is_err());
    }

    #[test]
    fn test_categorical_rejects_empty_and_duplicates() {
        assert!(CategoricalRandomColumn::new(vec![], (0.0, 0.0)).is_err());
        assert!(
            CategoricalRandomColumn::new(vec!["a".into(), "a".into()], (0.0, 0.0)).is_err()
        );
    }

    #[test]
    fn test_proportional_rejects_bad_proportions() {
        let categories = vec!["a".to_string(), "b".to_string()];
        assert!(
            CategoricalProportionalColumn::new(categories.clone(), vec![0.5], (0.0, 0.0))
                .is_err()
        );
        assert!(CategoricalProportionalColumn::new(
            categories.clone(),
            vec![0.8, -0.2],
            (0.0, 0.0)
        )
        .is_err());
        assert!(CategoricalProportionalColumn::new(
            categories.clone(),
            vec![0.5, 0.4],
            (0.0, 0.0)
        )
        .is_err());
        assert!(
            CategoricalProportionalColumn::new(categories, vec![0.5, 0.5], (0.0, 0.0)).is_ok()
        );
    }

    #[test]
    fn test_largest_remainder_allocation() {
        let column = CategoricalProportionalColumn::new(
            vec!["car".into(), "bus".into(), "bicycle".into()],
            vec![0.5, 0.3, 0.2],
            (0.0, 0.0),
        )
        .unwrap();
        assert_eq!(column.allocate(10), vec![5, 3, 2]);
        assert_eq!(column.allocate(0), vec![0, 0, 0]);
        assert_eq!(column.allocate(1), vec![1, 0, 0]);

        // Remainder slots go to the largest fractional parts
        let thirds = CategoricalProportionalColumn::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
            (0.0, 0.0),
        )
        .unwrap();
        let counts = thirds.allocate(10);
        assert_eq!(counts.iter().sum::<usize>(), 10);
        assert!(counts.iter().all(|&c| c == 3 || c == 4));
    }

    #[test]
    fn test_default_columns_sample() {
        let mut source = RandomSource::new(Some(42));

        let float_data = FloatRandomColumn::default().sample(10, &mut source).unwrap();
        assert_eq!(float_data.len(), 10);
        let (low, high) = DEFAULT_FLOAT_RANGE;
        for value in float_data.as_float().unwrap() {
            let v = value.expect("default column has zero missing rate");
            assert!(v > low && v <= high);
        }

        let int_data = IntegerRandomColumn::default().sample(10, &mut source).unwrap();
        assert_eq!(int_data.len(), 10);
        let (low, high) = DEFAULT_INT_RANGE;
        for value in int_data.as_integer().unwrap() {
            let v = value.expect("default column has zero missing rate");
            assert!((low..=high).contains(&v));
        }
    }

    #[test]
    fn test_sampling_does_not_mutate_configuration() {
        let column = FloatRandomColumn::new((0.0, 1.0), (0.1, 0.3)).unwrap();
        let mut source = RandomSource::new(Some(42));
        let first = column.sample(10, &mut source).unwrap();
        let second = column.sample(10, &mut source).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 10);
        assert_eq!(column.values_range(), (0.0, 1.0));
    }
}
