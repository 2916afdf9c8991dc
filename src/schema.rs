//! Declarative table schema, validated into column samplers

use crate::column::{
    CategoricalProportionalColumn, CategoricalRandomColumn, Column, FloatRandomColumn,
    IntegerRandomColumn, DEFAULT_FLOAT_RANGE, DEFAULT_INT_RANGE, DEFAULT_NA_VALUE,
};
use crate::error::{Result, TableMillError};
use crate::generator::DataGenerator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Declarative description of one column's sampling policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSpec {
    /// Uniform floats in `(low, high]`
    Float {
        #[serde(default = "default_float_range")]
        values_range: (f64, f64),
        #[serde(default)]
        missing_rate: (f64, f64),
    },
    /// Uniform integers in `[low, high]`
    Integer {
        #[serde(default = "default_int_range")]
        values_range: (i64, i64),
        #[serde(default)]
        missing_rate: (f64, f64),
    },
    /// Uniform draw over a fixed label set
    Categorical {
        categories: Vec<String>,
        #[serde(default)]
        missing_rate: (f64, f64),
        #[serde(default = "default_na_value")]
        na_value: String,
    },
    /// Deterministic proportional allocation over a fixed label set
    CategoricalProportional {
        categories: Vec<String>,
        proportions: Vec<f64>,
        #[serde(default)]
        missing_rate: (f64, f64),
        #[serde(default = "default_na_value")]
        na_value: String,
    },
}

impl ColumnSpec {
    /// Validate this spec and build the corresponding sampler
    pub fn build(&self) -> Result<Box<dyn Column>> {
        match self {
            Self::Float {
                values_range,
                missing_rate,
            } => Ok(Box::new(FloatRandomColumn::new(*values_range, *missing_rate)?)),
            Self::Integer {
                values_range,
                missing_rate,
            } => Ok(Box::new(IntegerRandomColumn::new(
                *values_range,
                *missing_rate,
            )?)),
            Self::Categorical {
                categories,
                missing_rate,
                na_value,
            } => Ok(Box::new(
                CategoricalRandomColumn::new(categories.clone(), *missing_rate)?
                    .with_na_value(na_value.clone()),
            )),
            Self::CategoricalProportional {
                categories,
                proportions,
                missing_rate,
                na_value,
            } => Ok(Box::new(
                CategoricalProportionalColumn::new(
                    categories.clone(),
                    proportions.clone(),
                    *missing_rate,
                )?
                .with_na_value(na_value.clone()),
            )),
        }
    }
}

/// A named column entry in a table schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(flatten)]
    pub spec: ColumnSpec,
}

/// Whole-table schema: an ordered list of named column specs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Load a schema from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let schema = serde_json::from_str(&content)?;
        Ok(schema)
    }

    /// Validate every column and build a generator
    pub fn build(&self) -> Result<DataGenerator> {
        let mut generator = DataGenerator::new();
        for column in &self.columns {
            let sampler = column.spec.build().map_err(|e| {
                TableMillError::invalid_config(format!("column '{}': {e}", column.name))
            })?;
            generator = generator.add_boxed_column(column.name.clone(), sampler)?;
        }
        Ok(generator)
    }
}

fn default_float_range() -> (f64, f64) {
    DEFAULT_FLOAT_RANGE
}

fn default_int_range() -> (i64, i64) {
    DEFAULT_INT_RANGE
}

fn default_na_value() -> String {
    DEFAULT_NA_VALUE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_schema() {
        let schema: TableSchema = serde_json::from_str(
            r#"{
                "columns": [
                    {"name": "vehicle", "kind": "categorical",
                     "categories": ["car", "bus", "bicycle"],
                     "missing_rate": [0.2, 0.5], "na_value": "NA"},
                    {"name": "year", "kind": "integer",
                     "values_range": [1950, 2010], "missing_rate": [0.1, 0.2]},
                    {"name": "value", "kind": "float",
                     "values_range": [100000.0, 1000000.0]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.columns.len(), 3);
        let generator = schema.build().unwrap();
        assert_eq!(generator.column_names(), vec!["vehicle", "year", "value"]);
    }

    #[test]
    fn test_defaults_applied() {
        let schema: TableSchema = serde_json::from_str(
            r#"{"columns": [{"name": "x", "kind": "float"}]}"#,
        )
        .unwrap();
        match &schema.columns[0].spec {
            ColumnSpec::Float {
                values_range,
                missing_rate,
            } => {
                assert_eq!(*values_range, DEFAULT_FLOAT_RANGE);
                assert_eq!(*missing_rate, (0.0, 0.0));
            }
            other => panic!("expected float spec, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: std::result::Result<TableSchema, _> = serde_json::from_str(
            r#"{"columns": [{"name": "x", "kind": "gaussian"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_invalid_column() {
        let schema: TableSchema = serde_json::from_str(
            r#"{"columns": [{"name": "x", "kind": "float",
                "values_range": [5.0, 1.0]}]}"#,
        )
        .unwrap();
        let err = schema.build().unwrap_err();
        assert!(err.to_string().contains("column 'x'"));
    }

    #[test]
    fn test_build_rejects_proportions_not_summing_to_one() {
        let schema: TableSchema = serde_json::from_str(
            r#"{"columns": [{"name": "x", "kind": "categorical_proportional",
                "categories": ["a", "b"], "proportions": [0.9, 0.2]}]}"#,
        )
        .unwrap();
        assert!(schema.build().is_err());
    }

    #[test]
    fn test_build_rejects_duplicate_names() {
        let schema: TableSchema = serde_json::from_str(
            r#"{"columns": [
                {"name": "x", "kind": "float"},
                {"name": "x", "kind": "integer"}
            ]}"#,
        )
        .unwrap();
        assert!(schema.build().is_err());
    }

    #[test]
    fn test_schema_roundtrip() {
        let schema = TableSchema {
            columns: vec![ColumnSchema {
                name: "vehicle".to_string(),
                spec: ColumnSpec::CategoricalProportional {
                    categories: vec!["car".to_string(), "bus".to_string()],
                    proportions: vec![0.7, 0.3],
                    missing_rate: (0.0, 0.1),
                    na_value: "NA".to_string(),
                },
            }],
        };
        let text = serde_json::to_string(&schema).unwrap();
        let parsed: TableSchema = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.columns.len(), 1);
        assert_eq!(parsed.columns[0].name, "vehicle");
    }
}
