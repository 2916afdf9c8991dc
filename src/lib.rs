//! TableMill - Synthetic tabular dataset generation
//!
//! This crate generates synthetic tables for testing and prototyping:
//! independent columns of randomly distributed values (float, integer,
//! or categorical), each with a configurable value range or category
//! set and a configurable rate of missing data, composed into a single
//! in-memory sample by a generator.
//!
//! # Features
//!
//! - **Four column policies**: uniform floats, uniform integers,
//!   uniform categorical draws, and exact proportional allocation
//! - **Missing-data injection**: per-column missing-rate ranges with a
//!   guaranteed realized fraction
//! - **Reproducibility**: explicit seedable random sources, no global
//!   state
//! - **Parallel sampling**: columns sample concurrently with Rayon
//! - **Schema files**: declarative JSON schemas validated at build time
//! - **Export**: CSV and JSON records
//!
//! # Example
//!
//! ```rust
//! use tablemill::{CategoricalRandomColumn, DataGenerator, IntegerRandomColumn};
//!
//! # fn main() -> tablemill::Result<()> {
//! let generator = DataGenerator::new()
//!     .with_seed(42)
//!     .add_column(
//!         "vehicle",
//!         CategoricalRandomColumn::new(
//!             vec!["car".to_string(), "bus".to_string()],
//!             (0.0, 0.1),
//!         )?,
//!     )?
//!     .add_column("year", IntegerRandomColumn::new((1950, 2010), (0.0, 0.0))?)?;
//!
//! let table = generator.sample(100)?;
//! assert_eq!(table.num_rows(), 100);
//! assert_eq!(table.column_names(), vec!["vehicle", "year"]);
//! # Ok(())
//! # }
//! ```

pub mod column;
pub mod error;
pub mod generator;
pub mod missing;
pub mod random;
pub mod schema;
pub mod table;

pub use column::{
    CategoricalProportionalColumn, CategoricalRandomColumn, Column, ColumnData,
    FloatRandomColumn, IntegerRandomColumn,
};
pub use error::{Result, TableMillError};
pub use generator::DataGenerator;
pub use missing::MissingnessInjector;
pub use random::RandomSource;
pub use schema::{ColumnSchema, ColumnSpec, TableSchema};
pub use table::Table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::column::{
        CategoricalProportionalColumn, CategoricalRandomColumn, Column, ColumnData,
        FloatRandomColumn, IntegerRandomColumn,
    };
    pub use crate::error::Result;
    pub use crate::generator::DataGenerator;
    pub use crate::random::RandomSource;
    pub use crate::schema::TableSchema;
}
