//! Polars integration for histostats
//!
//! Builds histogram figures annotated with one-sample test results straight
//! from a DataFrame column, through the [`HistostatsExt`] extension trait.
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use histostats_polars::{HistostatsExt, HistostatsOptions};
//!
//! let df = df!["x" => [1.0, 2.0, 2.0, 3.0, 4.0, 100.0]].unwrap();
//! let figure = df.histostats("x", &HistostatsOptions::default()).unwrap();
//!
//! assert!(figure.labels().subtitle.is_some());
//! assert_eq!(figure.reference_lines().len(), 1);
//! ```

mod config;
mod data;
mod error;
mod methods;
mod traits;

pub use config::*;
pub use data::{partition_levels, NumericColumn};
pub use error::{Error, Result};
pub use traits::*;
