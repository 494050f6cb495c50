//! Fixed bin-width histograms for histostats
//!
//! This crate provides the binned-count aggregation behind the histogram
//! layer of a figure, plus the default bin-width heuristic
//! `(max - min) / sqrt(n)`.
//!
//! # Examples
//!
//! ```rust
//! use histostats_histogram::{default_binwidth, BinWidthBuilder, HistogramBuilder};
//!
//! let data = vec![1.0, 2.0, 2.0, 3.0, 4.0, 100.0];
//! let width = default_binwidth(&data).unwrap();
//! let histogram = BinWidthBuilder::new(width).unwrap().build(&data).unwrap();
//!
//! for bin in histogram.bins() {
//!     println!("  ({:.1}, {:.1}]: count={}", bin.left, bin.right, bin.count);
//! }
//! assert_eq!(histogram.counts()[0], 5);
//! assert_eq!(histogram.total_count(), 6);
//! ```

pub mod builders;
pub mod traits;
pub mod types;

pub use builders::{default_binwidth, validate_binwidth, BinWidthBuilder, MAX_BINS};
pub use traits::HistogramBuilder;
pub use types::{Histogram, HistogramBin};

/// Create a histogram with a fixed bin width
pub fn binned_histogram(data: &[f64], binwidth: f64) -> crate::Result<Histogram> {
    BinWidthBuilder::new(binwidth)?.build(data)
}

pub use histostats_core::Result;
