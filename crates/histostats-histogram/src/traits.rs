//! Core traits for histogram building

use crate::types::Histogram;
use histostats_core::Result;

/// Trait for building histograms from sample data
pub trait HistogramBuilder {
    /// Build a histogram from the given sample
    fn build(&self, sample: &[f64]) -> Result<Histogram>;

    /// Build a histogram from pre-sorted data
    ///
    /// Default implementation just calls build().
    fn build_sorted(&self, sorted_sample: &[f64]) -> Result<Histogram> {
        self.build(sorted_sample)
    }

    /// Get the bin width (if known before seeing data)
    fn binwidth(&self) -> Option<f64> {
        None
    }
}
