//! Fixed bin-width histogram construction and the default width heuristic

use crate::traits::HistogramBuilder;
use crate::types::{Histogram, HistogramBin};
use histostats_core::{math, Error, Result};
use tracing::trace;

/// Upper bound on the number of bins a width may produce
pub const MAX_BINS: f64 = 1e6;

/// Default bin width: `(max - min) / sqrt(n)`
///
/// Fails with [`Error::DegenerateBinWidth`] when the result is not a positive
/// finite number, which happens for empty samples, single values, constant
/// samples and samples containing infinities.
pub fn default_binwidth(sample: &[f64]) -> Result<f64> {
    let Some((min, max)) = math::min_max(sample) else {
        return Err(Error::DegenerateBinWidth(f64::NAN));
    };
    let width = (max - min) / (sample.len() as f64).sqrt();
    validate_binwidth(width)?;
    trace!(n = sample.len(), min, max, width, "computed default bin width");
    Ok(width)
}

/// Check that a bin width is positive and finite
pub fn validate_binwidth(width: f64) -> Result<f64> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(Error::DegenerateBinWidth(width))
    }
}

/// Histogram builder with a fixed bin width
///
/// Bins are right-closed `(a, b]` with the first bin also including its left
/// edge. Unless a boundary is given, bin edges sit at half-width offsets so
/// that bins are centred on multiples of the width. Edges are widened by a
/// tiny fuzz factor so values that sit exactly on an edge are not lost to
/// rounding.
#[derive(Debug, Clone, Copy)]
pub struct BinWidthBuilder {
    binwidth: f64,
    boundary: Option<f64>,
}

impl BinWidthBuilder {
    /// Create a builder, rejecting non-positive or non-finite widths
    pub fn new(binwidth: f64) -> Result<Self> {
        Ok(Self {
            binwidth: validate_binwidth(binwidth)?,
            boundary: None,
        })
    }

    /// Pin a bin edge to `boundary`
    pub fn with_boundary(mut self, boundary: f64) -> Self {
        self.boundary = Some(boundary);
        self
    }

    /// Bin edges covering `[min, max]`
    pub fn breaks(&self, min: f64, max: f64) -> Result<Vec<f64>> {
        let width = self.binwidth;
        let boundary = self.boundary.unwrap_or(width / 2.0);

        let shift = ((min - boundary) / width).floor();
        let origin = boundary + shift * width;
        let max_x = max + (1.0 - 1e-8) * width;

        let span = (max_x - origin) / width;
        if !span.is_finite() || span > MAX_BINS {
            return Err(Error::InvalidParameter(format!(
                "Bin width {width} creates too many bins over [{min}, {max}]"
            )));
        }

        let steps = (span + 1e-10).floor() as usize;
        let mut breaks: Vec<f64> = (0..=steps).map(|k| origin + k as f64 * width).collect();
        if breaks.len() == 1 {
            breaks.push(origin + width);
        }
        Ok(breaks)
    }
}

impl HistogramBuilder for BinWidthBuilder {
    fn build(&self, sample: &[f64]) -> Result<Histogram> {
        let Some((min, max)) = math::min_max(sample) else {
            return Ok(Histogram::new(vec![], 0, 0.0, 0.0, self.binwidth));
        };
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::non_finite("histogram sample"));
        }

        let breaks = self.breaks(min, max)?;
        let nbins = breaks.len() - 1;

        // Fuzzed edges: first pushed left, the rest pushed right
        let fuzz = 1e-8 * self.binwidth;
        let fuzzy: Vec<f64> = breaks
            .iter()
            .enumerate()
            .map(|(i, &b)| if i == 0 { b - fuzz } else { b + fuzz })
            .collect();

        let mut counts = vec![0usize; nbins];
        for &value in sample {
            let above = fuzzy.partition_point(|&edge| edge < value);
            let idx = above.saturating_sub(1).min(nbins - 1);
            counts[idx] += 1;
        }

        let total = sample.len();
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin::new(breaks[i], breaks[i + 1], count, total))
            .collect();

        Ok(Histogram::new(bins, total, min, max, self.binwidth))
    }

    fn binwidth(&self) -> Option<f64> {
        Some(self.binwidth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_binwidth() {
        let data = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];
        let width = default_binwidth(&data).unwrap();
        assert_relative_eq!(width, 99.0 / 6f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(width, 40.4166, epsilon = 1e-4);
    }

    #[test]
    fn test_default_binwidth_degenerate() {
        assert!(matches!(default_binwidth(&[]), Err(Error::DegenerateBinWidth(_))));
        assert!(matches!(default_binwidth(&[3.0]), Err(Error::DegenerateBinWidth(_))));
        assert!(matches!(
            default_binwidth(&[2.0, 2.0, 2.0]),
            Err(Error::DegenerateBinWidth(w)) if w == 0.0
        ));
        assert!(matches!(
            default_binwidth(&[1.0, f64::INFINITY]),
            Err(Error::DegenerateBinWidth(_))
        ));
    }

    #[test]
    fn test_builder_rejects_bad_width() {
        assert!(BinWidthBuilder::new(0.0).is_err());
        assert!(BinWidthBuilder::new(-1.0).is_err());
        assert!(BinWidthBuilder::new(f64::NAN).is_err());
        assert!(BinWidthBuilder::new(0.5).is_ok());
    }

    #[test]
    fn test_breaks_are_centred_on_width_multiples() {
        let builder = BinWidthBuilder::new(1.0).unwrap();
        let breaks = builder.breaks(0.0, 3.0).unwrap();
        assert_eq!(breaks, vec![-0.5, 0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_build_counts() {
        let data = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];
        let width = default_binwidth(&data).unwrap();
        let hist = BinWidthBuilder::new(width).unwrap().build(&data).unwrap();

        assert_eq!(hist.len(), 3);
        assert_eq!(hist.counts(), vec![5, 0, 1]);
        assert_eq!(hist.total_count(), 6);
        assert_relative_eq!(hist.binwidth(), width);
    }

    #[test]
    fn test_values_on_edges_are_right_closed() {
        let builder = BinWidthBuilder::new(1.0).unwrap().with_boundary(0.0);
        let hist = builder.build(&[0.0, 1.0, 1.5, 2.0]).unwrap();
        // Bins [0,1], (1,2]
        assert_eq!(hist.counts(), vec![2, 2]);
    }

    #[test]
    fn test_too_many_bins() {
        let builder = BinWidthBuilder::new(1e-9).unwrap();
        assert!(matches!(
            builder.build(&[0.0, 1.0]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_sample() {
        let hist = BinWidthBuilder::new(1.0).unwrap().build(&[]).unwrap();
        assert!(hist.is_empty());
        assert_eq!(hist.total_count(), 0);
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn default_width_matches_formula(
                data in proptest::collection::vec(-1e4f64..1e4, 2..300),
            ) {
                let (min, max) = math::min_max(&data).unwrap();
                prop_assume!(max > min);
                let width = default_binwidth(&data).unwrap();
                prop_assert_eq!(width, (max - min) / (data.len() as f64).sqrt());
            }

            #[test]
            fn every_value_is_counted_once(
                data in proptest::collection::vec(-1e4f64..1e4, 2..300),
            ) {
                let (min, max) = math::min_max(&data).unwrap();
                prop_assume!(max > min);
                let width = default_binwidth(&data).unwrap();
                let hist = BinWidthBuilder::new(width).unwrap().build(&data).unwrap();
                prop_assert_eq!(hist.counts().iter().sum::<usize>(), data.len());
                let tolerance = 1e-9 * width;
                prop_assert!(hist.edges()[0] <= min + tolerance);
                prop_assert!(*hist.edges().last().unwrap() >= max - tolerance);
            }
        }
    }
}
