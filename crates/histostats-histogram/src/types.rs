//! Binned counts

use std::fmt;

/// One `(left, right]` interval and its count
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// Left edge of the bin (exclusive, except for the first bin)
    pub left: f64,
    /// Right edge of the bin (inclusive)
    pub right: f64,
    /// Values that fell in the interval
    pub count: usize,
    /// `count / (total_count * width)`
    pub density: f64,
}

impl HistogramBin {
    /// Bin over `(left, right]` holding `count` of `total_count` values
    pub fn new(left: f64, right: f64, count: usize, total_count: usize) -> Self {
        let width = right - left;
        let density = if width > 0.0 && total_count > 0 {
            count as f64 / (total_count as f64 * width)
        } else {
            0.0
        };

        Self {
            left,
            right,
            count,
            density,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Right-closed membership test
    pub fn contains(&self, value: f64) -> bool {
        value > self.left && value <= self.right
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}]: count={}, density={:.3}",
            self.left, self.right, self.count, self.density
        )
    }
}

/// Equal-width bins covering a sample
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
    /// Values binned
    total_count: usize,
    min: f64,
    max: f64,
    /// Width shared by every bin
    binwidth: f64,
}

impl Histogram {
    pub fn new(bins: Vec<HistogramBin>, total_count: usize, min: f64, max: f64, binwidth: f64) -> Self {
        Self {
            bins,
            total_count,
            min,
            max,
            binwidth,
        }
    }

    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Values binned, equal to the sum of the counts
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Width shared by every bin
    pub fn binwidth(&self) -> f64 {
        self.binwidth
    }

    /// Tallest bar
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// `len() + 1` breaks, left to right
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|bin| bin.left).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.right);
        }
        edges
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, n={}, binwidth={:.3}, range=[{:.3}, {:.3}])",
            self.len(),
            self.total_count,
            self.binwidth,
            self.min,
            self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bin() {
        let bin = HistogramBin::new(0.0, 1.0, 5, 10);
        assert_eq!(bin.width(), 1.0);
        assert!(bin.contains(0.5));
        assert!(bin.contains(1.0));
        assert!(!bin.contains(0.0));
        assert_eq!(bin.density, 0.5);
    }

    #[test]
    fn test_histogram() {
        let bins = vec![
            HistogramBin::new(0.0, 1.0, 2, 10),
            HistogramBin::new(1.0, 2.0, 5, 10),
            HistogramBin::new(2.0, 3.0, 3, 10),
        ];
        let hist = Histogram::new(bins, 10, 0.0, 3.0, 1.0);

        assert_eq!(hist.len(), 3);
        assert_eq!(hist.total_count(), 10);
        assert_eq!(hist.max_count(), 5);
        assert!(hist.to_string().contains("3 bins"));
        assert_eq!(hist.counts(), vec![2, 5, 3]);
        assert_eq!(hist.edges(), vec![0.0, 1.0, 2.0, 3.0]);
    }
}
