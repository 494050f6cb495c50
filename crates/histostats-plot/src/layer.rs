//! Geometric layers of a histogram figure

use crate::style::{Aesthetics, Color, LineType};
use histostats_core::{math, Error, Result};
use histostats_histogram::{BinWidthBuilder, Histogram, HistogramBuilder};
use statrs::distribution::{Continuous, Normal};

/// Bars of a fixed-width histogram
#[derive(Debug, Clone, PartialEq)]
pub struct BinLayer {
    histogram: Histogram,
    style: Aesthetics,
}

impl BinLayer {
    /// Bin `data` with `binwidth` and style the bars with `style`
    pub fn new(data: &[f64], binwidth: f64, style: Aesthetics) -> Result<Self> {
        style.validate()?;
        let histogram = BinWidthBuilder::new(binwidth)?.build(data)?;
        Ok(Self { histogram, style })
    }

    /// Wrap an already computed histogram
    pub fn from_histogram(histogram: Histogram, style: Aesthetics) -> Self {
        Self { histogram, style }
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn style(&self) -> &Aesthetics {
        &self.style
    }

    pub fn binwidth(&self) -> f64 {
        self.histogram.binwidth()
    }

    /// Whether the fill follows the count gradient rather than a constant
    pub fn fill_by_count(&self) -> bool {
        self.style.fill.is_none()
    }

    /// Fill colour of every bar, in bin order
    pub fn fill_colours(&self) -> Vec<Color> {
        if let Some(fill) = self.style.fill {
            return vec![fill; self.histogram.len()];
        }
        let max = self.histogram.max_count().max(1) as f64;
        self.histogram
            .bins()
            .iter()
            .map(|bin| Color::GRADIENT_LOW.lerp(&Color::GRADIENT_HIGH, bin.count as f64 / max))
            .collect()
    }
}

/// Vertical reference line with an optional text label
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub x: f64,
    pub label: Option<String>,
    pub style: Aesthetics,
}

impl ReferenceLine {
    /// Line at `x`
    pub fn new(x: f64) -> Self {
        Self {
            x,
            label: None,
            style: Aesthetics::centrality_line(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: Aesthetics) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn linetype(&self) -> LineType {
        self.style.linetype_or(LineType::Dashed)
    }
}

/// Normal density matched to a sample and scaled to bar heights
///
/// The height at `x` is `n * binwidth * φ((x - mean) / sd) / sd`, so the area
/// under the curve equals the area of the bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalCurve {
    pub mean: f64,
    pub sd: f64,
    /// `n * binwidth`
    pub scale: f64,
    pub style: Aesthetics,
}

impl NormalCurve {
    /// Fit the curve to `sample` for bars of width `binwidth`
    pub fn fit(sample: &[f64], binwidth: f64, style: Aesthetics) -> Result<Self> {
        let mean = math::mean(sample)?;
        let sd = math::std_dev(sample)?;
        if sd.is_nan() || sd <= 0.0 {
            return Err(Error::Computation(
                "cannot fit a normal curve to constant data".to_string(),
            ));
        }
        Ok(Self {
            mean,
            sd,
            scale: sample.len() as f64 * binwidth,
            style,
        })
    }

    /// Curve height at `x`
    pub fn height(&self, x: f64) -> Result<f64> {
        let normal = Normal::new(self.mean, self.sd).map_err(|e| Error::distribution("normal", e))?;
        Ok(self.scale * normal.pdf(x))
    }

    /// `points` evenly spaced samples of the curve over `[from, to]`
    pub fn points(&self, from: f64, to: f64, points: usize) -> Result<Vec<(f64, f64)>> {
        let normal = Normal::new(self.mean, self.sd).map_err(|e| Error::distribution("normal", e))?;
        let points = points.max(2);
        let step = (to - from) / (points - 1) as f64;
        Ok((0..points)
            .map(|i| {
                let x = from + i as f64 * step;
                (x, self.scale * normal.pdf(x))
            })
            .collect())
    }

    /// Height at the mean
    pub fn peak(&self) -> f64 {
        self.scale / (self.sd * (2.0 * std::f64::consts::PI).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DATA: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];

    #[test]
    fn test_bin_layer() {
        let layer = BinLayer::new(&DATA, 10.0, Aesthetics::bins()).unwrap();
        assert_eq!(layer.binwidth(), 10.0);
        assert_eq!(layer.histogram().total_count(), 6);
        assert!(!layer.fill_by_count());
        assert!(layer.fill_colours().iter().all(|c| *c == Color::GREY50));

        assert!(BinLayer::new(&DATA, 0.0, Aesthetics::bins()).is_err());
        assert!(BinLayer::new(&DATA, 1.0, Aesthetics::new().with_alpha(-0.1)).is_err());
    }

    #[test]
    fn test_count_gradient() {
        let layer = BinLayer::new(&DATA, 40.0, Aesthetics::new()).unwrap();
        assert!(layer.fill_by_count());
        let colours = layer.fill_colours();
        let counts = layer.histogram().counts();
        let tallest = counts.iter().position(|&c| c == layer.histogram().max_count()).unwrap();
        assert_eq!(colours[tallest], Color::GRADIENT_HIGH);
        let empty = counts.iter().position(|&c| c == 0).unwrap();
        assert_eq!(colours[empty], Color::GRADIENT_LOW);
    }

    #[test]
    fn test_reference_line() {
        let line = ReferenceLine::new(2.5).with_label("median");
        assert_eq!(line.label.as_deref(), Some("median"));
        assert_eq!(line.linetype(), LineType::Dashed);
        let solid = line.with_style(Aesthetics::new().with_linetype(LineType::Solid));
        assert_eq!(solid.linetype(), LineType::Solid);
    }

    #[test]
    fn test_normal_curve_area() {
        let sample = [4.0, 5.0, 5.5, 6.0, 7.0, 5.2, 4.8];
        let curve = NormalCurve::fit(&sample, 0.5, Aesthetics::normal_curve()).unwrap();
        assert_relative_eq!(curve.scale, 3.5);

        // trapezoid area over +-8 sd equals n * binwidth
        let pts = curve
            .points(curve.mean - 8.0 * curve.sd, curve.mean + 8.0 * curve.sd, 2001)
            .unwrap();
        let area: f64 = pts
            .windows(2)
            .map(|w| 0.5 * (w[0].1 + w[1].1) * (w[1].0 - w[0].0))
            .sum();
        assert_relative_eq!(area, 3.5, epsilon = 1e-6);
        assert_relative_eq!(curve.height(curve.mean).unwrap(), curve.peak(), epsilon = 1e-12);

        assert!(NormalCurve::fit(&[2.0, 2.0], 1.0, Aesthetics::normal_curve()).is_err());
    }
}
