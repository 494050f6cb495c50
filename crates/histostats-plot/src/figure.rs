//! The figure value and its additive components
//!
//! A [`Figure`] is built by adding [`Component`]s to it, ggplot-style:
//!
//! ```rust
//! use histostats_plot::{Aesthetics, BinLayer, Figure, Labels, ReferenceLine};
//!
//! let data = [1.0, 2.0, 2.0, 3.0, 4.0];
//! let figure = Figure::new()
//!     + BinLayer::new(&data, 1.0, Aesthetics::bins()).unwrap()
//!     + ReferenceLine::new(2.4).with_label("mean")
//!     + Labels::new().x("value").y("count");
//!
//! assert_eq!(figure.reference_lines().len(), 1);
//! assert_eq!(figure.labels().x.as_deref(), Some("value"));
//! ```

use crate::guide::{Guides, Labels, SecondaryAxis};
use crate::layer::{BinLayer, NormalCurve, ReferenceLine};
use crate::theme::Theme;
use std::fmt;
use std::ops::Add;
use std::sync::Arc;

/// Something that can be added to a figure
///
/// Implementations consume the figure and return the updated one; a figure
/// is never mutated in place.
pub trait Component: fmt::Debug + Send + Sync {
    fn apply(&self, figure: Figure) -> Figure;
}

impl<C: Component + ?Sized> Component for Arc<C> {
    fn apply(&self, figure: Figure) -> Figure {
        (**self).apply(figure)
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn apply(&self, figure: Figure) -> Figure {
        (**self).apply(figure)
    }
}

/// A single histogram panel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    bins: Option<BinLayer>,
    curves: Vec<NormalCurve>,
    reference_lines: Vec<ReferenceLine>,
    secondary_axis: Option<SecondaryAxis>,
    guides: Guides,
    labels: Labels,
    theme: Theme,
}

impl Figure {
    /// An empty figure with the default theme
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bins(&self) -> Option<&BinLayer> {
        self.bins.as_ref()
    }

    pub fn curves(&self) -> &[NormalCurve] {
        &self.curves
    }

    pub fn reference_lines(&self) -> &[ReferenceLine] {
        &self.reference_lines
    }

    pub fn secondary_axis(&self) -> Option<&SecondaryAxis> {
        self.secondary_axis.as_ref()
    }

    pub fn guides(&self) -> Guides {
        self.guides
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Data range of the x axis covering bars, lines and curves
    pub fn x_range(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        if let Some(bins) = &self.bins {
            let hist = bins.histogram();
            if let (Some(first), Some(last)) = (hist.bins().first(), hist.bins().last()) {
                lo = lo.min(first.left);
                hi = hi.max(last.right);
            }
        }
        for line in &self.reference_lines {
            lo = lo.min(line.x);
            hi = hi.max(line.x);
        }
        for curve in &self.curves {
            lo = lo.min(curve.mean - 3.0 * curve.sd);
            hi = hi.max(curve.mean + 3.0 * curve.sd);
        }
        if !(lo.is_finite() && hi.is_finite()) {
            return (0.0, 1.0);
        }
        if hi <= lo {
            return (lo - 0.5, hi + 0.5);
        }
        (lo, hi)
    }

    /// Largest y value drawn (bar count or curve peak), at least one
    pub fn y_max(&self) -> f64 {
        let bars = self
            .bins
            .as_ref()
            .map(|b| b.histogram().max_count() as f64)
            .unwrap_or(0.0);
        let curves = self.curves.iter().map(NormalCurve::peak).fold(0.0, f64::max);
        bars.max(curves).max(1.0)
    }
}

impl<C: Component> Add<C> for Figure {
    type Output = Figure;

    fn add(self, component: C) -> Figure {
        component.apply(self)
    }
}

impl Component for BinLayer {
    fn apply(&self, mut figure: Figure) -> Figure {
        figure.bins = Some(self.clone());
        figure
    }
}

impl Component for ReferenceLine {
    fn apply(&self, mut figure: Figure) -> Figure {
        figure.reference_lines.push(self.clone());
        figure
    }
}

impl Component for NormalCurve {
    fn apply(&self, mut figure: Figure) -> Figure {
        figure.curves.push(*self);
        figure
    }
}

impl Component for SecondaryAxis {
    fn apply(&self, mut figure: Figure) -> Figure {
        figure.secondary_axis = Some(self.clone());
        figure
    }
}

impl Component for Guides {
    fn apply(&self, mut figure: Figure) -> Figure {
        figure.guides = *self;
        figure
    }
}

impl Component for Labels {
    fn apply(&self, mut figure: Figure) -> Figure {
        figure.labels = figure.labels.merge(self);
        figure
    }
}

impl Component for Theme {
    fn apply(&self, mut figure: Figure) -> Figure {
        figure.theme = self.clone();
        figure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Aesthetics, Color};

    const DATA: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];

    #[derive(Debug)]
    struct Retitle(&'static str);

    impl Component for Retitle {
        fn apply(&self, figure: Figure) -> Figure {
            figure + Labels::new().title(self.0)
        }
    }

    #[test]
    fn test_add_is_value_semantics() {
        let base = Figure::new() + BinLayer::new(&DATA, 40.0, Aesthetics::bins()).unwrap();
        let with_line = base.clone() + ReferenceLine::new(18.67);
        assert!(base.reference_lines().is_empty());
        assert_eq!(with_line.reference_lines().len(), 1);
        assert_eq!(with_line.bins(), base.bins());
    }

    #[test]
    fn test_components_accumulate() {
        let figure = Figure::new()
            + BinLayer::new(&DATA, 40.0, Aesthetics::bins()).unwrap()
            + SecondaryAxis::proportion(8, 2)
            + Guides::no_fill()
            + ReferenceLine::new(2.5)
            + ReferenceLine::new(18.0)
            + Labels::new().x("x").y("count")
            + Theme::classic();

        assert_eq!(figure.reference_lines().len(), 2);
        assert_eq!(figure.secondary_axis().unwrap().denominator, 8);
        assert!(!figure.guides().fill);
        assert_eq!(figure.labels().y.as_deref(), Some("count"));
        assert!(figure.theme().grid_colour.is_none());
    }

    #[test]
    fn test_user_component_via_arc() {
        let extra: Arc<dyn Component> = Arc::new(Retitle("custom"));
        let figure = Figure::new() + Labels::new().title("auto") + extra.clone();
        assert_eq!(figure.labels().title.as_deref(), Some("custom"));

        let boxed: Box<dyn Component> = Box::new(Retitle("boxed"));
        let figure = figure + boxed;
        assert_eq!(figure.labels().title.as_deref(), Some("boxed"));
    }

    #[test]
    fn test_ranges() {
        assert_eq!(Figure::new().x_range(), (0.0, 1.0));
        assert_eq!(Figure::new().y_max(), 1.0);

        let figure = Figure::new()
            + BinLayer::new(&DATA, 40.0, Aesthetics::new().with_fill(Color::RED)).unwrap()
            + ReferenceLine::new(150.0);
        let (lo, hi) = figure.x_range();
        assert!(lo <= 1.0);
        assert_eq!(hi, 150.0);
        assert_eq!(figure.y_max(), 5.0);
    }
}
