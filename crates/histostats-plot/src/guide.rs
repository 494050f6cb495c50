//! Axes, legends and text labels

use histostats_core::format::format_percent;

/// Secondary y-axis showing counts as a share of the frame's rows
///
/// The denominator is the row count of the input before missing values were
/// dropped, so proportions can sum to less than one.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryAxis {
    pub name: String,
    pub denominator: usize,
    /// Decimals of the percentage tick labels
    pub digits: usize,
}

impl SecondaryAxis {
    /// Proportion axis named `"proportion"`
    pub fn proportion(denominator: usize, digits: usize) -> Self {
        Self {
            name: "proportion".to_string(),
            denominator,
            digits,
        }
    }

    /// Map a count to the secondary scale
    pub fn transform(&self, count: f64) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            count / self.denominator as f64
        }
    }

    /// Map a secondary-scale value back to a count
    pub fn inverse(&self, proportion: f64) -> f64 {
        proportion * self.denominator as f64
    }

    /// Tick label for a count, e.g. `"12.5%"`
    pub fn label(&self, count: f64) -> String {
        format_percent(self.transform(count), self.digits)
    }
}

/// Legend visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guides {
    /// Show the legend of the fill scale
    pub fill: bool,
}

impl Guides {
    /// Hide the fill legend
    pub fn no_fill() -> Self {
        Self { fill: false }
    }
}

impl Default for Guides {
    fn default() -> Self {
        Self { fill: true }
    }
}

/// Axis titles and the title/subtitle/caption block
///
/// Applying labels to a figure only overwrites the fields that are set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Labels {
    pub x: Option<String>,
    pub y: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub caption: Option<String>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, x: impl Into<String>) -> Self {
        self.x = Some(x.into());
        self
    }

    pub fn y(mut self, y: impl Into<String>) -> Self {
        self.y = Some(y.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set any of the optional fields that are `Some`
    pub fn with_optional(
        mut self,
        title: Option<String>,
        subtitle: Option<String>,
        caption: Option<String>,
    ) -> Self {
        self.title = title.or(self.title);
        self.subtitle = subtitle.or(self.subtitle);
        self.caption = caption.or(self.caption);
        self
    }

    /// Overlay `other` on `self`; set fields of `other` win
    pub fn merge(self, other: &Labels) -> Self {
        Self {
            x: other.x.clone().or(self.x),
            y: other.y.clone().or(self.y),
            title: other.title.clone().or(self.title),
            subtitle: other.subtitle.clone().or(self.subtitle),
            caption: other.caption.clone().or(self.caption),
        }
    }
}
