//! Configuration types for the figure builders

use histostats_core::{check_conf_level, EffectSizeType, Error as CoreError, StatsType};
use histostats_histogram::validate_binwidth;
use histostats_inference::OneSampleRequest;
use histostats_plot::{Aesthetics, Annotation, Component, GridLayout, TagLevels, Theme};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::Result;

/// Options of the single-variable histogram builder
///
/// Every field except [`HistostatsOptions::component`] round-trips through
/// serde, so options can be loaded from JSON:
///
/// ```rust
/// use histostats_polars::HistostatsOptions;
/// use histostats_core::StatsType;
///
/// let options: HistostatsOptions =
///     serde_json::from_str(r#"{"stats_type": "np", "digits": 3}"#).unwrap();
/// assert_eq!(options.stats_type, StatsType::Nonparametric);
/// assert_eq!(options.conf_level, 0.95);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistostatsOptions {
    /// Test family for the subtitle
    pub stats_type: StatsType,
    /// Reference value of the one-sample test
    pub test_value: f64,
    /// Parametric effect size
    pub effsize_type: EffectSizeType,
    pub conf_level: f64,
    /// Trim fraction of the robust family
    pub tr: f64,
    /// Cauchy prior scale of the Bayes factor
    pub bf_prior: f64,
    pub digits: usize,
    /// Put the test expression in the subtitle
    pub results_subtitle: bool,
    /// Put the Bayes factor in the caption (parametric family only)
    pub bf_message: bool,
    /// Bin width; derived from the data when unset
    pub binwidth: Option<f64>,
    pub bin_args: Aesthetics,
    pub centrality_plotting: bool,
    /// Family of the centrality line; defaults to `stats_type`
    pub centrality_type: Option<StatsType>,
    pub centrality_line_args: Aesthetics,
    pub normal_curve: bool,
    pub normal_curve_args: Aesthetics,
    pub xlab: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub caption: Option<String>,
    pub theme: Theme,
    /// Added to the figure after everything else
    #[serde(skip)]
    pub component: Option<Arc<dyn Component>>,
}

impl Default for HistostatsOptions {
    fn default() -> Self {
        Self {
            stats_type: StatsType::Parametric,
            test_value: 0.0,
            effsize_type: EffectSizeType::HedgesG,
            conf_level: 0.95,
            tr: 0.2,
            bf_prior: 0.707,
            digits: 2,
            results_subtitle: true,
            bf_message: true,
            binwidth: None,
            bin_args: Aesthetics::bins(),
            centrality_plotting: true,
            centrality_type: None,
            centrality_line_args: Aesthetics::centrality_line(),
            normal_curve: false,
            normal_curve_args: Aesthetics::normal_curve(),
            xlab: None,
            title: None,
            subtitle: None,
            caption: None,
            theme: Theme::default(),
            component: None,
        }
    }
}

impl HistostatsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats_type(mut self, stats_type: StatsType) -> Self {
        self.stats_type = stats_type;
        self
    }

    pub fn with_test_value(mut self, test_value: f64) -> Self {
        self.test_value = test_value;
        self
    }

    pub fn with_effsize_type(mut self, effsize_type: EffectSizeType) -> Self {
        self.effsize_type = effsize_type;
        self
    }

    pub fn with_conf_level(mut self, conf_level: f64) -> Self {
        self.conf_level = conf_level;
        self
    }

    pub fn with_tr(mut self, tr: f64) -> Self {
        self.tr = tr;
        self
    }

    pub fn with_bf_prior(mut self, bf_prior: f64) -> Self {
        self.bf_prior = bf_prior;
        self
    }

    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_results_subtitle(mut self, on: bool) -> Self {
        self.results_subtitle = on;
        self
    }

    pub fn with_bf_message(mut self, on: bool) -> Self {
        self.bf_message = on;
        self
    }

    pub fn with_binwidth(mut self, binwidth: f64) -> Self {
        self.binwidth = Some(binwidth);
        self
    }

    pub fn with_bin_args(mut self, bin_args: Aesthetics) -> Self {
        self.bin_args = bin_args;
        self
    }

    pub fn with_centrality_plotting(mut self, on: bool) -> Self {
        self.centrality_plotting = on;
        self
    }

    pub fn with_centrality_type(mut self, centrality_type: StatsType) -> Self {
        self.centrality_type = Some(centrality_type);
        self
    }

    pub fn with_centrality_line_args(mut self, args: Aesthetics) -> Self {
        self.centrality_line_args = args;
        self
    }

    pub fn with_normal_curve(mut self, on: bool) -> Self {
        self.normal_curve = on;
        self
    }

    pub fn with_normal_curve_args(mut self, args: Aesthetics) -> Self {
        self.normal_curve_args = args;
        self
    }

    pub fn with_xlab(mut self, xlab: impl Into<String>) -> Self {
        self.xlab = Some(xlab.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Component added last, after the builder's own layers
    pub fn with_component(mut self, component: impl Component + 'static) -> Self {
        self.component = Some(Arc::new(component));
        self
    }

    /// Family used for the centrality line
    pub fn resolved_centrality_type(&self) -> StatsType {
        self.centrality_type.unwrap_or(self.stats_type)
    }

    /// Whether the Bayes factor caption is produced
    pub fn shows_bayes_caption(&self) -> bool {
        self.stats_type == StatsType::Parametric && self.results_subtitle && self.bf_message
    }

    /// Request for the testing engine over `sample`
    pub fn request<'a>(&self, sample: &'a [f64], variable: &'a str) -> OneSampleRequest<'a> {
        OneSampleRequest::new(sample, variable)
            .with_stats_type(self.stats_type)
            .with_test_value(self.test_value)
            .with_effsize_type(self.effsize_type)
            .with_conf_level(self.conf_level)
            .with_digits(self.digits)
            .with_tr(self.tr)
            .with_bf_prior(self.bf_prior)
    }

    /// Check option ranges before any data is touched
    pub fn validate(&self) -> Result<()> {
        check_conf_level(self.conf_level)?;
        if !(0.0..0.5).contains(&self.tr) {
            return Err(CoreError::invalid_trim(self.tr).into());
        }
        if !(self.bf_prior.is_finite() && self.bf_prior > 0.0) {
            return Err(CoreError::InvalidParameter(format!(
                "Bayes factor prior scale {} must be positive",
                self.bf_prior
            ))
            .into());
        }
        if let Some(binwidth) = self.binwidth {
            validate_binwidth(binwidth)?;
        }
        self.bin_args.validate()?;
        self.centrality_line_args.validate()?;
        self.normal_curve_args.validate()?;
        Ok(())
    }
}

/// Layout and annotation of a grouped figure grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotGridOptions {
    pub layout: GridLayout,
    pub annotation: Annotation,
}

impl PlotGridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nrow(mut self, nrow: usize) -> Self {
        self.layout = self.layout.with_nrow(nrow);
        self
    }

    pub fn with_ncol(mut self, ncol: usize) -> Self {
        self.layout = self.layout.with_ncol(ncol);
        self
    }

    pub fn with_tag_levels(mut self, levels: TagLevels) -> Self {
        self.annotation = self.annotation.with_tag_levels(levels);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.annotation = self.annotation.with_title(title);
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.annotation = self.annotation.with_subtitle(subtitle);
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.annotation = self.annotation.with_caption(caption);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_defaults() {
        let options = HistostatsOptions::default();
        assert_eq!(options.stats_type, StatsType::Parametric);
        assert_eq!(options.effsize_type, EffectSizeType::HedgesG);
        assert_eq!(options.bf_prior, 0.707);
        assert_eq!(options.bin_args, Aesthetics::bins());
        assert!(options.binwidth.is_none());
        assert!(options.shows_bayes_caption());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_caption_policy() {
        let base = HistostatsOptions::new();
        assert!(!base.clone().with_stats_type(StatsType::Robust).shows_bayes_caption());
        assert!(!base.clone().with_bf_message(false).shows_bayes_caption());
        assert!(!base.with_results_subtitle(false).shows_bayes_caption());
    }

    #[test]
    fn test_centrality_type_falls_back() {
        let options = HistostatsOptions::new().with_stats_type(StatsType::Robust);
        assert_eq!(options.resolved_centrality_type(), StatsType::Robust);
        let options = options.with_centrality_type(StatsType::Nonparametric);
        assert_eq!(options.resolved_centrality_type(), StatsType::Nonparametric);
    }

    #[test]
    fn test_request_carries_options() {
        let data = [1.0, 2.0, 3.0];
        let options = HistostatsOptions::new()
            .with_stats_type(StatsType::Bayes)
            .with_test_value(2.5)
            .with_tr(0.1)
            .with_digits(4);
        let request = options.request(&data, "x");
        assert_eq!(request.stats_type, StatsType::Bayes);
        assert_eq!(request.test_value, 2.5);
        assert_eq!(request.tr, 0.1);
        assert_eq!(request.digits, 4);
        assert_eq!(request.variable, "x");
    }

    #[test]
    fn test_validation() {
        let bad = [
            HistostatsOptions::new().with_conf_level(1.0),
            HistostatsOptions::new().with_tr(0.5),
            HistostatsOptions::new().with_bf_prior(-1.0),
            HistostatsOptions::new().with_bin_args(Aesthetics::new().with_alpha(2.0)),
        ];
        for options in bad {
            assert!(matches!(options.validate(), Err(Error::Core(_))));
        }
        assert!(matches!(
            HistostatsOptions::new().with_binwidth(0.0).validate(),
            Err(Error::Core(CoreError::DegenerateBinWidth(_)))
        ));
    }

    #[test]
    fn test_serde_skips_component() {
        let json = serde_json::to_string(&HistostatsOptions::new().with_binwidth(2.0)).unwrap();
        assert!(!json.contains("component"));
        let parsed: HistostatsOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.binwidth, Some(2.0));
        assert!(parsed.component.is_none());

        let grid: PlotGridOptions =
            serde_json::from_str(r#"{"layout": {"nrow": 2}, "annotation": {"tag_levels": "upper"}}"#)
                .unwrap();
        assert_eq!(grid, PlotGridOptions::new().with_nrow(2).with_tag_levels(TagLevels::Upper));
    }
}
