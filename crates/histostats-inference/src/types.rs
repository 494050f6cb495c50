//! Result types for one-sample tests

use crate::expression::Expression;
use histostats_core::StatsType;
use std::fmt;

/// A confidence (or credible) interval around a point estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// The point estimate
    pub estimate: f64,
    /// Confidence level (e.g., 0.95 for 95% CI)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, estimate: f64, confidence_level: f64) -> Self {
        Self {
            lower,
            upper,
            estimate,
            confidence_level,
        }
    }

    /// Symmetric interval `estimate ± margin`
    pub fn symmetric(estimate: f64, margin: f64, confidence_level: f64) -> Self {
        Self::new(estimate - margin, estimate + margin, estimate, confidence_level)
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Apply a monotone increasing transform to every bound
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.lower), f(self.upper), f(self.estimate), self.confidence_level)
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{}, {}], estimate: {}",
            self.confidence_level * 100.0,
            self.lower,
            self.upper,
            self.estimate
        )
    }
}

/// Which effect size accompanies a test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSizeKind {
    /// Hedges' g
    HedgesG,
    /// Cohen's d
    CohenD,
    /// Rank-biserial correlation
    RankBiserial,
    /// Trimmed mean
    TrimmedMean,
    /// Posterior difference from the test value
    PosteriorDifference,
}

impl EffectSizeKind {
    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::HedgesG => "Hedges' g",
            Self::CohenD => "Cohen's d",
            Self::RankBiserial => "rank-biserial correlation",
            Self::TrimmedMean => "trimmed mean",
            Self::PosteriorDifference => "posterior difference",
        }
    }
}

/// An effect size estimate with its interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSize {
    /// The type of effect size
    pub kind: EffectSizeKind,
    /// Point estimate and interval
    pub interval: ConfidenceInterval,
}

impl EffectSize {
    /// Create a new effect size
    pub fn new(kind: EffectSizeKind, interval: ConfidenceInterval) -> Self {
        Self { kind, interval }
    }

    /// The point estimate
    pub fn estimate(&self) -> f64 {
        self.interval.estimate
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.3} ({})", self.kind.name(), self.estimate(), self.interval)
    }
}

/// Outcome of a one-sample test
///
/// Consumers that only need a label read [`StatsResult::expression`]; the
/// numeric fields are kept for programmatic use.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsResult {
    /// Family that produced this result
    pub stats_type: StatsType,
    /// Name of the procedure
    pub method: &'static str,
    /// Test statistic (t, V, ...)
    pub statistic: f64,
    /// Degrees of freedom, when the statistic has them
    pub df: Option<f64>,
    /// Two-sided p-value (frequentist families)
    pub p_value: Option<f64>,
    /// Bayes factor in favour of the alternative (Bayesian family)
    pub bayes_factor: Option<f64>,
    /// Effect size with its interval
    pub effect_size: EffectSize,
    /// Number of observations the test saw
    pub n_obs: usize,
    /// Renderable summary
    pub expression: Expression,
}
