//! Centrality estimates for reference lines
//!
//! Each family has its own location estimator: the mean for parametric, the
//! median for nonparametric, the trimmed mean for robust and the posterior
//! median for Bayesian analyses.

use crate::bayes::bayes_test;
use crate::expression::{Expression, Symbol, Term};
use crate::parametric::t_critical;
use crate::robust::trimmed_test;
use crate::traits::OneSampleRequest;
use crate::types::ConfidenceInterval;
use histostats_core::{math, Error, Result, StatsType};
use statrs::distribution::{Binomial, DiscreteCDF};
use std::fmt;

/// A location estimate with an optional interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centrality {
    /// Family whose estimator produced the value
    pub stats_type: StatsType,
    /// Point estimate
    pub estimate: f64,
    /// Confidence or credible interval, when the estimator provides one
    pub interval: Option<ConfidenceInterval>,
}

impl Centrality {
    /// Name of the estimator
    pub fn estimator(&self) -> &'static str {
        match self.stats_type {
            StatsType::Parametric => "mean",
            StatsType::Nonparametric => "median",
            StatsType::Robust => "trimmed",
            StatsType::Bayes => "posterior",
        }
    }

    /// Label such as `μ̂_mean = 18.67, CI_95% [-23.16, 60.50]`
    pub fn label(&self, digits: usize) -> String {
        let mut expression = Expression::new(vec![Term::value(
            Symbol::new("μ").hat().sub(self.estimator()),
            self.estimate,
            digits,
        )]);
        if let Some(ci) = self.interval {
            let method = (self.stats_type == StatsType::Bayes).then_some("ETI");
            expression.push(Term::interval(
                ci.confidence_level,
                ci.lower,
                ci.upper,
                digits,
                method,
            ));
        }
        expression.to_string()
    }
}

impl fmt::Display for Centrality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(2))
    }
}

/// Distribution-free interval for the median from order statistics
///
/// With `k` the number of `j` such that `P(Bin(n, 0.5) <= j) <= α/2`, the
/// interval is `[x_(k), x_(n-k+1)]`. Returns `None` when the sample is too
/// small for any order statistic to reach the requested coverage.
pub fn median_interval(sorted_sample: &[f64], conf_level: f64) -> Result<Option<(f64, f64)>> {
    let n = sorted_sample.len();
    if n == 0 {
        return Err(Error::empty_input());
    }
    let binom = Binomial::new(0.5, n as u64).map_err(|e| Error::distribution("binomial", e))?;
    let alpha = 1.0 - conf_level;
    let k = (0..=n as u64)
        .take_while(|&j| binom.cdf(j) <= alpha / 2.0)
        .count();
    if k == 0 {
        return Ok(None);
    }
    Ok(Some((sorted_sample[k - 1], sorted_sample[n - k])))
}

/// Compute the centrality of `request.sample` for `request.stats_type`
pub fn centrality(request: &OneSampleRequest<'_>) -> Result<Centrality> {
    let sample = request.sample;
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    let conf_level = request.conf_level;
    let (estimate, interval) = match request.stats_type {
        StatsType::Parametric => {
            let mean = math::mean(sample)?;
            let interval = if sample.len() >= 2 {
                let n = sample.len() as f64;
                let se = math::std_dev(sample)? / n.sqrt();
                let margin = t_critical(n - 1.0, conf_level)? * se;
                Some(ConfidenceInterval::symmetric(mean, margin, conf_level))
            } else {
                None
            };
            (mean, interval)
        }
        StatsType::Nonparametric => {
            let sorted = math::sorted(sample);
            let median = math::median_sorted(&sorted)?;
            let interval = median_interval(&sorted, conf_level)?
                .map(|(lo, hi)| ConfidenceInterval::new(lo, hi, median, conf_level));
            (median, interval)
        }
        StatsType::Robust => {
            let estimate = math::trimmed_mean(sample, request.tr)?;
            // too few observations left after trimming leaves the estimate bare
            let interval = match trimmed_test(sample, request.test_value, request.tr, conf_level) {
                Ok(test) => Some(test.effect_size.interval),
                Err(Error::InsufficientData { .. }) | Err(Error::Computation(_)) => None,
                Err(e) => return Err(e),
            };
            (estimate, interval)
        }
        StatsType::Bayes => {
            let test = bayes_test(sample, request.test_value, request.bf_prior, conf_level)?;
            let location = test.location(request.test_value);
            (location.estimate, Some(location))
        }
    };

    Ok(Centrality {
        stats_type: request.stats_type,
        estimate,
        interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];

    fn request(stats_type: StatsType) -> OneSampleRequest<'static> {
        OneSampleRequest::new(&SAMPLE, "x").with_stats_type(stats_type)
    }

    #[test]
    fn test_mean_centrality() {
        let c = centrality(&request(StatsType::Parametric)).unwrap();
        assert_relative_eq!(c.estimate, 112.0 / 6.0, epsilon = 1e-12);
        let ci = c.interval.unwrap();
        assert!(ci.lower < 0.0 && ci.upper > 50.0);
        assert!(c.label(2).starts_with("μ\u{0302}_mean = 18.67, CI_95% ["));
    }

    #[test]
    fn test_median_centrality() {
        let c = centrality(&request(StatsType::Nonparametric)).unwrap();
        assert_eq!(c.estimate, 2.5);
        let ci = c.interval.unwrap();
        assert_eq!((ci.lower, ci.upper), (1.0, 100.0));
        assert_eq!(c.label(1), "μ\u{0302}_median = 2.5, CI_95% [1.0, 100.0]");
    }

    #[test]
    fn test_median_interval_small_samples() {
        // P(Bin(5, 0.5) = 0) = 1/32 exceeds 2.5%
        assert_eq!(median_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.95).unwrap(), None);
        let sorted: Vec<f64> = (1..=20).map(f64::from).collect();
        // k = 6 for n = 20 at 95%
        assert_eq!(median_interval(&sorted, 0.95).unwrap(), Some((6.0, 15.0)));
        assert!(median_interval(&[], 0.95).is_err());
    }

    #[test]
    fn test_trimmed_centrality() {
        let c = centrality(&request(StatsType::Robust)).unwrap();
        assert_relative_eq!(c.estimate, 2.75);
        assert!(c.interval.is_some());
        assert!(c.label(2).starts_with("μ\u{0302}_trimmed = 2.75"));

        // constant data keep the estimate without an interval
        let flat = [3.0; 5];
        let c = centrality(&OneSampleRequest::new(&flat, "x").with_stats_type(StatsType::Robust))
            .unwrap();
        assert_eq!(c.estimate, 3.0);
        assert!(c.interval.is_none());
    }

    #[test]
    fn test_bayes_centrality() {
        let data = [4.1, 5.3, 4.8, 5.9, 5.1, 4.6, 5.4, 5.0, 4.9, 5.2];
        let req = OneSampleRequest::new(&data, "x")
            .with_stats_type(StatsType::Bayes)
            .with_test_value(5.0);
        let c = centrality(&req).unwrap();
        let mean = math::mean(&data).unwrap();
        assert!((c.estimate - mean).abs() < 0.1, "{}", c.estimate);
        assert!(c.interval.unwrap().contains(mean));
        assert!(c.label(2).contains("CI_95%^ETI"));
    }

    #[test]
    fn test_single_observation() {
        let one = [7.0];
        let c = centrality(&OneSampleRequest::new(&one, "x")).unwrap();
        assert_eq!(c.estimate, 7.0);
        assert!(c.interval.is_none());
        assert_eq!(c.label(2), "μ\u{0302}_mean = 7.00");
    }
}
