//! Default engine dispatching to the built-in test families

use crate::traits::{OneSampleEngine, OneSampleRequest};
use crate::types::StatsResult;
use crate::{bayes, nonparametric, parametric, robust};
use histostats_core::{Result, StatsType};
use tracing::debug;

/// Engine running the four built-in families
///
/// | family        | test                     | effect size              |
/// |---------------|--------------------------|--------------------------|
/// | parametric    | Student's t              | Hedges' g or Cohen's d   |
/// | nonparametric | Wilcoxon signed-rank     | rank-biserial r          |
/// | robust        | trimmed-mean t           | trimmed mean             |
/// | bayes         | JZS Bayes factor         | posterior difference     |
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine;

impl StatsEngine {
    /// Create the default engine
    pub fn new() -> Self {
        Self
    }
}

impl OneSampleEngine for StatsEngine {
    fn one_sample(&self, request: &OneSampleRequest<'_>) -> Result<StatsResult> {
        request.validate()?;
        debug!(
            variable = request.variable,
            family = request.stats_type.as_str(),
            n = request.sample.len(),
            test_value = request.test_value,
            "Running one-sample test"
        );
        match request.stats_type {
            StatsType::Parametric => parametric::run(request),
            StatsType::Nonparametric => nonparametric::run(request),
            StatsType::Robust => robust::run(request),
            StatsType::Bayes => bayes::run(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use histostats_core::Error;

    const SAMPLE: [f64; 8] = [3.1, 4.7, 2.2, 5.9, 4.4, 3.8, 5.1, 4.0];

    #[test]
    fn test_dispatch_per_family() {
        let engine = StatsEngine::new();
        for family in StatsType::ALL {
            let request = OneSampleRequest::new(&SAMPLE, "x").with_stats_type(family);
            let result = engine.one_sample(&request).unwrap();
            assert_eq!(result.stats_type, family);
            assert_eq!(result.n_obs, SAMPLE.len());
            assert!(!result.expression.is_empty());
        }
    }

    #[test]
    fn test_invalid_request_is_rejected() {
        let engine = StatsEngine::new();
        let request = OneSampleRequest::new(&SAMPLE, "x").with_conf_level(0.0);
        assert!(matches!(engine.one_sample(&request), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_engine_by_reference() {
        fn run_with(engine: impl OneSampleEngine) -> StatsResult {
            engine.one_sample(&OneSampleRequest::new(&SAMPLE, "x")).unwrap()
        }
        let engine = StatsEngine::new();
        let a = run_with(&engine);
        let b = run_with(engine);
        assert_eq!(a, b);
    }
}
