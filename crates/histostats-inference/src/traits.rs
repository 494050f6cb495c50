//! The testing-engine seam
//!
//! Figure builders never call a particular test directly. They hand a
//! [`OneSampleRequest`] to whatever [`OneSampleEngine`] they were given and
//! use the expression that comes back.

use crate::types::StatsResult;
use histostats_core::{check_conf_level, EffectSizeType, Error, Result, StatsType};

/// Everything a one-sample test needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneSampleRequest<'a> {
    /// Cleaned sample (no missing values)
    pub sample: &'a [f64],
    /// Name of the analysed variable
    pub variable: &'a str,
    /// Reference value of the null hypothesis
    pub test_value: f64,
    /// Effect size for the parametric family
    pub effsize_type: EffectSizeType,
    /// Confidence level for intervals
    pub conf_level: f64,
    /// Decimal places in the expression
    pub digits: usize,
    /// Trim fraction for the robust family
    pub tr: f64,
    /// Scale of the Cauchy prior for the Bayesian family
    pub bf_prior: f64,
    /// Which family to run
    pub stats_type: StatsType,
}

impl<'a> OneSampleRequest<'a> {
    /// Create a parametric request with default settings
    pub fn new(sample: &'a [f64], variable: &'a str) -> Self {
        Self {
            sample,
            variable,
            test_value: 0.0,
            effsize_type: EffectSizeType::HedgesG,
            conf_level: 0.95,
            digits: 2,
            tr: 0.2,
            bf_prior: 0.707,
            stats_type: StatsType::Parametric,
        }
    }

    /// Set the test value
    pub fn with_test_value(mut self, test_value: f64) -> Self {
        self.test_value = test_value;
        self
    }

    /// Set the family
    pub fn with_stats_type(mut self, stats_type: StatsType) -> Self {
        self.stats_type = stats_type;
        self
    }

    /// Set the parametric effect size
    pub fn with_effsize_type(mut self, effsize_type: EffectSizeType) -> Self {
        self.effsize_type = effsize_type;
        self
    }

    /// Set the confidence level
    pub fn with_conf_level(mut self, conf_level: f64) -> Self {
        self.conf_level = conf_level;
        self
    }

    /// Set the number of digits
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Set the trim fraction
    pub fn with_tr(mut self, tr: f64) -> Self {
        self.tr = tr;
        self
    }

    /// Set the Cauchy prior scale
    pub fn with_bf_prior(mut self, bf_prior: f64) -> Self {
        self.bf_prior = bf_prior;
        self
    }

    /// Validate option ranges
    pub fn validate(&self) -> Result<()> {
        check_conf_level(self.conf_level)?;
        if !(0.0..0.5).contains(&self.tr) {
            return Err(Error::invalid_trim(self.tr));
        }
        if !(self.bf_prior.is_finite() && self.bf_prior > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Bayes factor prior scale {} must be positive",
                self.bf_prior
            )));
        }
        if !self.test_value.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "Test value {} must be finite",
                self.test_value
            )));
        }
        if self.sample.iter().any(|x| !x.is_finite()) {
            return Err(Error::non_finite(self.variable));
        }
        Ok(())
    }
}

/// A one-sample hypothesis-testing engine
pub trait OneSampleEngine: Send + Sync {
    /// Run the test described by `request`
    fn one_sample(&self, request: &OneSampleRequest<'_>) -> Result<StatsResult>;
}

impl<E: OneSampleEngine + ?Sized> OneSampleEngine for &E {
    fn one_sample(&self, request: &OneSampleRequest<'_>) -> Result<StatsResult> {
        (**self).one_sample(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let data = [1.0, 2.0];
        let request = OneSampleRequest::new(&data, "x");
        assert_eq!(request.stats_type, StatsType::Parametric);
        assert_eq!(request.conf_level, 0.95);
        assert_eq!(request.tr, 0.2);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_validation() {
        let data = [1.0, 2.0];
        let base = OneSampleRequest::new(&data, "x");
        assert!(base.with_conf_level(1.2).validate().is_err());
        assert!(base.with_tr(0.5).validate().is_err());
        assert!(base.with_bf_prior(0.0).validate().is_err());
        assert!(base.with_test_value(f64::NAN).validate().is_err());

        let bad = [1.0, f64::INFINITY];
        assert!(OneSampleRequest::new(&bad, "x").validate().is_err());
    }
}
