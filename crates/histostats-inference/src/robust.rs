//! Trimmed-mean one-sample test (Tukey-McLaughlin)

use crate::expression::{Expression, Symbol, Term};
use crate::parametric::{t_critical, t_p_value};
use crate::traits::OneSampleRequest;
use crate::types::{ConfidenceInterval, EffectSize, EffectSizeKind, StatsResult};
use histostats_core::format::format_value;
use histostats_core::{check_sample_size, math, Error, Result, StatsType};

/// Summary of a trimmed-mean test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimmedTest {
    /// t statistic
    pub t: f64,
    /// Degrees of freedom, `n - 2g - 1`
    pub df: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Standard error of the trimmed mean
    pub std_error: f64,
    /// Trimmed mean with its interval
    pub effect_size: EffectSize,
}

/// Test the trimmed mean of `sample` against `test_value`
///
/// `g = floor(tr * n)` observations are trimmed from each tail. The standard
/// error comes from the winsorized variance:
/// `se = s_w / ((1 - 2 tr) sqrt(n))`.
pub fn trimmed_test(sample: &[f64], test_value: f64, tr: f64, conf_level: f64) -> Result<TrimmedTest> {
    check_sample_size(sample, 2)?;
    let sorted = math::sorted(sample);
    let n = sorted.len();
    let g = math::trim_count(n, tr);
    if n < 2 * g + 2 {
        return Err(Error::InsufficientData {
            expected: 2 * g + 2,
            actual: n,
        });
    }

    let trimmed_mean = math::trimmed_mean_sorted(&sorted, tr)?;
    let winsorized_sd = math::winsorized_variance_sorted(&sorted, tr)?.sqrt();
    let std_error = winsorized_sd / ((1.0 - 2.0 * tr) * (n as f64).sqrt());
    if std_error <= 0.0 {
        return Err(Error::Computation(
            "winsorized variance is zero; data are essentially constant".to_string(),
        ));
    }

    let df = (n - 2 * g - 1) as f64;
    let t = (trimmed_mean - test_value) / std_error;
    let p_value = t_p_value(t, df)?;
    let interval = ConfidenceInterval::symmetric(
        trimmed_mean,
        t_critical(df, conf_level)? * std_error,
        conf_level,
    );

    Ok(TrimmedTest {
        t,
        df,
        p_value,
        std_error,
        effect_size: EffectSize::new(EffectSizeKind::TrimmedMean, interval),
    })
}

/// Run the robust family for an engine request
pub(crate) fn run(request: &OneSampleRequest<'_>) -> Result<StatsResult> {
    let test = trimmed_test(request.sample, request.test_value, request.tr, request.conf_level)?;
    let digits = request.digits;
    let ci = test.effect_size.interval;

    let expression = Expression::new(vec![
        Term::with_argument(
            Symbol::new("t").sub("trimmed"),
            format!("{}", test.df),
            format_value(test.t, digits),
        ),
        Term::p_value(test.p_value, digits),
        Term::value(Symbol::new("μ").hat().sub("trimmed"), ci.estimate, digits),
        Term::interval(request.conf_level, ci.lower, ci.upper, digits, None),
        Term::n_obs(request.sample.len()),
    ]);

    Ok(StatsResult {
        stats_type: StatsType::Robust,
        method: "Trimmed mean test",
        statistic: test.t,
        df: Some(test.df),
        p_value: Some(test.p_value),
        bayes_factor: None,
        effect_size: test.effect_size,
        n_obs: request.sample.len(),
        expression,
    })
}
