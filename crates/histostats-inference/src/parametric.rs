//! Student's one-sample t-test with Cohen's d / Hedges' g

use crate::expression::{Expression, Symbol, Term};
use crate::traits::OneSampleRequest;
use crate::types::{ConfidenceInterval, EffectSize, EffectSizeKind, StatsResult};
use histostats_core::{check_sample_size, math, EffectSizeType, Error, Result, StatsType};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::function::gamma::ln_gamma;

/// Two-sided critical value of a t distribution
pub(crate) fn t_critical(df: f64, conf_level: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| Error::distribution("t", e))?;
    Ok(dist.inverse_cdf(1.0 - (1.0 - conf_level) / 2.0))
}

/// Two-sided p-value of a t statistic
pub(crate) fn t_p_value(t: f64, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| Error::distribution("t", e))?;
    Ok((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

/// Small-sample bias correction factor J for Hedges' g
///
/// `J = Γ(df/2) / (sqrt(df/2) Γ((df-1)/2))`, which is zero at `df = 1`.
pub fn hedges_correction(df: f64) -> f64 {
    if df <= 1.0 {
        return 0.0;
    }
    (ln_gamma(df / 2.0) - (df / 2.0).sqrt().ln() - ln_gamma((df - 1.0) / 2.0)).exp()
}

/// Summary of a one-sample t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    /// t statistic
    pub t: f64,
    /// Degrees of freedom
    pub df: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation
    pub sd: f64,
    /// Standardized effect size with interval
    pub effect_size: EffectSize,
}

/// Run Student's one-sample t-test
pub fn t_test(
    sample: &[f64],
    test_value: f64,
    conf_level: f64,
    effsize_type: EffectSizeType,
) -> Result<TTest> {
    check_sample_size(sample, 2)?;
    let n = sample.len() as f64;
    let mean = math::mean(sample)?;
    let sd = math::std_dev(sample)?;
    if sd <= 0.0 {
        return Err(Error::Computation("data are essentially constant".to_string()));
    }

    let df = n - 1.0;
    let t = (mean - test_value) / (sd / n.sqrt());
    let p_value = t_p_value(t, df)?;

    let d = (mean - test_value) / sd;
    let se_d = (1.0 / n + d * d / (2.0 * n)).sqrt();
    let d_ci = ConfidenceInterval::symmetric(d, t_critical(df, conf_level)? * se_d, conf_level);

    let effect_size = match effsize_type {
        EffectSizeType::CohenD => EffectSize::new(EffectSizeKind::CohenD, d_ci),
        EffectSizeType::HedgesG => {
            let j = hedges_correction(df);
            EffectSize::new(EffectSizeKind::HedgesG, d_ci.map(|v| v * j))
        }
    };

    Ok(TTest {
        t,
        df,
        p_value,
        mean,
        sd,
        effect_size,
    })
}

/// Run the parametric family for an engine request
pub(crate) fn run(request: &OneSampleRequest<'_>) -> Result<StatsResult> {
    let test = t_test(
        request.sample,
        request.test_value,
        request.conf_level,
        request.effsize_type,
    )?;
    let digits = request.digits;
    let es_symbol = match test.effect_size.kind {
        EffectSizeKind::CohenD => Symbol::new("d").hat().sub("Cohen"),
        _ => Symbol::new("g").hat().sub("Hedges"),
    };
    let ci = test.effect_size.interval;

    let expression = Expression::new(vec![
        Term::with_argument(
            Symbol::new("t").sub("Student"),
            format!("{}", test.df),
            histostats_core::format::format_value(test.t, digits),
        ),
        Term::p_value(test.p_value, digits),
        Term::value(es_symbol, ci.estimate, digits),
        Term::interval(request.conf_level, ci.lower, ci.upper, digits, None),
        Term::n_obs(request.sample.len()),
    ]);

    Ok(StatsResult {
        stats_type: StatsType::Parametric,
        method: "One Sample t-test",
        statistic: test.t,
        df: Some(test.df),
        p_value: Some(test.p_value),
        bayes_factor: None,
        effect_size: test.effect_size,
        n_obs: request.sample.len(),
        expression,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];

    #[test]
    fn test_t_statistic() {
        let test = t_test(&SAMPLE, 0.0, 0.95, EffectSizeType::CohenD).unwrap();
        let mean = 112.0 / 6.0;
        let sd = math::std_dev(&SAMPLE).unwrap();
        assert_relative_eq!(test.mean, mean, epsilon = 1e-12);
        assert_relative_eq!(test.t, mean / (sd / 6f64.sqrt()), epsilon = 1e-12);
        assert_eq!(test.df, 5.0);
        assert_relative_eq!(test.effect_size.estimate(), mean / sd, epsilon = 1e-12);
        assert!(test.p_value > 0.2 && test.p_value < 0.4);
    }

    #[test]
    fn test_known_p_value() {
        // t = 2.571 at 5 df is the two-sided 5% critical value
        let p = t_p_value(2.570_581_835_636_314, 5.0).unwrap();
        assert_relative_eq!(p, 0.05, epsilon = 1e-6);
        let crit = t_critical(5.0, 0.95).unwrap();
        assert_relative_eq!(crit, 2.570_581_835_636_314, epsilon = 1e-6);
    }

    #[test]
    fn test_hedges_correction() {
        assert_eq!(hedges_correction(1.0), 0.0);
        let j_small = hedges_correction(8.0);
        assert!(j_small < 1.0 && j_small > 0.88);
        // Approximation 1 - 3 / (4 df - 1) is close for larger df
        assert_relative_eq!(hedges_correction(98.0), 1.0 - 3.0 / (4.0 * 98.0 - 1.0), epsilon = 1e-4);
    }

    #[test]
    fn test_hedges_shrinks_cohen() {
        let d = t_test(&SAMPLE, 0.0, 0.95, EffectSizeType::CohenD).unwrap();
        let g = t_test(&SAMPLE, 0.0, 0.95, EffectSizeType::HedgesG).unwrap();
        assert!(g.effect_size.estimate() < d.effect_size.estimate());
        assert_eq!(g.t, d.t);
        assert!(g.effect_size.interval.contains(g.effect_size.estimate()));
    }

    #[test]
    fn test_constant_and_small_samples() {
        assert!(matches!(
            t_test(&[3.0, 3.0, 3.0], 0.0, 0.95, EffectSizeType::HedgesG),
            Err(Error::Computation(_))
        ));
        assert!(matches!(
            t_test(&[3.0], 0.0, 0.95, EffectSizeType::HedgesG),
            Err(Error::InsufficientData { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_expression() {
        let request = OneSampleRequest::new(&SAMPLE, "x");
        let result = run(&request).unwrap();
        let text = result.expression.to_string();
        assert!(text.starts_with("t_Student(5) = "), "{text}");
        assert!(text.contains("g\u{0302}_Hedges"));
        assert!(text.contains("CI_95%"));
        assert!(text.ends_with("n_obs = 6"));
        assert_eq!(result.stats_type, StatsType::Parametric);
    }
}
