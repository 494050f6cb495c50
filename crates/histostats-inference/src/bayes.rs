//! JZS Bayes factor and posterior for a one-sample location problem
//!
//! The effect under the alternative is the standardised difference
//! `δ = (μ - μ0) / σ` with a Cauchy prior of scale `r`. The Bayes factor uses
//! the Zellner-Siow mixture representation and a single numerical integral
//! over `g`; the posterior of `δ` is evaluated on a fixed grid from the
//! non-central t likelihood of the observed t statistic.

use crate::expression::{Expression, Symbol, Term};
use crate::traits::OneSampleRequest;
use crate::types::{ConfidenceInterval, EffectSize, EffectSizeKind, StatsResult};
use histostats_core::format::format_value;
use histostats_core::{check_sample_size, math, Error, Result, StatsType};
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;
use tracing::trace;

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Integration range and resolution over `u = ln g`
const LOG_G_RANGE: (f64, f64) = (-10.0, 50.0);
const LOG_G_INTERVALS: usize = 6000;

/// Points in the posterior grid over `δ`
const POSTERIOR_POINTS: usize = 801;

/// Intervals in the chi-square mixture of the non-central t density
const MIXTURE_INTERVALS: usize = 2000;

/// Log of a composite Simpson integral of `exp(f)` on `[a, b]`
///
/// `intervals` must be even. The sum is taken relative to the largest term so
/// integrands spanning hundreds of orders of magnitude stay finite.
fn log_simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, intervals: usize) -> f64 {
    let h = (b - a) / intervals as f64;
    let logs: Vec<f64> = (0..=intervals).map(|i| f(a + i as f64 * h)).collect();
    let peak = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !peak.is_finite() {
        return peak;
    }
    let sum: f64 = logs
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let weight = if i == 0 || i == intervals {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            weight * (l - peak).exp()
        })
        .sum();
    peak + (sum * h / 3.0).ln()
}

/// Natural log of the JZS Bayes factor BF10 for a one-sample t statistic
///
/// `t` is observed on `n` observations (`ν = n - 1`) and `r` is the Cauchy
/// prior scale.
pub fn log_bf10(t: f64, n: usize, r: f64) -> Result<f64> {
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    if !(r.is_finite() && r > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "Cauchy prior scale {r} must be positive"
        )));
    }
    let nf = n as f64;
    let nu = nf - 1.0;
    let r2 = r * r;

    let integrand = |u: f64| {
        let g = u.exp();
        let a = 1.0 + nf * g * r2;
        -0.5 * a.ln() - 0.5 * (nu + 1.0) * (1.0 + t * t / (a * nu)).ln()
            - 0.5 * LN_2PI
            - 0.5 * u
            - 1.0 / (2.0 * g)
    };
    let log_alt = log_simpson(integrand, LOG_G_RANGE.0, LOG_G_RANGE.1, LOG_G_INTERVALS);
    let log_null = -0.5 * (nu + 1.0) * (1.0 + t * t / nu).ln();
    let log_bf = log_alt - log_null;
    trace!(t, n, r, log_bf, "JZS Bayes factor");
    if log_bf.is_finite() {
        Ok(log_bf)
    } else {
        Err(Error::Computation("Bayes factor integral did not converge".to_string()))
    }
}

/// Log density of a non-central t with `nu` degrees of freedom and
/// non-centrality `ncp`, evaluated at `t`
pub fn log_noncentral_t_pdf(t: f64, nu: f64, ncp: f64) -> f64 {
    let spread = (12.0 * (2.0 / nu).sqrt()).max(60.0 / nu);
    let lo = nu.ln() - spread;
    let hi = nu.ln() + (12.0 * (2.0 / nu).sqrt()).max(4.0);
    let half = nu / 2.0;
    let log_norm = half * 2f64.ln() + ln_gamma(half);

    // w = e^v is the chi-square variate; the Jacobian folds into the weight
    log_simpson(
        |v| {
            let w = v.exp();
            let scale = (w / nu).sqrt();
            let z = t * scale - ncp;
            half * v - 0.5 * w - log_norm + scale.ln() - 0.5 * z * z - 0.5 * LN_2PI
        },
        lo,
        hi,
        MIXTURE_INTERVALS,
    )
}

/// Posterior of the standardised effect on a grid
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    /// Grid points
    pub grid: Vec<f64>,
    /// Normalised density at each grid point
    pub density: Vec<f64>,
    cdf: Vec<f64>,
}

impl Posterior {
    /// Quantile of the posterior by linear interpolation of its CDF
    pub fn quantile(&self, p: f64) -> f64 {
        let idx = self.cdf.partition_point(|&c| c < p);
        if idx == 0 {
            return self.grid[0];
        }
        if idx >= self.grid.len() {
            return self.grid[self.grid.len() - 1];
        }
        let (c0, c1) = (self.cdf[idx - 1], self.cdf[idx]);
        let (x0, x1) = (self.grid[idx - 1], self.grid[idx]);
        if c1 <= c0 {
            return x1;
        }
        x0 + (p - c0) / (c1 - c0) * (x1 - x0)
    }

    /// Posterior median
    pub fn median(&self) -> f64 {
        self.quantile(0.5)
    }

    /// Equal-tailed interval at `level`
    pub fn eti(&self, level: f64) -> (f64, f64) {
        let tail = (1.0 - level) / 2.0;
        (self.quantile(tail), self.quantile(1.0 - tail))
    }
}

/// Posterior of `δ` given a t statistic on `n` observations and a Cauchy
/// prior of scale `r`
///
/// `d` is the observed standardised difference and centres the grid.
pub fn effect_posterior(t: f64, d: f64, n: usize, r: f64) -> Result<Posterior> {
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    let nf = n as f64;
    let nu = nf - 1.0;
    let se_d = (1.0 / nf + d * d / (2.0 * nu)).sqrt();
    let lo = d.min(0.0) - 10.0 * se_d;
    let hi = d.max(0.0) + 10.0 * se_d;
    let step = (hi - lo) / (POSTERIOR_POINTS - 1) as f64;

    let grid: Vec<f64> = (0..POSTERIOR_POINTS).map(|i| lo + i as f64 * step).collect();
    let log_post: Vec<f64> = grid
        .iter()
        .map(|&delta| {
            let log_prior = -(PI * r * (1.0 + (delta / r).powi(2))).ln();
            log_noncentral_t_pdf(t, nu, delta * nf.sqrt()) + log_prior
        })
        .collect();
    let peak = log_post.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !peak.is_finite() {
        return Err(Error::Computation("posterior density vanished on the grid".to_string()));
    }

    let unnormalised: Vec<f64> = log_post.iter().map(|l| (l - peak).exp()).collect();
    let mut cdf = Vec::with_capacity(POSTERIOR_POINTS);
    let mut acc = 0.0;
    cdf.push(0.0);
    for pair in unnormalised.windows(2) {
        acc += 0.5 * (pair[0] + pair[1]) * step;
        cdf.push(acc);
    }
    let total = acc;
    let cdf: Vec<f64> = cdf.into_iter().map(|c| c / total).collect();
    let density = unnormalised.into_iter().map(|u| u / total).collect();

    Ok(Posterior { grid, density, cdf })
}

/// Bayesian one-sample summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayesTest {
    /// Observed t statistic
    pub t: f64,
    /// Bayes factor in favour of the alternative
    pub bf10: f64,
    /// Natural log of BF01
    pub log_bf01: f64,
    /// Posterior median and ETI of `δ`
    pub delta: ConfidenceInterval,
    /// Posterior median and ETI of the raw difference `μ - μ0`
    pub difference: ConfidenceInterval,
}

impl BayesTest {
    /// Posterior location estimate on the data scale
    pub fn location(&self, test_value: f64) -> ConfidenceInterval {
        self.difference.map(|d| d + test_value)
    }
}

/// Run the Bayesian one-sample analysis
pub fn bayes_test(sample: &[f64], test_value: f64, r: f64, conf_level: f64) -> Result<BayesTest> {
    check_sample_size(sample, 2)?;
    let n = sample.len();
    let mean = math::mean(sample)?;
    let sd = math::std_dev(sample)?;
    if sd <= 0.0 {
        return Err(Error::Computation("data are essentially constant".to_string()));
    }
    let d = (mean - test_value) / sd;
    let t = d * (n as f64).sqrt();

    let log_bf = log_bf10(t, n, r)?;
    let posterior = effect_posterior(t, d, n, r)?;
    let (lower, upper) = posterior.eti(conf_level);
    let delta = ConfidenceInterval::new(lower, upper, posterior.median(), conf_level);

    Ok(BayesTest {
        t,
        bf10: log_bf.exp(),
        log_bf01: -log_bf,
        delta,
        difference: delta.map(|v| v * sd),
    })
}

/// Run the Bayesian family for an engine request
pub(crate) fn run(request: &OneSampleRequest<'_>) -> Result<StatsResult> {
    let test = bayes_test(
        request.sample,
        request.test_value,
        request.bf_prior,
        request.conf_level,
    )?;
    let digits = request.digits;
    let ci = test.difference;

    let expression = Expression::new(vec![
        Term::with_argument(
            Symbol::new("log").sub("e"),
            "BF01",
            format_value(test.log_bf01, digits),
        ),
        Term::value(
            Symbol::new("δ").hat().sub("difference").sup("posterior"),
            ci.estimate,
            digits,
        ),
        Term::interval(request.conf_level, ci.lower, ci.upper, digits, Some("ETI")),
        Term::value(Symbol::new("r").sub("Cauchy").sup("JZS"), request.bf_prior, digits),
    ]);

    Ok(StatsResult {
        stats_type: StatsType::Bayes,
        method: "Bayesian one sample t-test",
        statistic: test.t,
        df: Some(request.sample.len() as f64 - 1.0),
        p_value: None,
        bayes_factor: Some(test.bf10),
        effect_size: EffectSize::new(EffectSizeKind::PosteriorDifference, ci),
        n_obs: request.sample.len(),
        expression,
    })
}
