//! Wilcoxon signed-rank test with the rank-biserial correlation

use crate::expression::{Expression, Symbol, Term};
use crate::traits::OneSampleRequest;
use crate::types::{ConfidenceInterval, EffectSize, EffectSizeKind, StatsResult};
use histostats_core::{math, Error, Result, StatsType};
use statrs::distribution::{ContinuousCDF, Normal};

/// Exact null distribution is used below this many non-zero differences
pub const EXACT_LIMIT: usize = 50;

/// Summary of a signed-rank test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedRankTest {
    /// Sum of ranks of positive differences
    pub v: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Whether the exact distribution was used
    pub exact: bool,
    /// Non-zero differences that entered the ranking
    pub n_ranked: usize,
    /// Rank-biserial correlation with interval
    pub effect_size: EffectSize,
}

/// Cumulative probability `P(V <= q)` of the signed-rank statistic for `n`
/// untied observations
pub fn signed_rank_cdf(q: i64, n: usize) -> f64 {
    let max = n * (n + 1) / 2;
    if q < 0 {
        return 0.0;
    }
    if q as usize >= max {
        return 1.0;
    }
    // counts[s] = number of subsets of {1..n} summing to s
    let mut counts = vec![0.0f64; max + 1];
    counts[0] = 1.0;
    for k in 1..=n {
        for s in (k..=max).rev() {
            counts[s] += counts[s - k];
        }
    }
    let total = 2f64.powi(n as i32);
    counts[..=q as usize].iter().sum::<f64>() / total
}

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| Error::distribution("normal", e))
}

/// Run the Wilcoxon signed-rank test of `sample` against `test_value`
///
/// Zero differences are dropped before ranking. The exact null distribution
/// is used for fewer than [`EXACT_LIMIT`] differences when there are neither
/// ties nor zeros; otherwise a normal approximation with tie and continuity
/// corrections.
pub fn signed_rank_test(sample: &[f64], test_value: f64, conf_level: f64) -> Result<SignedRankTest> {
    let diffs: Vec<f64> = sample
        .iter()
        .map(|x| x - test_value)
        .filter(|d| *d != 0.0)
        .collect();
    let had_zeros = diffs.len() < sample.len();
    let n = diffs.len();
    if n == 0 {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }

    let abs: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let (ranks, ties) = math::average_ranks(&abs);
    let v: f64 = diffs
        .iter()
        .zip(&ranks)
        .filter(|(d, _)| **d > 0.0)
        .map(|(_, r)| r)
        .sum();

    let nf = n as f64;
    let max_w = nf * (nf + 1.0) / 2.0;
    let normal = standard_normal()?;

    let exact = n < EXACT_LIMIT && ties.is_empty() && !had_zeros;
    let p_value = if exact {
        let v_int = v.round() as i64;
        let p = if v > max_w / 2.0 {
            1.0 - signed_rank_cdf(v_int - 1, n)
        } else {
            signed_rank_cdf(v_int, n)
        };
        (2.0 * p).min(1.0)
    } else {
        let tie_term: f64 = ties
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum();
        let sigma = (nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0 - tie_term / 48.0).sqrt();
        let centred = v - max_w / 2.0;
        let correction = 0.5 * centred.signum();
        let z = (centred - correction) / sigma;
        let lower = normal.cdf(z);
        (2.0 * lower.min(1.0 - lower)).min(1.0)
    };

    // Rank-biserial correlation: (R+ - R-) / max W, with R+ + R- = max W
    let r = (2.0 * v - max_w) / max_w;
    let se = ((2.0 * nf.powi(3) + 3.0 * nf.powi(2) + nf) / 6.0).sqrt() / max_w;
    let crit = normal.inverse_cdf(1.0 - (1.0 - conf_level) / 2.0);
    let z_r = r.atanh();
    let interval = ConfidenceInterval::new(
        (z_r - crit * se).tanh(),
        (z_r + crit * se).tanh(),
        r,
        conf_level,
    );

    Ok(SignedRankTest {
        v,
        p_value,
        exact,
        n_ranked: n,
        effect_size: EffectSize::new(EffectSizeKind::RankBiserial, interval),
    })
}

/// Run the nonparametric family for an engine request
pub(crate) fn run(request: &OneSampleRequest<'_>) -> Result<StatsResult> {
    let test = signed_rank_test(request.sample, request.test_value, request.conf_level)?;
    let digits = request.digits;
    let ci = test.effect_size.interval;

    let expression = Expression::new(vec![
        Term::value(Symbol::new("V").sub("Wilcoxon"), test.v, digits),
        Term::p_value(test.p_value, digits),
        Term::value(Symbol::new("r").hat().sub("biserial").sup("rank"), ci.estimate, digits),
        Term::interval(request.conf_level, ci.lower, ci.upper, digits, None),
        Term::n_obs(request.sample.len()),
    ]);

    Ok(StatsResult {
        stats_type: StatsType::Nonparametric,
        method: "Wilcoxon signed rank test",
        statistic: test.v,
        df: None,
        p_value: Some(test.p_value),
        bayes_factor: None,
        effect_size: test.effect_size,
        n_obs: request.sample.len(),
        expression,
    })
}
