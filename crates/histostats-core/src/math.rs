//! Descriptive statistics shared across the histostats crates
//!
//! These are plain functions over `&[f64]`. Callers are expected to have
//! dropped missing values already; NaN is not filtered here.

use crate::{Error, Result};
use std::cmp::Ordering;

/// Sort a copy of the sample in ascending order
pub fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Minimum and maximum of the sample, `None` when empty
pub fn min_max(sample: &[f64]) -> Option<(f64, f64)> {
    if sample.is_empty() {
        return None;
    }
    let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// Arithmetic mean
pub fn mean(sample: &[f64]) -> Result<f64> {
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    Ok(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Unbiased sample variance (n - 1 denominator)
pub fn variance(sample: &[f64]) -> Result<f64> {
    if sample.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: sample.len(),
        });
    }
    let m = mean(sample)?;
    let ss: f64 = sample.iter().map(|x| (x - m) * (x - m)).sum();
    Ok(ss / (sample.len() - 1) as f64)
}

/// Sample standard deviation
pub fn std_dev(sample: &[f64]) -> Result<f64> {
    variance(sample).map(f64::sqrt)
}

/// Median of an already sorted sample
pub fn median_sorted(sorted_sample: &[f64]) -> Result<f64> {
    let n = sorted_sample.len();
    if n == 0 {
        return Err(Error::empty_input());
    }
    if n % 2 == 1 {
        Ok(sorted_sample[n / 2])
    } else {
        Ok((sorted_sample[n / 2 - 1] + sorted_sample[n / 2]) / 2.0)
    }
}

/// Median of an unsorted sample
pub fn median(sample: &[f64]) -> Result<f64> {
    median_sorted(&sorted(sample))
}

/// Number of observations removed from each tail for trim fraction `tr`
pub fn trim_count(n: usize, tr: f64) -> usize {
    (tr * n as f64).floor() as usize
}

fn check_trim(tr: f64) -> Result<()> {
    if (0.0..0.5).contains(&tr) {
        Ok(())
    } else {
        Err(Error::invalid_trim(tr))
    }
}

/// Trimmed mean of an already sorted sample
///
/// Removes `floor(tr * n)` observations from each tail.
pub fn trimmed_mean_sorted(sorted_sample: &[f64], tr: f64) -> Result<f64> {
    check_trim(tr)?;
    let n = sorted_sample.len();
    if n == 0 {
        return Err(Error::empty_input());
    }
    let g = trim_count(n, tr);
    mean(&sorted_sample[g..n - g])
}

/// Trimmed mean of an unsorted sample
pub fn trimmed_mean(sample: &[f64], tr: f64) -> Result<f64> {
    trimmed_mean_sorted(&sorted(sample), tr)
}

/// Winsorized variance of an already sorted sample
///
/// The `floor(tr * n)` smallest values are replaced by the next smallest and
/// likewise for the largest; the variance uses an n - 1 denominator.
pub fn winsorized_variance_sorted(sorted_sample: &[f64], tr: f64) -> Result<f64> {
    check_trim(tr)?;
    let n = sorted_sample.len();
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    let g = trim_count(n, tr);
    let low = sorted_sample[g];
    let high = sorted_sample[n - g - 1];
    let winsorized: Vec<f64> = sorted_sample
        .iter()
        .map(|&x| x.clamp(low, high))
        .collect();
    variance(&winsorized)
}

/// Average ranks (1-based) with ties sharing the mean of their positions
///
/// Also returns the sizes of every tie group, which variance corrections need.
pub fn average_ranks(values: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut ties = Vec::new();
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // positions i..=j (0-based) share rank (i + j) / 2 + 1
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        if j > i {
            ties.push(j - i + 1);
        }
        i = j + 1;
    }
    (ranks, ties)
}
