//! Common test utilities for histostats-polars tests

#![allow(dead_code)]

use histostats_core::{Result, StatsType};
use histostats_inference::{
    ConfidenceInterval, EffectSize, EffectSizeKind, Expression, OneSampleEngine,
    OneSampleRequest, StatsResult, Symbol, Term,
};
use polars::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::sync::Mutex;

/// Single column frame named `values`
pub fn create_test_df(values: &[f64]) -> DataFrame {
    df!["values" => values].unwrap()
}

/// Iris-like frame: 50 sepal lengths for each of three species, in blocks
pub fn iris_like_df() -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let species = [("setosa", 5.0, 0.35), ("versicolor", 5.9, 0.5), ("virginica", 6.6, 0.6)];
    let mut lengths = Vec::new();
    let mut names = Vec::new();
    for (name, mean, sd) in species {
        let dist = Normal::new(mean, sd).unwrap();
        for _ in 0..50 {
            lengths.push((dist.sample(&mut rng) * 10.0_f64).round() / 10.0);
            names.push(name);
        }
    }
    df![
        "Sepal.Length" => lengths,
        "Species" => names,
    ]
    .unwrap()
}

/// Engine that records the families it was asked for
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<StatsType>>,
}

impl RecordingEngine {
    pub fn calls(&self) -> Vec<StatsType> {
        self.calls.lock().unwrap().clone()
    }
}

impl OneSampleEngine for RecordingEngine {
    fn one_sample(&self, request: &OneSampleRequest<'_>) -> Result<StatsResult> {
        self.calls.lock().unwrap().push(request.stats_type);
        let ci = ConfidenceInterval::new(0.0, 0.0, 0.0, request.conf_level);
        Ok(StatsResult {
            stats_type: request.stats_type,
            method: "recorded",
            statistic: 0.0,
            df: None,
            p_value: None,
            bayes_factor: None,
            effect_size: EffectSize::new(EffectSizeKind::HedgesG, ci),
            n_obs: request.sample.len(),
            expression: Expression::new(vec![Term::equals(
                Symbol::new("family"),
                request.stats_type.as_str(),
            )]),
        })
    }
}
