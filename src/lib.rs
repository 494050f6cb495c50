//! Histograms annotated with one-sample test results
//!
//! This crate re-exports the workspace crates under one roof:
//!
//! - [`histostats_core`]: errors, test families and number formatting
//! - [`histostats_histogram`]: fixed bin-width histograms and the default width
//! - [`histostats_inference`]: one-sample tests, Bayes factors and centrality estimates
//! - [`histostats_plot`]: figures, grids and SVG rendering
//! - [`histostats_polars`]: builders working on Polars DataFrames
//!
//! # Example
//!
//! ```rust
//! use histostats::prelude::*;
//! use polars::prelude::*;
//!
//! let df = df!["x" => [1.0, 2.0, 2.0, 3.0, 4.0, 100.0]].unwrap();
//! let options = HistostatsOptions::new().with_stats_type(StatsType::Robust);
//! let figure = df.histostats("x", &options).unwrap();
//! let svg = figure.to_svg(640, 480).unwrap();
//! assert!(svg.contains("t_trimmed"));
//! ```

pub use histostats_core;
pub use histostats_histogram;
pub use histostats_inference;
pub use histostats_plot;
pub use histostats_polars;

/// Commonly used items
pub mod prelude {
    pub use histostats_core::{format::format_percent, EffectSizeType, StatsType};
    pub use histostats_inference::{OneSampleEngine, OneSampleRequest, StatsEngine, StatsResult};
    pub use histostats_plot::{
        compose, Aesthetics, Annotation, Color, Component, CompositeFigure, Figure, GridLayout,
        LineType, TagLevels, Theme,
    };
    pub use histostats_polars::{
        grouped_histostats_with_engine, histostats_with_engine, HistostatsExt, HistostatsOptions,
        PlotGridOptions,
    };
}
