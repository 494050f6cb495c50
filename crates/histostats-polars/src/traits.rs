//! Extension trait and free functions for building figures from DataFrames

use histostats_inference::OneSampleEngine;
use histostats_plot::{CompositeFigure, Figure};
use polars::prelude::*;

use crate::methods::{grouped, single};
use crate::{HistostatsOptions, PlotGridOptions, Result};

/// Histogram-with-statistics figures for Polars DataFrames
pub trait HistostatsExt {
    /// Histogram of `column` annotated with a one-sample test
    ///
    /// # Arguments
    /// * `column` - Numeric column to plot
    /// * `options` - Test, binning and styling options
    ///
    /// # Returns
    /// A figure with bars, a proportion axis, the test expression as
    /// subtitle and, for parametric tests, the Bayes factor as caption
    fn histostats(&self, column: &str, options: &HistostatsOptions) -> Result<Figure>;

    /// One histogram per level of `grouping`, arranged in a grid
    ///
    /// # Arguments
    /// * `column` - Numeric column to plot
    /// * `grouping` - Column whose values define the panels
    /// * `options` - Options applied to every panel
    /// * `grid` - Layout and grid-level annotation
    fn grouped_histostats(
        &self,
        column: &str,
        grouping: &str,
        options: &HistostatsOptions,
        grid: &PlotGridOptions,
    ) -> Result<CompositeFigure>;
}

/// [`HistostatsExt::histostats`] with a caller-supplied testing engine
pub fn histostats_with_engine<E: OneSampleEngine + ?Sized>(
    df: &DataFrame,
    column: &str,
    options: &HistostatsOptions,
    engine: &E,
) -> Result<Figure> {
    single::build(df, column, options, engine)
}

/// [`HistostatsExt::grouped_histostats`] with a caller-supplied testing engine
pub fn grouped_histostats_with_engine<E: OneSampleEngine + ?Sized>(
    df: &DataFrame,
    column: &str,
    grouping: &str,
    options: &HistostatsOptions,
    grid: &PlotGridOptions,
    engine: &E,
) -> Result<CompositeFigure> {
    grouped::build(df, column, grouping, options, grid, engine)
}
