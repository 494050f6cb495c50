//! Figure builders over DataFrames

pub(crate) mod grouped;
pub(crate) mod single;

use histostats_inference::StatsEngine;
use histostats_plot::{CompositeFigure, Figure};
use polars::prelude::*;

use crate::{HistostatsExt, HistostatsOptions, PlotGridOptions, Result};

impl HistostatsExt for DataFrame {
    fn histostats(&self, column: &str, options: &HistostatsOptions) -> Result<Figure> {
        single::build(self, column, options, &StatsEngine)
    }

    fn grouped_histostats(
        &self,
        column: &str,
        grouping: &str,
        options: &HistostatsOptions,
        grid: &PlotGridOptions,
    ) -> Result<CompositeFigure> {
        grouped::build(self, column, grouping, options, grid, &StatsEngine)
    }
}
