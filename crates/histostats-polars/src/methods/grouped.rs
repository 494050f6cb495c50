//! One histogram per level of a grouping column, composed into a grid

use histostats_histogram::default_binwidth;
use histostats_inference::OneSampleEngine;
use histostats_plot::{compose, CompositeFigure, Figure};
use polars::prelude::*;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::data::{partition_levels, NumericColumn};
use crate::methods::single;
use crate::{HistostatsOptions, PlotGridOptions, Result};

/// Build one panel per level of `grouping` and compose them
///
/// All panels share one bin width. Unless the caller fixed it, it is
/// derived from the whole column rather than from any one level.
pub(crate) fn build<E: OneSampleEngine + ?Sized>(
    df: &DataFrame,
    column: &str,
    grouping: &str,
    options: &HistostatsOptions,
    grid: &PlotGridOptions,
    engine: &E,
) -> Result<CompositeFigure> {
    options.validate()?;
    let partitions = partition_levels(df, grouping)?;
    let binwidth = match options.binwidth {
        Some(width) => width,
        None => default_binwidth(&NumericColumn::from_frame(df, column)?.values)?,
    };
    debug!(
        column,
        grouping,
        levels = partitions.len(),
        binwidth,
        "Building grouped histograms"
    );

    let panel = |(level, frame): &(String, DataFrame)| -> Result<Figure> {
        let mut panel_options = options.clone();
        panel_options.binwidth = Some(binwidth);
        if panel_options.title.is_none() {
            panel_options.title = Some(level.clone());
        }
        single::build(frame, column, &panel_options, engine)
    };

    #[cfg(feature = "parallel")]
    let figures = partitions.par_iter().map(panel).collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let figures = partitions.iter().map(panel).collect::<Result<Vec<_>>>()?;

    Ok(compose(figures, &grid.layout, &grid.annotation)?)
}
