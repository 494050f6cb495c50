//! Single-variable histogram with statistical annotations

use histostats_core::{Error as CoreError, StatsType};
use histostats_histogram::default_binwidth;
use histostats_inference::{centrality, OneSampleEngine};
use histostats_plot::{
    BinLayer, Figure, Guides, Labels, NormalCurve, ReferenceLine, SecondaryAxis,
};
use polars::prelude::*;
use tracing::debug;

use crate::data::NumericColumn;
use crate::{HistostatsOptions, Result};

/// Build the figure for `column` of `df`, testing with `engine`
pub(crate) fn build<E: OneSampleEngine + ?Sized>(
    df: &DataFrame,
    column: &str,
    options: &HistostatsOptions,
    engine: &E,
) -> Result<Figure> {
    options.validate()?;
    let data = NumericColumn::from_frame(df, column)?;
    if data.values.is_empty() {
        return Err(CoreError::empty_input().into());
    }
    let sample = data.values.as_slice();
    let binwidth = match options.binwidth {
        Some(width) => width,
        None => default_binwidth(sample)?,
    };
    let request = options.request(sample, column);

    let subtitle = if options.results_subtitle {
        Some(engine.one_sample(&request)?.expression.to_string())
    } else {
        options.subtitle.clone()
    };
    let caption = if options.shows_bayes_caption() {
        let bayes = request.with_stats_type(StatsType::Bayes);
        Some(engine.one_sample(&bayes)?.expression.to_string())
    } else {
        options.caption.clone()
    };

    debug!(
        column,
        family = options.stats_type.as_str(),
        n = sample.len(),
        dropped = data.dropped(),
        binwidth,
        "Building histogram"
    );

    let mut figure = Figure::new()
        + BinLayer::new(sample, binwidth, options.bin_args)?
        + SecondaryAxis::proportion(data.total_rows, options.digits)
        + Guides::no_fill();

    if options.centrality_plotting {
        let line_request = request.with_stats_type(options.resolved_centrality_type());
        let estimate = centrality(&line_request)?;
        figure = figure
            + ReferenceLine::new(estimate.estimate)
                .with_label(estimate.label(options.digits))
                .with_style(options.centrality_line_args);
    }

    if options.normal_curve {
        figure = figure + NormalCurve::fit(sample, binwidth, options.normal_curve_args)?;
    }

    let labels = Labels::new()
        .x(options.xlab.clone().unwrap_or_else(|| column.to_string()))
        .y("count")
        .with_optional(options.title.clone(), subtitle, caption);
    figure = figure + labels + options.theme.clone();

    if let Some(component) = &options.component {
        figure = figure + component.clone();
    }
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use histostats_inference::StatsEngine;

    fn frame() -> DataFrame {
        df![
            "x" => [Some(1.0), Some(2.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0), None, None],
        ]
        .unwrap()
    }

    #[test]
    fn test_parametric_figure() {
        let figure = build(&frame(), "x", &HistostatsOptions::new(), &StatsEngine).unwrap();
        let labels = figure.labels();
        assert_eq!(labels.x.as_deref(), Some("x"));
        assert_eq!(labels.y.as_deref(), Some("count"));
        assert!(labels.subtitle.as_deref().unwrap().contains("t_Student"));
        assert!(labels.caption.as_deref().unwrap().contains("BF01"));

        // 8 rows in the frame, 6 observed
        assert_eq!(figure.secondary_axis().unwrap().denominator, 8);
        assert_eq!(figure.bins().unwrap().histogram().total_count(), 6);
        assert!(!figure.guides().fill);
        assert_eq!(figure.reference_lines().len(), 1);
    }

    #[test]
    fn test_empty_column() {
        let df = df!["x" => [None::<f64>, None]].unwrap();
        assert!(matches!(
            build(&df, "x", &HistostatsOptions::new(), &StatsEngine),
            Err(Error::Core(CoreError::InsufficientData { actual: 0, .. }))
        ));
    }
}
