//! End-to-end runs through the facade crate

use histostats::prelude::*;
use polars::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn mtcars_mpg() -> anyhow::Result<DataFrame> {
    Ok(df![
        "mpg" => [21.0, 21.0, 22.8, 21.4, 18.7, 18.1, 14.3, 24.4, 22.8, 19.2, 17.8, 16.4],
        "cyl" => [6i32, 6, 4, 6, 8, 6, 8, 4, 4, 6, 6, 8],
    ]?)
}

#[test]
fn test_every_family_renders() -> anyhow::Result<()> {
    init_tracing();
    let df = mtcars_mpg()?;
    for family in StatsType::ALL {
        let options = HistostatsOptions::new()
            .with_stats_type(family)
            .with_test_value(20.0)
            .with_normal_curve(true);
        let figure = df.histostats("mpg", &options)?;
        assert!(figure.labels().subtitle.is_some());
        assert_eq!(
            figure.labels().caption.is_some(),
            family == StatsType::Parametric
        );
        let svg = figure.to_svg(640, 480)?;
        assert!(svg.contains("mpg"));
    }
    Ok(())
}

#[test]
fn test_grouped_by_integer_column() -> anyhow::Result<()> {
    init_tracing();
    let df = mtcars_mpg()?;
    let grid = df.grouped_histostats(
        "mpg",
        "cyl",
        &HistostatsOptions::new().with_stats_type(StatsType::Nonparametric),
        &PlotGridOptions::new().with_tag_levels(TagLevels::Lower),
    )?;
    let levels: Vec<_> = grid
        .panels()
        .iter()
        .filter_map(|p| p.labels().title.clone())
        .collect();
    assert_eq!(levels, ["6", "4", "8"]);
    assert_eq!(grid.tags()[0].as_deref(), Some("a"));
    assert!(grid.to_svg(1200, 400)?.contains("<svg"));
    Ok(())
}
