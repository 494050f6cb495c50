//! SVG rendering through plotters

use crate::figure::Figure;
use crate::grid::CompositeFigure;
use crate::style::{self, LineType};
use crate::theme::Theme;
use histostats_core::{Error, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Points per reference line; dashes are cut from this polyline
const LINE_POINTS: usize = 60;

/// Points per normal curve
const CURVE_POINTS: usize = 200;

fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

fn rgb(color: style::Color) -> RGBColor {
    color.into()
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidParameter(format!(
            "canvas size {width}x{height} must be positive"
        )));
    }
    Ok(())
}

/// Split a polyline into the visible runs of a line pattern
pub(crate) fn dash(points: Vec<(f64, f64)>, linetype: LineType) -> Vec<Vec<(f64, f64)>> {
    let Some((on, gap)) = linetype.pattern() else {
        return vec![points];
    };
    let mut runs = Vec::new();
    let mut start = 0;
    while start + 1 < points.len() {
        let end = (start + on).min(points.len() - 1);
        runs.push(points[start..=end].to_vec());
        start += on + gap;
    }
    runs
}

/// Draw title, subtitle and caption bands and return the remaining area
fn draw_text_block<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    theme: &Theme,
    title: Option<&str>,
    subtitle: Option<&str>,
    caption: Option<&str>,
) -> Result<DrawingArea<DB, Shift>> {
    let text = rgb(theme.text_colour);
    let family = theme.font_family.as_str();
    let mut area = area.clone();

    if let Some(title) = title {
        let font = (family, theme.title_size()).into_font().color(&text);
        area = area.titled(title, font).map_err(render_err)?;
    }
    if let Some(subtitle) = subtitle {
        let font = (family, theme.subtitle_size()).into_font().color(&text);
        area = area.titled(subtitle, font).map_err(render_err)?;
    }
    if let Some(caption) = caption {
        let (_, height) = area.dim_in_pixel();
        let band = (theme.caption_size() * 2).min(height / 3);
        let (upper, lower) = area.split_vertically(height.saturating_sub(band) as i32);
        let font = (family, theme.caption_size()).into_font().color(&text);
        lower
            .draw_text(caption, &font, (theme.margin as i32, 2))
            .map_err(render_err)?;
        area = upper;
    }
    Ok(area)
}

impl Figure {
    /// Render to an SVG document of `width` x `height` pixels
    pub fn to_svg(&self, width: u32, height: u32) -> Result<String> {
        check_size(width, height)?;
        debug!(width, height, "Rendering figure");
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&rgb(self.theme().background)).map_err(render_err)?;
            self.draw_on(&root)?;
            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }

    /// Draw the figure into an existing drawing area
    pub fn draw_on<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let theme = self.theme();
        let labels = self.labels();
        let area = draw_text_block(
            area,
            theme,
            labels.title.as_deref(),
            labels.subtitle.as_deref(),
            labels.caption.as_deref(),
        )?;
        area.fill(&rgb(theme.panel_background)).map_err(render_err)?;

        let text = rgb(theme.text_colour);
        let family = theme.font_family.as_str();
        let tick_font = (family, theme.tick_size()).into_font().color(&text);
        let axis_font = (family, theme.subtitle_size()).into_font().color(&text);

        let (x_lo, x_hi) = self.x_range();
        let pad = (x_hi - x_lo) * 0.04;
        let (x_lo, x_hi) = (x_lo - pad, x_hi + pad);
        let y_top = self.y_max() * 1.08;

        let mut builder = ChartBuilder::on(&area);
        builder
            .margin(theme.margin)
            .x_label_area_size(theme.base_size * 3)
            .y_label_area_size(theme.base_size * 4);
        if self.secondary_axis().is_some() {
            builder.right_y_label_area_size(theme.base_size * 5);
        }
        let mut chart = builder
            .build_cartesian_2d(x_lo..x_hi, 0.0..y_top)
            .map_err(render_err)?
            .set_secondary_coord(x_lo..x_hi, 0.0..y_top);

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(labels.x.clone().unwrap_or_default())
            .y_desc(labels.y.clone().unwrap_or_default())
            .label_style(tick_font.clone())
            .axis_desc_style(axis_font.clone());
        match theme.grid_colour {
            Some(grid) => {
                mesh.bold_line_style(rgb(grid).stroke_width(1))
                    .light_line_style(rgb(grid).mix(0.0).stroke_width(0));
            }
            None => {
                mesh.disable_mesh();
            }
        }
        mesh.draw().map_err(render_err)?;

        if let Some(axis) = self.secondary_axis() {
            let formatter = |count: &f64| axis.label(*count);
            chart
                .configure_secondary_axes()
                .y_desc(axis.name.clone())
                .label_style(tick_font.clone())
                .axis_desc_style(axis_font.clone())
                .y_label_formatter(&formatter)
                .draw()
                .map_err(render_err)?;
        }

        if let Some(bins) = self.bins() {
            let aes = bins.style();
            let alpha = aes.alpha_or(1.0);
            let outline = rgb(aes.colour_or(style::Color::BLACK)).stroke_width(1);
            let fills = bins.fill_colours();
            let bars = bins.histogram().bins();
            chart
                .draw_series(bars.iter().zip(&fills).map(|(bin, fill)| {
                    Rectangle::new(
                        [(bin.left, 0.0), (bin.right, bin.count as f64)],
                        rgb(*fill).mix(alpha).filled(),
                    )
                }))
                .map_err(render_err)?;
            chart
                .draw_series(bars.iter().filter(|bin| bin.count > 0).map(|bin| {
                    Rectangle::new([(bin.left, 0.0), (bin.right, bin.count as f64)], outline)
                }))
                .map_err(render_err)?;
        }

        for curve in self.curves() {
            let colour = rgb(curve.style.colour_or(style::Color::BLACK));
            let width = curve.style.linewidth_or(2.0).round().max(1.0) as u32;
            let points = curve.points(x_lo, x_hi, CURVE_POINTS)?;
            let linetype = curve.style.linetype_or(LineType::Solid);
            chart
                .draw_series(
                    dash(points, linetype)
                        .into_iter()
                        .map(|run| PathElement::new(run, colour.stroke_width(width))),
                )
                .map_err(render_err)?;
        }

        for line in self.reference_lines() {
            let colour = rgb(line.style.colour_or(style::Color::BLUE));
            let width = line.style.linewidth_or(1.0).round().max(1.0) as u32;
            let points: Vec<(f64, f64)> = (0..=LINE_POINTS)
                .map(|i| (line.x, y_top * i as f64 / LINE_POINTS as f64))
                .collect();
            chart
                .draw_series(
                    dash(points, line.linetype())
                        .into_iter()
                        .map(|run| PathElement::new(run, colour.stroke_width(width))),
                )
                .map_err(render_err)?;
            if let Some(label) = &line.label {
                chart
                    .draw_series(std::iter::once(Text::new(
                        label.clone(),
                        (line.x, y_top * 0.98),
                        tick_font.clone().color(&colour),
                    )))
                    .map_err(render_err)?;
            }
        }
        Ok(())
    }
}

impl CompositeFigure {
    /// Render the whole grid to an SVG document
    pub fn to_svg(&self, width: u32, height: u32) -> Result<String> {
        check_size(width, height)?;
        debug!(width, height, panels = self.panels().len(), "Rendering figure grid");
        let theme = self
            .panels()
            .first()
            .map(|panel| panel.theme().clone())
            .unwrap_or_default();
        let annotation = self.annotation();

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&rgb(theme.background)).map_err(render_err)?;
            let area = draw_text_block(
                &root,
                &theme,
                annotation.title.as_deref(),
                annotation.subtitle.as_deref(),
                annotation.caption.as_deref(),
            )?;

            let tag_font = (theme.font_family.as_str(), theme.title_size())
                .into_font()
                .color(&rgb(theme.text_colour));
            let cells = area.split_evenly((self.nrow(), self.ncol()));
            for ((_, _, panel, tag), cell) in self.cells().zip(&cells) {
                panel.draw_on(cell)?;
                if let Some(tag) = tag {
                    cell.draw_text(tag, &tag_font, (4, 4)).map_err(render_err)?;
                }
            }
            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{compose, Annotation, GridLayout, TagLevels};
    use crate::guide::{Guides, Labels, SecondaryAxis};
    use crate::layer::{BinLayer, NormalCurve, ReferenceLine};
    use crate::style::Aesthetics;

    const DATA: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 4.0, 100.0];

    fn sample_figure(title: &str) -> Figure {
        Figure::new()
            + BinLayer::new(&DATA, 40.4, Aesthetics::bins()).unwrap()
            + SecondaryAxis::proportion(8, 1)
            + Guides::no_fill()
            + ReferenceLine::new(18.67).with_label("mean line")
            + Labels::new()
                .x("x")
                .y("count")
                .title(title)
                .subtitle("t_Student(5) = 1.15")
                .caption("log_e(BF01) = 0.40")
    }

    #[test]
    fn test_dash_patterns() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (0.0, i as f64)).collect();
        assert_eq!(dash(points.clone(), LineType::Solid).len(), 1);
        let dashed = dash(points.clone(), LineType::Dashed);
        // runs start every 7 points and span 4 segments
        assert_eq!(dashed.len(), 2);
        assert_eq!(dashed[0].len(), 5);
        let dotted = dash(points, LineType::Dotted);
        assert!(dotted.iter().all(|run| run.len() == 2));
    }

    #[test]
    fn test_figure_svg() {
        let svg = sample_figure("weights").to_svg(640, 480).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("weights"));
        assert!(svg.contains("proportion"));
        assert!(svg.contains("mean line"));
        assert!(svg.contains('%'));
    }

    #[test]
    fn test_curve_and_empty_figure_render() {
        let figure = Figure::new()
            + BinLayer::new(&[4.0, 5.0, 5.5, 6.0, 7.0], 0.5, Aesthetics::new()).unwrap()
            + NormalCurve::fit(&[4.0, 5.0, 5.5, 6.0, 7.0], 0.5, Aesthetics::normal_curve()).unwrap();
        assert!(figure.to_svg(400, 300).is_ok());
        assert!(Figure::new().to_svg(200, 200).is_ok());
        assert!(matches!(
            Figure::new().to_svg(0, 200),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_composite_svg() {
        let figures = vec![sample_figure("setosa"), sample_figure("virginica")];
        let annotation = Annotation::new()
            .with_tag_levels(TagLevels::Upper)
            .with_tag_prefix("(")
            .with_tag_suffix(")")
            .with_title("iris grid");
        let grid = compose(figures, &GridLayout::new(), &annotation).unwrap();
        let svg = grid.to_svg(1200, 500).unwrap();
        assert!(svg.contains("iris grid"));
        assert!(svg.contains("setosa"));
        assert!(svg.contains("virginica"));
        assert!(svg.contains("(B)"));
    }
}
