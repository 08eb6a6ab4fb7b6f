//! Plotters-powered sample-means chart widget for Ratatui.
//!
//! Draws, in order:
//! - density-normalized histogram bars
//! - the fitted normal curve (when σ > 0)
//! - a dashed vertical line at μ
//! - a μ/σ annotation with a pointer
//! - grid, axes and legend
//!
//! Axis titles are drawn by the surrounding TUI layout, not by Plotters.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TuiColor, Style},
    widgets::Widget,
};

/// Number of segments the mean line is split into; every other one is drawn.
const DASH_SEGMENTS: usize = 16;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct CltPlottersChart<'a> {
    /// Histogram bars as `(left, right, density)`.
    pub bars: &'a [(f64, f64, f64)],
    /// Fitted normal curve; `None` when σ is degenerate.
    pub curve: Option<&'a [(f64, f64)]>,
    pub mean: f64,
    pub std: f64,
    /// X bounds (sample mean).
    pub x_bounds: [f64; 2],
    /// Y bounds (density).
    pub y_bounds: [f64; 2],
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for CltPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(TuiColor::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            let grid_color = RGBColor(70, 70, 70);
            chart
                .configure_mesh()
                .max_light_lines(0)
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&grid_color)
                .draw()?;

            let bar_color = RGBColor(76, 114, 176);
            let curve_color = RGBColor(255, 0, 0);
            let mean_color = RGBColor(255, 165, 0);
            let note_color = RGBColor(205, 92, 92);

            // 1) Histogram.
            chart
                .draw_series(self.bars.iter().map(|&(left, right, density)| {
                    Rectangle::new(
                        [(left, 0.0), (right, density)],
                        bar_color.mix(0.6).filled(),
                    )
                }))?
                .label("Sample Means")
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 1), (x + 4, y + 1)], bar_color.filled())
                });

            // 2) Normal fit.
            let mut peak = self.bars.iter().map(|b| b.2).fold(0.0, f64::max);
            if let Some(curve) = self.curve {
                peak = curve.iter().map(|p| p.1).fold(0.0, f64::max);
                chart
                    .draw_series(LineSeries::new(
                        curve.iter().copied(),
                        curve_color.stroke_width(2),
                    ))?
                    .label(format!("Normal Fit (μ={:.2}, σ={:.2})", self.mean, self.std))
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 4, y)], &curve_color)
                    });
            }

            // 3) Dashed mean line.
            chart
                .draw_series(dashes(y0, y1).map(|(a, b)| {
                    PathElement::new(
                        vec![(self.mean, a), (self.mean, b)],
                        mean_color.stroke_width(2),
                    )
                }))?
                .label(format!("Mean (μ={:.2})", self.mean))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 4, y)], &mean_color));

            // 4) Annotation, offset by one σ to the right of the mean.
            let text_at = (self.mean + self.std, peak * 0.9);
            let arrow_to = (self.mean, peak * 0.8);
            chart.draw_series(std::iter::once(PathElement::new(
                vec![text_at, arrow_to],
                &note_color,
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("μ = {:.2}  σ = {:.2}", self.mean, self.std),
                text_at,
                ("sans-serif", 12).into_font().color(&note_color),
            )))?;

            // 5) Legend.
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font(("sans-serif", 10).into_font().color(&WHITE))
                .border_style(&WHITE)
                .draw()?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Alternating `(from, to)` spans covering `[y0, y1]`.
fn dashes(y0: f64, y1: f64) -> impl Iterator<Item = (f64, f64)> {
    let step = (y1 - y0) / DASH_SEGMENTS as f64;
    (0..DASH_SEGMENTS)
        .step_by(2)
        .map(move |i| (y0 + step * i as f64, y0 + step * (i + 1) as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashes_cover_half_of_the_axis() {
        let spans: Vec<_> = dashes(0.0, 1.6).collect();
        assert_eq!(spans.len(), DASH_SEGMENTS / 2);
        assert_eq!(spans[0], (0.0, 0.1));
        let drawn: f64 = spans.iter().map(|(a, b)| b - a).sum();
        assert!((drawn - 0.8).abs() < 1e-12);
    }

    #[test]
    fn tiny_area_renders_hint() {
        let chart = CltPlottersChart {
            bars: &[],
            curve: None,
            mean: 0.0,
            std: 0.0,
            x_bounds: [0.0, 1.0],
            y_bounds: [0.0, 1.0],
            fmt_x: |v| format!("{v:.2}"),
            fmt_y: |v| format!("{v:.2}"),
        };
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);
        let first_row: String = (0u16..40)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(first_row.starts_with("Chart area too small"));
    }
}
