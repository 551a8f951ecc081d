//! Plotters-powered chart widgets for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - candlestick support for the monthly view
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::MonthPeriod;

/// A lightweight, render-only trend chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. This keeps `render()` focused on drawing and makes
/// it easy to test/benchmark the data prep separately.
pub struct TrendChart<'a> {
    /// Weekly index values as `(position, value)`.
    pub values: &'a [(f64, f64)],
    /// Trailing 52-week moving average.
    pub ma: &'a [(f64, f64)],
    /// Upper band (`ma * 1.06`).
    pub upper: &'a [(f64, f64)],
    /// Lower band (`ma * 0.96`).
    pub lower: &'a [(f64, f64)],
    /// X bounds (series position).
    pub x_bounds: [f64; 2],
    /// Y bounds (index level).
    pub y_bounds: [f64; 2],
    /// Tick label per series position (ISO end dates).
    pub x_ticks: &'a [String],
}

impl<'a> Widget for TrendChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) {
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !bounds_ok(x0, x1, y0, y1) {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| tick_label(self.x_ticks, *v))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // High-contrast palette for terminal readability: the index in
            // cyan, the MA in white, the bands dashed-looking in yellow/red.
            chart.draw_series(LineSeries::new(
                self.upper.iter().copied(),
                &RGBColor(255, 255, 0),
            ))?;
            chart.draw_series(LineSeries::new(
                self.lower.iter().copied(),
                &RGBColor(255, 0, 0),
            ))?;
            chart.draw_series(LineSeries::new(self.ma.iter().copied(), &WHITE))?;
            chart.draw_series(LineSeries::new(
                self.values.iter().copied(),
                &RGBColor(0, 255, 255),
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// A render-only monthly candlestick chart description.
pub struct MonthlyCandles<'a> {
    /// One period per candle, drawn at positions `0..len`.
    pub months: &'a [MonthPeriod],
    /// Trailing 10-month MA over closes, as `(position, value)`.
    pub ma: &'a [(f64, f64)],
    /// X bounds (candle position).
    pub x_bounds: [f64; 2],
    /// Y bounds (index level).
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for MonthlyCandles<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) {
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !bounds_ok(x0, x1, y0, y1) {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| month_label(self.months, *v))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let gain = RGBColor(0, 255, 0).filled();
            let loss = RGBColor(255, 0, 0).filled();

            chart.draw_series(self.months.iter().enumerate().map(|(i, m)| {
                CandleStick::new(i as f64, m.open, m.high, m.low, m.close, gain, loss, 3)
            }))?;

            chart.draw_series(LineSeries::new(
                self.ma.iter().copied(),
                &RGBColor(255, 0, 0),
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// When the available area is too small, Plotters may fail to build a chart.
/// In that case, we render a small hint rather than panicking.
fn too_small(area: Rect, buf: &mut Buffer) -> bool {
    if area.width < 20 || area.height < 8 {
        buf.set_string(
            area.x,
            area.y,
            "Chart area too small (resize terminal).",
            Style::default().fg(Color::Yellow),
        );
        return true;
    }
    false
}

fn bounds_ok(x0: f64, x1: f64, y0: f64, y1: f64) -> bool {
    x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite() && x1 > x0 && y1 > y0
}

fn tick_label(ticks: &[String], position: f64) -> String {
    let idx = position.round();
    if idx < 0.0 {
        return String::new();
    }
    ticks
        .get(idx as usize)
        .cloned()
        .unwrap_or_default()
}

fn month_label(months: &[MonthPeriod], position: f64) -> String {
    let idx = position.round();
    if idx < 0.0 {
        return String::new();
    }
    months
        .get(idx as usize)
        .map(|m| m.month.clone())
        .unwrap_or_default()
}
