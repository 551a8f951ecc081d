//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - weekly index values: `o`
//! - 52-week moving average: `-`
//! - upper/lower bands: `.`

use crate::domain::WeeklyPoint;

/// Render the weekly trend with its MA bands on a fixed character grid.
pub fn render_trend_plot(weekly: &[WeeklyPoint], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    if weekly.is_empty() {
        return "Plot: no data\n".to_string();
    }

    let (y_min, y_max) = value_range(weekly);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Bands and MA first so the observed values can overlay them.
    draw_series(&mut grid, weekly, |p| p.upper_band, '.', y_min, y_max);
    draw_series(&mut grid, weekly, |p| p.lower_band, '.', y_min, y_max);
    draw_series(&mut grid, weekly, |p| p.ma52, '-', y_min, y_max);
    draw_series(&mut grid, weekly, |p| p.record.value, 'o', y_min, y_max);

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} → {} | ccl=[{y_min:.2}, {y_max:.2}]\n",
        weekly[0].record.end_date,
        weekly[weekly.len() - 1].record.end_date
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Draw one series column by column, sampling the nearest point per column.
fn draw_series(
    grid: &mut [Vec<char>],
    weekly: &[WeeklyPoint],
    value: impl Fn(&WeeklyPoint) -> f64,
    ch: char,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();
    let n = weekly.len();

    for col in 0..width {
        let idx = if width == 1 {
            0
        } else {
            (col * (n - 1) + (width - 1) / 2) / (width - 1)
        };
        let y = map_y(value(&weekly[idx]), y_min, y_max, height);
        grid[y][col] = ch;
    }
}

fn value_range(weekly: &[WeeklyPoint]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in weekly {
        for v in [p.record.value, p.upper_band, p.lower_band] {
            min = min.min(v);
            max = max.max(v);
        }
    }
    (min, max)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span < 1e-9 { 1.0 } else { span * frac };
    (min - pad, max + pad)
}

fn map_y(v: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let t = ((v - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top of the grid.
    let row = ((1.0 - t) * (height as f64 - 1.0)).round() as usize;
    row.min(height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use crate::series::with_weekly_bands;

    fn weekly(values: &[f64]) -> Vec<WeeklyPoint> {
        let series: Vec<Record> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Record {
                original_range: String::new(),
                end_date: "2023-01-07".parse::<chrono::NaiveDate>().unwrap()
                    + chrono::Duration::weeks(i as i64),
                value,
            })
            .collect();
        with_weekly_bands(&series)
    }

    #[test]
    fn empty_series_renders_a_placeholder() {
        assert_eq!(render_trend_plot(&[], 40, 10), "Plot: no data\n");
    }

    #[test]
    fn plot_has_requested_dimensions_and_is_deterministic() {
        let points = weekly(&[180.0, 181.0, 179.5, 183.0, 182.2]);
        let a = render_trend_plot(&points, 40, 12);
        let b = render_trend_plot(&points, 40, 12);
        assert_eq!(a, b);

        let lines: Vec<&str> = a.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("Plot: 2023-01-07 → 2023-02-04"));
        assert!(lines[1..].iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn plot_contains_all_three_glyphs() {
        let points = weekly(&[170.0, 190.0, 165.0, 195.0, 180.0, 200.0]);
        let plot = render_trend_plot(&points, 60, 20);
        assert!(plot.contains('o'));
        assert!(plot.contains('-'));
        assert!(plot.contains('.'));
    }
}
