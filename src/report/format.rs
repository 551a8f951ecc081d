//! Formatted terminal output for the series, the trend, and the monthly view.

use crate::domain::{MonthPeriod, Record, WeeklyPoint};

/// Format the latest `last_n` records as a table, newest first.
pub fn format_series_table(series: &[Record], last_n: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:>10}  {}\n",
        "End date", "CCL", "Date range"
    ));

    let start = series.len().saturating_sub(last_n);
    for record in series[start..].iter().rev() {
        out.push_str(&format!(
            "{:<12} {:>10.2}  {}\n",
            record.end_date.to_string(),
            record.value,
            record.original_range
        ));
    }

    out.push_str(&format!(
        "\nShowing the latest {} of {} records\n",
        series.len() - start,
        series.len()
    ));

    out
}

/// Format the weekly trend summary: period bounds, latest value, band levels,
/// peak and trough.
pub fn format_trend_summary(weekly: &[WeeklyPoint]) -> String {
    let mut out = String::new();
    out.push_str("=== CCL Index Trend (52-week MA bands: x1.06 / x0.96) ===\n");

    let Some(last) = weekly.last() else {
        out.push_str("No data.\n");
        return out;
    };
    // weekly is non-empty here.
    let first = &weekly[0];

    let mut peak = f64::NEG_INFINITY;
    let mut trough = f64::INFINITY;
    for p in weekly {
        peak = peak.max(p.record.value);
        trough = trough.min(p.record.value);
    }

    out.push_str(&format!(
        "Period: {} → {} ({} weeks)\n",
        first.record.end_date,
        last.record.end_date,
        weekly.len()
    ));
    out.push_str(&format!("Latest: {:.2} ({})\n", last.record.value, last.record.end_date));
    out.push_str(&format!(
        "52W MA: {:.2} | upper {:.2} | lower {:.2}\n",
        last.ma52, last.upper_band, last.lower_band
    ));
    out.push_str(&format!("Peak: {peak:.2} | Lowest: {trough:.2}\n"));

    out
}

/// Format the monthly OHLC table with the 10-month MA and a bullish/bearish
/// footer.
pub fn format_monthly_table(monthly: &[MonthPeriod]) -> String {
    let mut out = String::new();
    out.push_str("=== Monthly CCL Performance (10-month MA) ===\n");

    if monthly.is_empty() {
        out.push_str("No data.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<8} {:>9} {:>9} {:>9} {:>9} {:>8} {:>9}\n",
        "Month", "Open", "High", "Low", "Close", "Chg%", "MA10"
    ));
    for m in monthly {
        out.push_str(&format!(
            "{:<8} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>+7.2}% {:>9.2}\n",
            m.month,
            m.open,
            m.high,
            m.low,
            m.close,
            m.change_pct(),
            m.ma10
        ));
    }

    let bullish = monthly.iter().filter(|m| m.is_bullish()).count();
    let bearish = monthly.len() - bullish;
    let last = &monthly[monthly.len() - 1];
    out.push_str(&format!(
        "\nMonths: {} | Bullish: {bullish} | Bearish: {bearish}\n",
        monthly.len()
    ));
    out.push_str(&format!(
        "Latest close: {:.2} | 10M MA: {:.2} | Trend: {}\n",
        last.close,
        last.ma10,
        if last.is_bullish() { "upward" } else { "downward" }
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{to_monthly, with_weekly_bands};

    fn record(date: &str, value: f64) -> Record {
        Record {
            original_range: format!("{date} range"),
            end_date: date.parse().unwrap(),
            value,
        }
    }

    #[test]
    fn series_table_shows_latest_first_and_counts() {
        let series = vec![
            record("2023-01-07", 180.5),
            record("2023-01-14", 181.2),
            record("2023-01-21", 179.8),
        ];
        let table = format_series_table(&series, 2);
        let first_data_line = table.lines().nth(1).unwrap();
        assert!(first_data_line.contains("2023-01-21"));
        assert!(table.contains("Showing the latest 2 of 3 records"));
        assert!(!table.contains("2023-01-07 "));
    }

    #[test]
    fn trend_summary_reports_bounds_and_extremes() {
        let weekly = with_weekly_bands(&[
            record("2023-01-07", 180.5),
            record("2023-01-14", 185.0),
            record("2023-01-21", 178.0),
        ]);
        let summary = format_trend_summary(&weekly);
        assert!(summary.contains("2023-01-07 → 2023-01-21"));
        assert!(summary.contains("Latest: 178.00"));
        assert!(summary.contains("Peak: 185.00"));
        assert!(summary.contains("Lowest: 178.00"));
    }

    #[test]
    fn trend_summary_handles_the_empty_series() {
        assert!(format_trend_summary(&[]).contains("No data."));
    }

    #[test]
    fn monthly_table_counts_bullish_and_bearish_months() {
        let monthly = to_monthly(&[
            record("2023-01-07", 180.0),
            record("2023-01-28", 182.0),
            record("2023-02-04", 183.0),
            record("2023-02-25", 181.0),
        ]);
        let table = format_monthly_table(&monthly);
        assert!(table.contains("Bullish: 1"));
        assert!(table.contains("Bearish: 1"));
        assert!(table.contains("2023-01"));
        assert!(table.contains("2023-02"));
    }
}
