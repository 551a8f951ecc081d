//! Weekly -> monthly OHLC aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{MonthPeriod, Record};
use crate::series::rolling::rolling_mean;

/// Rolling window for the monthly moving average over closes.
pub const MONTHLY_WINDOW: usize = 10;

/// Aggregate the sorted weekly series into calendar months.
///
/// Records are grouped by `YYYY-MM`; each group is re-sorted by `end_date`
/// (stable, guarding against non-monotonic ties from the input sort) before
/// `open`/`close` are taken from its ends. Groups come out in ascending
/// month-key order. `ma10` is the trailing mean of `close` with window 10.
///
/// Pure and total; a month with a single record has
/// `open == close == high == low`.
pub fn to_monthly(series: &[Record]) -> Vec<MonthPeriod> {
    let mut groups: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for record in series {
        groups
            .entry(record.month_key())
            .or_default()
            .push((record.end_date, record.value));
    }

    let mut months = Vec::with_capacity(groups.len());
    for (month, mut rows) in groups {
        rows.sort_by_key(|&(date, _)| date);

        let (_, open) = rows[0];
        let (_, close) = rows[rows.len() - 1];
        let high = rows.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);
        let low = rows.iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min);

        months.push(MonthPeriod {
            month,
            open,
            high,
            low,
            close,
            ma10: 0.0,
        });
    }

    let closes: Vec<f64> = months.iter().map(|m| m.close).collect();
    for (month, ma10) in months.iter_mut().zip(rolling_mean(&closes, MONTHLY_WINDOW)) {
        month.ma10 = ma10;
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, value: f64) -> Record {
        Record {
            original_range: format!("week ending {date}"),
            end_date: date.parse().unwrap(),
            value,
        }
    }

    #[test]
    fn empty_series_yields_no_months() {
        assert!(to_monthly(&[]).is_empty());
    }

    #[test]
    fn single_record_month_collapses_ohlc() {
        let months = to_monthly(&[record("2023-01-07", 180.5)]);
        assert_eq!(months.len(), 1);
        let m = &months[0];
        assert_eq!(m.month, "2023-01");
        assert_eq!(m.open, 180.5);
        assert_eq!(m.close, 180.5);
        assert_eq!(m.high, 180.5);
        assert_eq!(m.low, 180.5);
        assert!((m.ma10 - 180.5).abs() < 1e-12);
    }

    #[test]
    fn fifteen_weeks_across_three_months_yield_three_periods_in_order() {
        let dates = [
            "2023-01-01", "2023-01-08", "2023-01-15", "2023-01-22", "2023-01-29",
            "2023-02-01", "2023-02-08", "2023-02-15", "2023-02-22", "2023-02-28",
            "2023-03-01", "2023-03-08", "2023-03-15", "2023-03-22", "2023-03-29",
        ];
        let series: Vec<Record> = dates
            .iter()
            .enumerate()
            .map(|(i, date)| record(date, 180.0 + i as f64))
            .collect();
        let months = to_monthly(&series);
        assert_eq!(months.len(), 3);
        let keys: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, ["2023-01", "2023-02", "2023-03"]);
    }

    #[test]
    fn groups_partition_the_series() {
        let series = vec![
            record("2023-01-07", 180.0),
            record("2023-01-14", 181.0),
            record("2023-02-04", 182.0),
            record("2023-02-11", 181.5),
            record("2023-03-04", 183.0),
        ];
        let months = to_monthly(&series);
        // No record omitted or duplicated: open/close/high/low of each month
        // are drawn from that month's records and the counts add up.
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].open, 180.0);
        assert_eq!(months[0].close, 181.0);
        assert_eq!(months[1].open, 182.0);
        assert_eq!(months[1].close, 181.5);
        assert_eq!(months[2].open, 183.0);
    }

    #[test]
    fn ohlc_bounds_hold_for_every_month() {
        let series = vec![
            record("2023-01-07", 183.0),
            record("2023-01-14", 179.0),
            record("2023-01-21", 181.0),
            record("2023-02-04", 178.0),
            record("2023-02-11", 184.0),
        ];
        for m in to_monthly(&series) {
            assert!(m.low <= m.open && m.open <= m.high);
            assert!(m.low <= m.close && m.close <= m.high);
            assert!(m.low <= m.high);
        }
    }

    #[test]
    fn open_and_close_follow_chronology_not_input_order() {
        // Same month delivered out of order: the group re-sort restores it.
        let series = vec![
            record("2023-01-21", 182.0),
            record("2023-01-07", 180.0),
            record("2023-01-14", 181.0),
        ];
        let months = to_monthly(&series);
        assert_eq!(months[0].open, 180.0);
        assert_eq!(months[0].close, 182.0);
        assert_eq!(months[0].high, 182.0);
        assert_eq!(months[0].low, 180.0);
    }

    #[test]
    fn ma10_matches_the_trailing_close_window() {
        let mut series = Vec::new();
        let start: NaiveDate = "2022-01-07".parse().unwrap();
        for i in 0..60 {
            let date = start + chrono::Duration::weeks(i);
            series.push(record(&date.to_string(), 150.0 + (i as f64 * 0.7)));
        }
        let months = to_monthly(&series);
        assert!(months.len() > MONTHLY_WINDOW);

        let closes: Vec<f64> = months.iter().map(|m| m.close).collect();
        for (i, m) in months.iter().enumerate() {
            let start = i.saturating_sub(MONTHLY_WINDOW - 1);
            let window = &closes[start..=i];
            let expected = window.iter().sum::<f64>() / window.len() as f64;
            assert!((m.ma10 - expected).abs() < 1e-9, "month {}", m.month);
        }
    }
}
