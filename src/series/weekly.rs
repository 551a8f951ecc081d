//! Weekly trend annotation: trailing 52-week moving average and its bands.

use crate::domain::{Record, WeeklyPoint};
use crate::series::rolling::rolling_mean;

/// Rolling window for the weekly moving average.
pub const WEEKLY_WINDOW: usize = 52;

/// Fixed band multipliers applied to the 52-week average.
pub const UPPER_BAND_MULTIPLIER: f64 = 1.06;
pub const LOWER_BAND_MULTIPLIER: f64 = 0.96;

/// Annotate every record with its trailing 52-week average and the fixed
/// upper/lower bands. Pure and total; an empty series yields an empty result.
pub fn with_weekly_bands(series: &[Record]) -> Vec<WeeklyPoint> {
    let values: Vec<f64> = series.iter().map(|r| r.value).collect();
    let means = rolling_mean(&values, WEEKLY_WINDOW);

    series
        .iter()
        .zip(means)
        .map(|(record, ma52)| WeeklyPoint {
            record: record.clone(),
            ma52,
            upper_band: ma52 * UPPER_BAND_MULTIPLIER,
            lower_band: ma52 * LOWER_BAND_MULTIPLIER,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> Vec<Record> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let end_date = NaiveDate::from_ymd_opt(2023, 1, 7).unwrap()
                    + chrono::Duration::weeks(i as i64);
                Record {
                    original_range: format!("week ending {end_date}"),
                    end_date,
                    value,
                }
            })
            .collect()
    }

    #[test]
    fn empty_series_yields_empty_output() {
        assert!(with_weekly_bands(&[]).is_empty());
    }

    #[test]
    fn single_point_average_is_the_value_itself() {
        let points = with_weekly_bands(&series(&[180.5]));
        assert_eq!(points.len(), 1);
        assert!((points[0].ma52 - 180.5).abs() < 1e-12);
    }

    #[test]
    fn ma52_matches_the_spec_window() {
        let values: Vec<f64> = (0..80).map(|i| 150.0 + i as f64).collect();
        let points = with_weekly_bands(&series(&values));
        for (i, p) in points.iter().enumerate() {
            let start = i.saturating_sub(WEEKLY_WINDOW - 1);
            let window = &values[start..=i];
            let expected = window.iter().sum::<f64>() / window.len() as f64;
            assert!((p.ma52 - expected).abs() < 1e-9, "index {i}");
        }
    }

    #[test]
    fn bands_are_exact_multiples_of_the_average() {
        let points = with_weekly_bands(&series(&[180.5, 181.2, 179.9, 183.4]));
        for p in &points {
            assert_eq!(p.upper_band, p.ma52 * 1.06);
            assert_eq!(p.lower_band, p.ma52 * 0.96);
        }
    }

    #[test]
    fn one_point_per_record_in_the_same_order() {
        let input = series(&[1.0, 2.0, 3.0]);
        let points = with_weekly_bands(&input);
        assert_eq!(points.len(), input.len());
        for (p, r) in points.iter().zip(&input) {
            assert_eq!(p.record, *r);
        }
    }
}
