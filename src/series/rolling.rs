//! Trailing rolling mean with a shrinking head window.

/// Trailing mean of up to `window` values ending at (and including) each
/// index. Near the start of the slice the window shrinks, so `out[i]` is the
/// mean of `values[max(0, i + 1 - window) ..= i]` and division is always by a
/// non-zero length.
///
/// Computed with an accumulating sliding sum rather than re-summing the
/// window at every step; the contract only fixes the resulting mean.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let len = (i + 1).min(window);
        out.push(sum / len as f64);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_mean(values: &[f64], i: usize, window: usize) -> f64 {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        slice.iter().sum::<f64>() / slice.len() as f64
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rolling_mean(&[], 52).is_empty());
    }

    #[test]
    fn single_value_is_its_own_mean() {
        let out = rolling_mean(&[180.5], 52);
        assert_eq!(out.len(), 1);
        assert!((out[0] - 180.5).abs() < 1e-12);
    }

    #[test]
    fn window_shrinks_at_the_head() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - 1.5).abs() < 1e-12);
        assert!((out[2] - 2.0).abs() < 1e-12);
        assert!((out[3] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn sliding_sum_matches_naive_recomputation() {
        let values: Vec<f64> = (0..200).map(|i| 150.0 + (i as f64 * 0.37).sin() * 20.0).collect();
        for window in [1, 10, 52, 199, 500] {
            let out = rolling_mean(&values, window);
            for i in 0..values.len() {
                let expected = naive_mean(&values, i, window);
                assert!(
                    (out[i] - expected).abs() < 1e-9,
                    "window {window}, index {i}: {} vs {expected}",
                    out[i]
                );
            }
        }
    }
}
