//! Summary statistics for Monte Carlo outputs
//!
//! Percentiles use the truncating-index estimator `sorted[floor(n * p / 100)]`
//! rather than interpolation. Results stay comparable with earlier outputs of
//! the engine; for small `n` the estimator is biased upward.

/// z-score for a two-sided 95% confidence interval
pub const Z_95: f64 = 1.96;

/// Value at `floor(n * p / 100)` of an already sorted slice.
///
/// Returns `None` for an empty slice. The index is clamped to the last
/// element so `p = 100` is accepted.
pub fn truncating_percentile<T: Copy>(sorted: &[T], p: u32) -> Option<T> {
    if sorted.is_empty() {
        return None;
    }
    let index = (sorted.len() * p as usize / 100).min(sorted.len() - 1);
    Some(sorted[index])
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two values
pub fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Normal-approximation 95% confidence interval for a mean
pub fn confidence_interval_95(mean: f64, std_dev: f64, n: usize) -> (f64, f64) {
    if n == 0 {
        return (mean, mean);
    }
    let half_width = Z_95 * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncating_percentile_index() {
        let sorted: Vec<u32> = (1..=10).collect();
        // floor(10 * 50 / 100) = 5 -> sixth element
        assert_eq!(truncating_percentile(&sorted, 50), Some(6));
        assert_eq!(truncating_percentile(&sorted, 90), Some(10));
        assert_eq!(truncating_percentile(&sorted, 5), Some(1));
        assert_eq!(truncating_percentile(&sorted, 100), Some(10));
    }

    #[test]
    fn test_truncating_percentile_empty() {
        let empty: [f64; 0] = [];
        assert_eq!(truncating_percentile(&empty, 50), None);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(truncating_percentile(&[42.0], 95), Some(42.0));
        assert_eq!(sample_std_dev(&[42.0], 42.0), 0.0);
    }

    #[test]
    fn test_sample_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        // Sum of squares 32, n - 1 = 7
        assert!((sample_std_dev(&values, m) - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_interval_contains_mean() {
        let (lo, hi) = confidence_interval_95(100.0, 15.0, 25);
        assert!((lo - 94.12).abs() < 1e-9);
        assert!((hi - 105.88).abs() < 1e-9);
    }
}
