//! Shared numeric helpers for the aggregation modules.

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; `None` for an empty slice. Even lengths average the two middle
/// values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation; `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Pearson correlation coefficient between two equal-length series.
///
/// Returns `NaN` when either series is empty, the lengths differ, or either
/// series has zero variance (undefined correlation).
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() || x.len() != y.len() {
        return f64::NAN;
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

#[cfg(test)]
mod tests {
    use super::{mean, median, pearson, population_std_dev};

    #[test]
    fn mean_and_median_of_small_series() {
        assert_eq!(mean(&[10.0, 12.0, 14.0]), Some(12.0));
        assert_eq!(median(&[14.0, 10.0, 12.0]), Some(12.0));
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn population_std_dev_matches_hand_computation() {
        // Values 2, 4, 4, 4, 5, 5, 7, 9: the textbook example with sigma = 2.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&values).unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn pearson_of_linear_series_is_plus_minus_one() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&x, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_nan_for_degenerate_input() {
        assert!(pearson(&[], &[]).is_nan());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_nan());
        // Zero variance
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
    }
}
