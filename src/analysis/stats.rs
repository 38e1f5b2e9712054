//! Scalar statistics helpers.
//!
//! All helpers return `Option<f64>`: an aggregate over too few values is
//! `None`, never NaN, so undefined statistics stay explicit downstream.

/// Arithmetic mean; `None` for an empty iterator.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Sample standard deviation (divide by n-1); `None` with fewer than 2 values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values.iter().copied())?;
    let sq_sum: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sq_sum / (values.len() - 1) as f64).sqrt())
}

/// Maximum value; `None` for an empty iterator.
pub fn max_value(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn mean_basic() {
        let m = mean([10.0, 12.0, 11.0]).expect("defined");
        assert!((m - 11.0).abs() < 1e-12);
    }

    #[test]
    fn sample_std_requires_two_values() {
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[5.0]), None);
    }

    #[test]
    fn sample_std_divides_by_n_minus_one() {
        // values [1, 3]: mean 2, squared deviations 1 + 1, / (n-1) = 2
        let s = sample_std(&[1.0, 3.0]).expect("defined");
        assert!((s - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn sample_std_worked_series() {
        // [10, 12, 11, 50, 13]: mean 19.2, sq_sum 1190.8, / 4 = 297.7
        let s = sample_std(&[10.0, 12.0, 11.0, 50.0, 13.0]).expect("defined");
        assert!((s - 297.7_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn max_of_empty_is_none() {
        assert_eq!(max_value(std::iter::empty()), None);
    }

    #[test]
    fn max_basic() {
        assert_eq!(max_value([1.0, 9.0, 4.0]), Some(9.0));
    }
}
