/// Computes the root mean square of a slice of values.
///
/// The sign of each value is irrelevant since every value is
/// squared before averaging.
///
/// # Arguments
///
/// * `values` - A slice of values, typically perpendicular deviations.
///
/// # Returns
///
/// Returns `None` for an empty slice, otherwise `sqrt(sum(v^2) / n)`.
pub fn root_mean_square(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sum_sq = 0.0;
    for &value in values {
        sum_sq += value * value;
    }

    Some((sum_sq / values.len() as f64).sqrt())
}

/// Largest value of a slice, `None` when empty.
pub fn max_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().fold(None, |acc, value| match acc {
        None => Some(value),
        Some(max_val) if value > max_val => Some(value),
        _ => acc,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_mean_square_many_values() {
        assert!((root_mean_square(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap() - 3.3166).abs() < 1e-4);
        assert!((root_mean_square(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap() - 33.1662).abs() < 1e-4);
        assert!((root_mean_square(&[-10.0, -20.0, 30.0, 40.0, 50.0]).unwrap() - 33.1662).abs() < 1e-4);
    }

    #[test]
    fn test_root_mean_square_single_value() {
        assert_eq!(root_mean_square(&[1.0]), Some(1.0));
        assert_eq!(root_mean_square(&[12345.0]), Some(12345.0));
        assert_eq!(root_mean_square(&[-12345.0]), Some(12345.0));
    }

    #[test]
    fn test_root_mean_square_empty() {
        assert_eq!(root_mean_square(&[]), None);
    }

    #[test]
    fn test_max_value() {
        assert_eq!(max_value(&[1.0, 5.0, 3.0]), Some(5.0));
        assert_eq!(max_value(&[-3.0, -1.0, -2.0]), Some(-1.0));
        assert_eq!(max_value(&[]), None);
    }
}
