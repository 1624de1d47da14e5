use serde::{Deserialize, Serialize};

use crate::geometry::{point_to_line_distance, Point};
use crate::neighborhood::WorkingPoint;
use crate::support::{max_value, root_mean_square};

/// Range error used to score a gap between two present points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMetric {
    /// Largest perpendicular distance in the range.
    #[default]
    Max,
    /// Root mean square of the perpendicular distances in the range.
    Rms,
}

impl ErrorMetric {
    /// Range error of the original points between `start` and `end` under this metric.
    pub fn evaluate(self, sequence: &[Point], start: &WorkingPoint, end: &WorkingPoint) -> Option<f64> {
        match self {
            ErrorMetric::Max => max_deviation(sequence, start, end),
            ErrorMetric::Rms => rms_deviation(sequence, start, end),
        }
    }
}

// Distances of every original point strictly between `start` and `end` to
// the chord joining them, whether removed or not.
fn range_deviations(sequence: &[Point], start: &WorkingPoint, end: &WorkingPoint) -> Option<Vec<f64>> {
    if sequence.is_empty() {
        return None;
    }

    let (start, end) = if start.index > end.index { (end, start) } else { (start, end) };
    let interior = sequence.get(start.index + 1..end.index)?;
    if interior.is_empty() {
        return None;
    }

    let a = start.point();
    let b = end.point();
    Some(interior.iter().map(|p| point_to_line_distance(&a, p, &b)).collect())
}

/// Maximum deviation of the original points between `start` and `end`.
///
/// `start` and `end` may be given in either order. Returns `None` for an
/// empty sequence or when no original index lies strictly between them.
pub fn max_deviation(sequence: &[Point], start: &WorkingPoint, end: &WorkingPoint) -> Option<f64> {
    range_deviations(sequence, start, end).and_then(|d| max_value(&d))
}

/// Root mean square deviation of the original points between `start` and `end`.
///
/// Same range and `None` conditions as [`max_deviation`].
pub fn rms_deviation(sequence: &[Point], start: &WorkingPoint, end: &WorkingPoint) -> Option<f64> {
    range_deviations(sequence, start, end).and_then(|d| root_mean_square(&d))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::wrap_points;

    fn points1() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
            Point::new(15.0, 0.0),
            Point::new(20.0, 5.0),
            Point::new(25.0, 0.0),
            Point::new(30.0, 0.0),
        ]
    }

    fn points2() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 6.0),
            Point::new(10.0, 10.0),
            Point::new(9.0, 132.0),
            Point::new(20.0, 155.0),
            Point::new(25.0, 120.0),
            Point::new(30.0, 10.0),
        ]
    }

    #[test]
    fn test_rms_within_range() {
        let seq = points1();
        let wp = wrap_points(&seq);
        assert_eq!(rms_deviation(&seq, &wp[0], &wp[2]), Some(5.0));
        assert!((rms_deviation(&seq, &wp[0], &wp[3]).unwrap() - 3.5355).abs() < 1e-4);
        assert!((rms_deviation(&seq, &wp[0], &wp[6]).unwrap() - 3.1623).abs() < 1e-4);

        let seq2 = points2();
        let wp2 = wrap_points(&seq2);
        assert!((rms_deviation(&seq2, &wp2[0], &wp2[6]).unwrap() - 95.9779).abs() < 1e-4);
    }

    #[test]
    fn test_rms_swapped_range() {
        let seq = points1();
        let wp = wrap_points(&seq);
        assert!((rms_deviation(&seq, &wp[6], &wp[0]).unwrap() - 3.1623).abs() < 1e-4);

        let seq2 = points2();
        let wp2 = wrap_points(&seq2);
        assert!((rms_deviation(&seq2, &wp2[6], &wp2[0]).unwrap() - 95.9779).abs() < 1e-4);
    }

    #[test]
    fn test_max_within_range() {
        let seq = points1();
        let wp = wrap_points(&seq);
        assert_eq!(max_deviation(&seq, &wp[0], &wp[2]), Some(5.0));
        assert_eq!(max_deviation(&seq, &wp[0], &wp[3]), Some(5.0));
        assert_eq!(max_deviation(&seq, &wp[0], &wp[6]), Some(5.0));

        let seq2 = points2();
        let wp2 = wrap_points(&seq2);
        assert!((max_deviation(&seq2, &wp2[0], &wp2[6]).unwrap() - 140.7214).abs() < 1e-4);
    }

    #[test]
    fn test_max_is_order_independent() {
        let seq = points2();
        let wp = wrap_points(&seq);
        for a in 0..wp.len() {
            for b in 0..wp.len() {
                assert_eq!(max_deviation(&seq, &wp[a], &wp[b]), max_deviation(&seq, &wp[b], &wp[a]));
            }
        }
    }

    #[test]
    fn test_zero_length_range() {
        let seq = points1();
        let wp = wrap_points(&seq);
        assert_eq!(rms_deviation(&seq, &wp[0], &wp[0]), None);
        assert_eq!(max_deviation(&seq, &wp[0], &wp[0]), None);
        assert_eq!(max_deviation(&seq, &wp[3], &wp[4]), None);
        assert_eq!(rms_deviation(&seq, &wp[4], &wp[3]), None);
    }

    #[test]
    fn test_empty_sequence() {
        let start = WorkingPoint::new(&Point::new(0.0, 0.0), 0);
        let end = WorkingPoint::new(&Point::new(10.0, 0.0), 5);
        assert_eq!(max_deviation(&[], &start, &end), None);
        assert_eq!(rms_deviation(&[], &start, &end), None);
    }

    #[test]
    fn test_removed_points_still_count() {
        let seq = points1();
        let mut wp = wrap_points(&seq);
        for p in wp.iter_mut().skip(1).take(5) {
            p.removed = true;
        }
        assert_eq!(max_deviation(&seq, &wp[0], &wp[6]), Some(5.0));
    }

    #[test]
    fn test_metric_dispatch() {
        let seq = points1();
        let wp = wrap_points(&seq);
        assert_eq!(ErrorMetric::default(), ErrorMetric::Max);
        assert_eq!(ErrorMetric::Max.evaluate(&seq, &wp[0], &wp[6]), Some(5.0));
        assert_eq!(
            ErrorMetric::Rms.evaluate(&seq, &wp[0], &wp[6]),
            rms_deviation(&seq, &wp[0], &wp[6])
        );
    }
}
