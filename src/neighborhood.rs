use crate::geometry::Point;

/// Run-scoped wrapper around an input point.
///
/// `index` is the position in the caller's sequence and never changes.
/// `removed` flips at most once, from false to true. `deviation` is only
/// meaningful for interior points that are still present.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingPoint {
    pub x: f64,
    pub y: f64,
    pub index: usize,
    pub removed: bool,
    pub deviation: Option<f64>,
}

impl WorkingPoint {
    pub fn new(point: &Point, index: usize) -> Self {
        WorkingPoint {
            x: point.x,
            y: point.y,
            index,
            removed: false,
            deviation: None,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Wraps every point of `sequence` with its original index.
pub fn wrap_points(sequence: &[Point]) -> Vec<WorkingPoint> {
    sequence
        .iter()
        .enumerate()
        .map(|(i, point)| WorkingPoint::new(point, i))
        .collect()
}

/// Finds the closest non-removed working points to the left and right of
/// position `index` in `points`.
///
/// The scan is strictly outward from `index`, so the state of the point at
/// `index` itself does not matter. Either side is `None` when the scan runs
/// off the end of the list.
pub fn find_neighborhood(points: &[WorkingPoint], index: usize) -> (Option<usize>, Option<usize>) {
    if points.is_empty() {
        return (None, None);
    }

    let left = (0..index.min(points.len()))
        .rev()
        .find(|&i| !points[i].removed);

    let right = (index.saturating_add(1)..points.len())
        .find(|&i| !points[i].removed);

    (left, right)
}
