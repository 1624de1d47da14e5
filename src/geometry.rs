use serde::{Deserialize, Serialize};

/// A plain 2D coordinate pair. Points carry no identity beyond their value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Euclidean distance between `p1` and `p2`.
///
/// Axis-aligned and coincident pairs are resolved with exact comparisons
/// so they never pick up rounding from the square root.
pub fn point_to_point_distance(p1: &Point, p2: &Point) -> f64 {
    if p1.x == p2.x && p1.y == p2.y {
        return 0.0;
    }

    let d = if p1.x == p2.x {
        // slope infinity
        p2.y - p1.y
    } else if p1.y == p2.y {
        // slope 0
        p2.x - p1.x
    } else {
        ((p2.y - p1.y).powi(2) + (p2.x - p1.x).powi(2)).sqrt()
    };

    d.abs()
}

/// Perpendicular distance from `p2` to the infinite line through `p1` and `p3`.
///
/// A zero-length line (`p1 == p3`) degrades to the point distance between
/// `p1` and `p2`. Vertical and horizontal lines are handled before the
/// slope-intercept form so the general branch never divides by zero.
pub fn point_to_line_distance(p1: &Point, p2: &Point, p3: &Point) -> f64 {
    if p1 == p2 && p2 == p3 {
        return 0.0;
    }

    if p1 == p3 {
        return point_to_point_distance(p1, p2);
    }

    let d = if p1.x == p3.x {
        // vertical line
        p2.x - p1.x
    } else if p1.y == p3.y {
        // horizontal line
        p2.y - p1.y
    } else {
        let m = (p3.y - p1.y) / (p3.x - p1.x);
        let b = p1.y - m * p1.x;
        (p2.y - m * p2.x - b) / (m * m + 1.0).sqrt()
    };

    d.abs()
}
