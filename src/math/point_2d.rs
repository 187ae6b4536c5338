use super::{Point2, Vector2, TOLERANCE};

/// Tolerance on the cross product used by [`lies_on_segment_2d`].
const COLLINEAR_TOLERANCE: f64 = 1e-5;

/// Euclidean distance between two points.
#[must_use]
pub fn distance_2d(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Point halfway between `a` and `b`.
#[must_use]
pub fn midpoint_2d(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

/// Returns whether `p` lies on the segment from `a` to `b`.
///
/// The point must fall inside the segment's bounding box and be collinear
/// with it up to a small cross-product tolerance.
#[must_use]
pub fn lies_on_segment_2d(a: &Point2, b: &Point2, p: &Point2) -> bool {
    let (xmin, xmax) = (a.x.min(b.x), a.x.max(b.x));
    let (ymin, ymax) = (a.y.min(b.y), a.y.max(b.y));
    if p.x < xmin || p.x > xmax || p.y < ymin || p.y > ymax {
        return false;
    }
    let cross = (b.y - a.y) * (p.x - a.x) - (b.x - a.x) * (p.y - a.y);
    cross.abs() < COLLINEAR_TOLERANCE
}

/// Normalizes `v`, or returns the zero vector when `v` is (nearly) zero-length.
#[must_use]
pub fn normalize_or_zero(v: &Vector2) -> Vector2 {
    v.try_normalize(TOLERANCE).unwrap_or_else(Vector2::zeros)
}
