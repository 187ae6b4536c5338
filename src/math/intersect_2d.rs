use super::{Point2, TOLERANCE};

/// Bounded segment-segment intersection in 2D.
///
/// Solves `a0 + t * (a1 - a0) = b0 + u * (b1 - b0)` and returns `(t, u)` when
/// both parameters lie in `[0, 1]`. Near-parallel segments (determinant below
/// [`TOLERANCE`]) are reported as non-intersecting, including collinear overlap.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let det = da.x * db.y - da.y * db.x;
    if det.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / det;
    let u = (dx * da.y - dy * da.x) / det;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((t, u))
    } else {
        None
    }
}
