use super::{Point2, Vector2};

/// Even-odd test for whether `p` lies strictly inside the closed polygon.
///
/// Points exactly on the boundary may land on either side; callers that
/// need boundary inclusion check edge distance separately.
#[must_use]
pub fn point_in_polygon_2d(p: &Point2, points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&points[i], &points[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pi.x + (p.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns the left-pointing normal of a direction vector (rotated +90°).
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn point_inside_square() {
        assert!(point_in_polygon_2d(&Point2::new(0.5, 0.5), &unit_square()));
    }

    #[test]
    fn point_outside_square() {
        assert!(!point_in_polygon_2d(&Point2::new(1.5, 0.5), &unit_square()));
        assert!(!point_in_polygon_2d(&Point2::new(0.5, -0.5), &unit_square()));
    }

    #[test]
    fn point_inside_concave_notch() {
        // U-shape: the notch between the arms is outside.
        let u = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(2.0, 3.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 3.0),
            Point2::new(0.0, 3.0),
        ];
        assert!(point_in_polygon_2d(&Point2::new(0.5, 2.0), &u));
        assert!(!point_in_polygon_2d(&Point2::new(1.5, 2.0), &u));
    }

    #[test]
    fn left_normal_basic() {
        let n = left_normal(&Vector2::new(1.0, 0.0));
        assert!((n.x).abs() < TOLERANCE);
        assert!((n.y - 1.0).abs() < TOLERANCE);
    }
}
