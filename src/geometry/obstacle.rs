use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::point_2d::lies_on_segment_2d;
use crate::math::polygon_2d::point_in_polygon_2d;
use crate::math::Point2;

/// A closed polygonal obstacle.
///
/// The vertex list wraps from the last vertex back to the first. Polygons
/// with fewer than three vertices are degenerate and never collide.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Creates an obstacle from its ordered vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// Returns the ordered vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Returns whether the polygon has fewer than three vertices.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Iterates the closed edge loop as `(from, to)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&Point2, &Point2)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Returns whether the segment from `a` to `b` touches the obstacle.
    ///
    /// Reports a hit when the segment crosses any edge, or when either
    /// endpoint lies inside or on the boundary. The second case catches
    /// segments entirely inside the polygon, which cross no edge.
    #[must_use]
    pub fn intersects_segment(&self, a: &Point2, b: &Point2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        self.edges()
            .any(|(e0, e1)| segment_segment_intersect_2d(a, b, e0, e1).is_some())
            || self.contains_point(a)
            || self.contains_point(b)
    }

    /// Returns whether `p` lies inside the polygon or on its boundary.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        point_in_polygon_2d(p, &self.vertices)
            || self.edges().any(|(e0, e1)| lies_on_segment_2d(e0, e1, p))
    }

    /// Signed distance from `p` to the boundary: positive inside, negative outside.
    ///
    /// Degenerate polygons report negative infinity.
    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        if self.is_degenerate() {
            return f64::NEG_INFINITY;
        }
        let d = self.boundary_distance(p);
        if point_in_polygon_2d(p, &self.vertices) {
            d
        } else {
            -d
        }
    }

    fn boundary_distance(&self, p: &Point2) -> f64 {
        self.edges()
            .map(|(e0, e1)| point_to_segment_dist(p, e0, e1))
            .fold(f64::INFINITY, f64::min)
    }
}
