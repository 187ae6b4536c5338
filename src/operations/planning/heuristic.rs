use std::cmp::Ordering;

use crate::geometry::{ControlPoint, CubicBezier, Polygon};
use crate::math::point_2d::distance_2d;
use crate::operations::collision::{CollisionReport, ScanCollisions};

use super::PlannerConfig;

/// Ranking of one placement of the focused control point. Lower is better.
///
/// Scores compare lexicographically in field order: collisions attributable to
/// the focused control point come first; everything after that only breaks ties.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicScore {
    /// Collision runs whose dominant control point is the focused one (ties count).
    pub influenced_collisions: usize,
    /// All collision runs.
    pub collisions: usize,
    /// Depth of the overlap with obstacles, integrated over arc length.
    pub penetration: f64,
    /// Distance from the focused control point to its adjacent main point.
    pub distance_from_main: f64,
    /// Approximate arc length of the curve.
    pub curve_length: f64,
    /// Distance between the second derivatives at both ends.
    pub curvature_penalty: f64,
}

impl HeuristicScore {
    /// Scans `spline` against `obstacles` and scores it for `focus`.
    #[must_use]
    pub fn evaluate(
        spline: &CubicBezier,
        focus: ControlPoint,
        obstacles: &[Polygon],
        config: &PlannerConfig,
    ) -> Self {
        let report =
            ScanCollisions::new(spline, obstacles, config.resolution, config.half_width).execute();
        Self::from_report(spline, focus, &report, config.resolution)
    }

    /// Scores `spline` for `focus` from an existing collision report.
    #[must_use]
    pub fn from_report(
        spline: &CubicBezier,
        focus: ControlPoint,
        report: &CollisionReport,
        resolution: f64,
    ) -> Self {
        Self {
            influenced_collisions: report.blamed_on(focus),
            collisions: report.len(),
            penetration: report.penetration(),
            distance_from_main: distance_2d(&spline.control(focus), &spline.anchor(focus)),
            curve_length: spline.arc_length(resolution),
            curvature_penalty: spline.curvature_penalty(),
        }
    }

    /// Linear blend of the metrics, kept for diagnostics.
    ///
    /// The weights are tunable and carry no meaning for the ordering, which is
    /// always lexicographic.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn weighted(&self) -> f64 {
        1000.0 * self.collisions as f64
            + 500.0 * self.influenced_collisions as f64
            + self.curve_length
            + 0.1 * self.distance_from_main
    }
}

impl Ord for HeuristicScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.influenced_collisions
            .cmp(&other.influenced_collisions)
            .then(self.collisions.cmp(&other.collisions))
            .then(self.penetration.total_cmp(&other.penetration))
            .then(self.distance_from_main.total_cmp(&other.distance_from_main))
            .then(self.curve_length.total_cmp(&other.curve_length))
            .then(self.curvature_penalty.total_cmp(&other.curvature_penalty))
    }
}

impl PartialOrd for HeuristicScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeuristicScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeuristicScore {}
