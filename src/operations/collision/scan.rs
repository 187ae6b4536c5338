use tracing::trace;

use crate::geometry::{
    effective_resolution, influence_of, sample_parameters, ControlPoint, CubicBezier, Polygon,
};
use crate::math::polygon_2d::left_normal;
use crate::math::{Vector2, TOLERANCE};

/// A contiguous run of colliding samples along the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSpan {
    /// Parameter of the first colliding sample.
    pub start: f64,
    /// Parameter of the last colliding sample, or `1.0` if the run reaches the end.
    pub end: f64,
}

impl CollisionSpan {
    /// The representative parameter of the run: the midpoint of `start` and `end`.
    #[must_use]
    pub fn parameter(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Result of scanning a thick curve against a set of obstacles.
///
/// Each entry stands for one contiguous run of colliding samples, in
/// increasing parameter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    spans: Vec<CollisionSpan>,
    penetration: f64,
}

impl CollisionReport {
    /// Number of collision runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns whether the curve is collision-free.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The collision runs in parameter order.
    #[must_use]
    pub fn spans(&self) -> &[CollisionSpan] {
        &self.spans
    }

    /// Iterates the representative parameter of each run.
    pub fn parameters(&self) -> impl Iterator<Item = f64> + '_ {
        self.spans.iter().map(CollisionSpan::parameter)
    }

    /// How deep the thick curve sits inside obstacles, integrated over arc length.
    #[must_use]
    pub fn penetration(&self) -> f64 {
        self.penetration
    }

    /// Number of runs attributable to `control` (ties blame both control points).
    #[must_use]
    pub fn blamed_on(&self, control: ControlPoint) -> usize {
        self.parameters()
            .filter(|&t| influence_of(t).blames(control))
            .count()
    }
}

/// Samples a curve of finite width and reports where it overlaps obstacles.
///
/// At every sample the curve point is offset by `half_width` along both
/// normals; the segment between the two offsets is tested against each
/// obstacle. Consecutive colliding samples collapse into one [`CollisionSpan`].
/// Where the tangent vanishes the offset falls back to the vertical.
///
/// A curve whose main points coincide has zero length and never collides.
#[derive(Debug)]
pub struct ScanCollisions<'a> {
    spline: &'a CubicBezier,
    obstacles: &'a [Polygon],
    resolution: f64,
    half_width: f64,
}

impl<'a> ScanCollisions<'a> {
    /// Creates a new scan over `spline` with the given sampling `resolution`.
    ///
    /// Resolutions outside `(0, 1]` are clamped with [`effective_resolution`].
    #[must_use]
    pub fn new(
        spline: &'a CubicBezier,
        obstacles: &'a [Polygon],
        resolution: f64,
        half_width: f64,
    ) -> Self {
        Self {
            spline,
            obstacles,
            resolution: effective_resolution(resolution),
            half_width,
        }
    }

    /// Executes the scan.
    #[must_use]
    pub fn execute(&self) -> CollisionReport {
        let mut report = CollisionReport::default();
        if self.spline.is_degenerate() {
            trace!("degenerate curve, skipping scan");
            return report;
        }
        let mut run_start: Option<f64> = None;
        let mut prev_t = 0.0;

        for t in sample_parameters(self.resolution) {
            let center = self.spline.evaluate(t);
            let tangent = self.spline.derivative(t);
            let direction = tangent.try_normalize(TOLERANCE).unwrap_or_else(Vector2::x);
            let offset = left_normal(&direction) * self.half_width;
            let (left, right) = (center + offset, center - offset);

            let depth = self
                .obstacles
                .iter()
                .filter(|obstacle| obstacle.intersects_segment(&left, &right))
                .map(|obstacle| obstacle.signed_distance(&center))
                .reduce(f64::max);

            if let Some(depth) = depth {
                report.penetration +=
                    (self.half_width + depth).max(0.0) * tangent.norm() * self.resolution;
                if run_start.is_none() {
                    run_start = Some(t);
                }
            } else if let Some(start) = run_start.take() {
                report.spans.push(CollisionSpan { start, end: prev_t });
            }
            prev_t = t;
        }

        if let Some(start) = run_start {
            report.spans.push(CollisionSpan { start, end: 1.0 });
        }

        trace!(
            runs = report.spans.len(),
            penetration = report.penetration,
            "collision scan"
        );
        report
    }
}
