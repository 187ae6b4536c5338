use crate::math::point_2d::{distance_2d, midpoint_2d};
use crate::math::{Point2, Vector2};

/// One of the two movable control points of a [`CubicBezier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPoint {
    /// The control point next to the start point.
    P1,
    /// The control point next to the end point.
    P2,
}

impl ControlPoint {
    /// Returns the other control point.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }
}

/// Which control point dominates the curve at a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Influence {
    P1,
    P2,
    /// Both control points carry exactly the same weight.
    Both,
}

impl Influence {
    /// Returns whether a collision with this influence is attributable to `control`.
    ///
    /// Ties blame both control points.
    #[must_use]
    pub fn blames(self, control: ControlPoint) -> bool {
        matches!(
            (self, control),
            (Self::Both, _) | (Self::P1, ControlPoint::P1) | (Self::P2, ControlPoint::P2)
        )
    }
}

/// Compares the Bernstein weights of the two control points at `t`.
///
/// The weight of `P1` is `3t³ - 6t² + 3t` and the weight of `P2` is `-3t³ + 3t²`.
/// The control point with the strictly larger weight wins; equal weights give
/// [`Influence::Both`].
#[must_use]
pub fn influence_of(t: f64) -> Influence {
    let t2 = t * t;
    let t3 = t2 * t;
    let w1 = 3.0 * t3 - 6.0 * t2 + 3.0 * t;
    let w2 = -3.0 * t3 + 3.0 * t2;
    if w1 > w2 {
        Influence::P1
    } else if w2 > w1 {
        Influence::P2
    } else {
        Influence::Both
    }
}

/// Clamps `resolution` into `(0, 1]`.
///
/// Zero, negative and NaN resolutions fall back to `1.0`, a single step over
/// the whole curve.
#[must_use]
pub fn effective_resolution(resolution: f64) -> f64 {
    if resolution > 0.0 {
        resolution.min(1.0)
    } else {
        1.0
    }
}

/// Number of sampling steps for `resolution`: `ceil(1 / resolution)`.
///
/// Sampling visits `sample_count(resolution) + 1` parameters including both ends.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sample_count(resolution: f64) -> usize {
    (1.0 / effective_resolution(resolution)).ceil() as usize
}

/// Iterates `t = i * resolution` for `i = 0..=ceil(1 / resolution)`, clamped to `1.0`.
#[allow(clippy::cast_precision_loss)]
pub fn sample_parameters(resolution: f64) -> impl Iterator<Item = f64> {
    let step = effective_resolution(resolution);
    (0..=sample_count(step)).map(move |i| (i as f64 * step).min(1.0))
}

/// A 2D cubic Bezier curve defined by a start point, two control points and an end point.
///
/// `P(t) = (1 - t)³ start + 3 (1 - t)² t ctrl1 + 3 (1 - t) t² ctrl2 + t³ end`
///
/// The start and end are the fixed main points; only the control points are
/// ever relocated by the planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    start: Point2,
    ctrl1: Point2,
    ctrl2: Point2,
    end: Point2,
}

impl CubicBezier {
    /// Creates a curve from its four defining points.
    #[must_use]
    pub fn new(start: Point2, ctrl1: Point2, ctrl2: Point2, end: Point2) -> Self {
        Self {
            start,
            ctrl1,
            ctrl2,
            end,
        }
    }

    /// Creates the straight-line curve between `start` and `end`.
    ///
    /// Each control point sits halfway between its main point and the midpoint
    /// of the two main points.
    #[must_use]
    pub fn straight(start: Point2, end: Point2) -> Self {
        let mid = midpoint_2d(&start, &end);
        Self {
            start,
            ctrl1: midpoint_2d(&start, &mid),
            ctrl2: midpoint_2d(&mid, &end),
            end,
        }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.start
    }

    /// Returns the first control point.
    #[must_use]
    pub fn ctrl1(&self) -> Point2 {
        self.ctrl1
    }

    /// Returns the second control point.
    #[must_use]
    pub fn ctrl2(&self) -> Point2 {
        self.ctrl2
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Returns `[start, ctrl1, ctrl2, end]`.
    #[must_use]
    pub fn points(&self) -> [Point2; 4] {
        [self.start, self.ctrl1, self.ctrl2, self.end]
    }

    /// Returns the position of a control point.
    #[must_use]
    pub fn control(&self, which: ControlPoint) -> Point2 {
        match which {
            ControlPoint::P1 => self.ctrl1,
            ControlPoint::P2 => self.ctrl2,
        }
    }

    /// Returns the main point adjacent to a control point.
    #[must_use]
    pub fn anchor(&self, which: ControlPoint) -> Point2 {
        match which {
            ControlPoint::P1 => self.start,
            ControlPoint::P2 => self.end,
        }
    }

    /// Returns a copy of this curve with one control point relocated.
    #[must_use]
    pub fn with_control(&self, which: ControlPoint, position: Point2) -> Self {
        let mut copy = *self;
        copy.set_control(which, position);
        copy
    }

    /// Relocates one control point in place.
    pub fn set_control(&mut self, which: ControlPoint, position: Point2) {
        match which {
            ControlPoint::P1 => self.ctrl1 = position,
            ControlPoint::P2 => self.ctrl2 = position,
        }
    }

    /// Returns whether the two main points coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        distance_2d(&self.start, &self.end) < crate::math::TOLERANCE
    }

    /// Evaluates the curve at `t` with the De Casteljau algorithm.
    ///
    /// Parameters outside `[0, 1]` extrapolate.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> Point2 {
        let ab = self.start + (self.ctrl1 - self.start) * t;
        let bc = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let cd = self.ctrl2 + (self.end - self.ctrl2) * t;
        let abc = ab + (bc - ab) * t;
        let bcd = bc + (cd - bc) * t;
        abc + (bcd - abc) * t
    }

    /// Tangent vector at `t` (not normalized).
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector2 {
        let one_t = 1.0 - t;
        (self.ctrl1 - self.start) * (3.0 * one_t * one_t)
            + (self.ctrl2 - self.ctrl1) * (6.0 * one_t * t)
            + (self.end - self.ctrl2) * (3.0 * t * t)
    }

    /// Second derivative at `t`.
    #[must_use]
    pub fn second_derivative(&self, t: f64) -> Vector2 {
        let first = self.ctrl2.coords - self.ctrl1.coords * 2.0 + self.start.coords;
        let second = self.end.coords - self.ctrl2.coords * 2.0 + self.ctrl1.coords;
        first * (6.0 * (1.0 - t)) + second * (6.0 * t)
    }

    /// Approximates the arc length by summing chords between samples spaced `resolution` apart.
    ///
    /// A curve whose main points coincide has zero length.
    #[must_use]
    pub fn arc_length(&self, resolution: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let mut length = 0.0;
        let mut prev = self.start;
        for t in sample_parameters(resolution).skip(1) {
            let current = self.evaluate(t);
            length += distance_2d(&prev, &current);
            prev = current;
        }
        length
    }

    /// Distance between the second derivatives at both ends.
    ///
    /// Large values mean the curve bends sharply near one of its ends.
    #[must_use]
    pub fn curvature_penalty(&self) -> f64 {
        (self.second_derivative(0.0) - self.second_derivative(1.0)).norm()
    }
}
