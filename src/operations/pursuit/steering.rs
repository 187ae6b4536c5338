use tracing::trace;

use crate::geometry::{effective_resolution, sample_count, CubicBezier};
use crate::math::point_2d::normalize_or_zero;
use crate::math::{Point2, Vector2, TOLERANCE};

/// Residual and derivative magnitude below which Newton's method stops.
const NEWTON_EPSILON: f64 = 1e-6;

/// Finds the parameter where `spline` crosses the circle of radius `lookahead`
/// around `agent`.
///
/// Newton's method on `F(t) = |B(t) - agent|² - lookahead²`, starting at
/// `t = 0.5` and clamping every step to `[0, 1]`. Iteration stops once a step
/// moves less than `resolution`, the residual or its derivative vanishes, or
/// after `ceil(1 / resolution)` steps. The last estimate is returned in every
/// case; when the circle misses the curve this is the closest approach Newton
/// settled on. Resolutions outside `(0, 1]` are clamped with
/// [`effective_resolution`].
#[must_use]
pub fn waypoint_parameter(
    spline: &CubicBezier,
    agent: &Point2,
    lookahead: f64,
    resolution: f64,
) -> f64 {
    let resolution = effective_resolution(resolution);
    let radius_sq = lookahead * lookahead;
    let mut t: f64 = 0.5;

    for _ in 0..sample_count(resolution) {
        let offset = spline.evaluate(t) - agent;
        let f = offset.norm_squared() - radius_sq;
        if f.abs() < NEWTON_EPSILON {
            break;
        }
        let df = 2.0 * offset.dot(&spline.derivative(t));
        if df.abs() < NEWTON_EPSILON {
            trace!(t, f, "flat residual, keeping estimate");
            break;
        }
        let next = (t - f / df).clamp(0.0, 1.0);
        let step = (next - t).abs();
        t = next;
        if step < resolution {
            break;
        }
    }
    t
}

/// Computes the unit direction an agent at `agent` should move in to follow
/// `spline`.
///
/// The curve tangent at the lookahead crossing is blended two to one with the
/// direction from the agent to a target point slightly behind that crossing.
/// Near the start of the curve the target parameter may drop below zero, in
/// which case the curve is extrapolated. Returns the zero vector only when
/// both directions vanish.
#[must_use]
pub fn steering_vector(
    spline: &CubicBezier,
    agent: &Point2,
    lookahead: f64,
    resolution: f64,
) -> Vector2 {
    let resolution = effective_resolution(resolution);
    let t = waypoint_parameter(spline, agent, lookahead, resolution);

    let length = spline.arc_length(resolution);
    let t_target = if length < TOLERANCE {
        t
    } else {
        t - lookahead * resolution / length
    };

    let move_dir = normalize_or_zero(&(spline.evaluate(t_target) - agent));
    let path_dir = normalize_or_zero(&spline.derivative(t));
    normalize_or_zero(&(path_dir * 2.0 + move_dir))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::math::point_2d::distance_2d;

    fn along_x() -> CubicBezier {
        CubicBezier::straight(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
    }

    #[test]
    fn waypoint_lies_on_the_lookahead_circle() {
        let spline = along_x();
        let agent = Point2::new(2.0, 0.0);
        let t = waypoint_parameter(&spline, &agent, 1.0, 0.001);
        let hit = spline.evaluate(t);
        assert_relative_eq!(distance_2d(&hit, &agent), 1.0, epsilon = 1e-3);
        // Newton starts at the middle, so it lands on the crossing ahead.
        assert!(hit.x > agent.x);
    }

    #[test]
    fn waypoint_stays_in_unit_interval() {
        let spline = along_x();
        // The circle lies beyond the end of the curve.
        let t = waypoint_parameter(&spline, &Point2::new(30.0, 0.0), 1.0, 0.01);
        assert!((0.0..=1.0).contains(&t));
    }

    #[test]
    fn on_a_straight_path_steering_follows_it() {
        let spline = along_x();
        let v = steering_vector(&spline, &Point2::new(2.0, 0.0), 1.0, 0.001);
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn off_path_steering_pulls_back_toward_it() {
        let spline = along_x();
        let v = steering_vector(&spline, &Point2::new(2.0, 1.0), 2.0, 0.001);
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-9);
        assert!(v.x > 0.0);
        assert!(v.y < 0.0);
    }

    #[test]
    fn collapsed_curve_steers_straight_at_it() {
        let p = Point2::new(3.0, 4.0);
        let spline = CubicBezier::new(p, p, p, p);
        let t = waypoint_parameter(&spline, &Point2::origin(), 1.0, 0.01);
        assert_relative_eq!(t, 0.5);
        let v = steering_vector(&spline, &Point2::origin(), 1.0, 0.01);
        assert_relative_eq!(v.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(v.y, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn target_before_the_start_extrapolates() {
        // The agent sits behind the start, so the crossing is at t = 0 and the
        // target parameter goes negative.
        let spline = along_x();
        let agent = Point2::new(-1.0, 0.5);
        let t = waypoint_parameter(&spline, &agent, 0.1, 0.01);
        assert_relative_eq!(t, 0.0);
        let v = steering_vector(&spline, &agent, 0.1, 0.01);
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-9);
        assert!(v.x > 0.0 && v.y < 0.0);
    }

    #[test]
    fn unusable_resolution_still_returns_a_unit_vector() {
        let spline = along_x();
        let agent = Point2::new(2.0, 1.0);
        for resolution in [0.0, -1.0, f64::NAN] {
            let t = waypoint_parameter(&spline, &agent, 2.0, resolution);
            assert!((0.0..=1.0).contains(&t), "resolution={resolution}");
            let v = steering_vector(&spline, &agent, 2.0, resolution);
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-9);
        }
    }

    proptest! {
        #[test]
        fn steering_is_a_unit_vector(
            c1x in -5.0..15.0_f64, c1y in -8.0..8.0_f64,
            c2x in -5.0..15.0_f64, c2y in -8.0..8.0_f64,
            ax in -5.0..15.0_f64, ay in -8.0..8.0_f64,
            lookahead in 0.5..4.0_f64,
        ) {
            let spline = CubicBezier::new(
                Point2::new(0.0, 0.0),
                Point2::new(c1x, c1y),
                Point2::new(c2x, c2y),
                Point2::new(10.0, 0.0),
            );
            let agent = Point2::new(ax, ay);
            let t = waypoint_parameter(&spline, &agent, lookahead, 0.01);
            prop_assume!(spline.derivative(t).norm() > 1e-6);
            let v = steering_vector(&spline, &agent, lookahead, 0.01);
            prop_assert!((v.norm() - 1.0).abs() < 1e-9, "norm = {}", v.norm());
        }
    }
}
