use crate::error::{ConfigError, Result};
use crate::geometry::CubicBezier;
use crate::math::{Point2, Vector2};

use super::steering::steering_vector;

/// Parameters of a pure-pursuit follower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerConfig {
    lookahead: f64,
    resolution: f64,
}

impl FollowerConfig {
    /// Creates a follower configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParameterOutOfRange` if `lookahead` is not positive
    /// or `resolution` is outside `(0, 1]`.
    pub fn new(lookahead: f64, resolution: f64) -> Result<Self> {
        ConfigError::check_positive("lookahead", lookahead, f64::MAX)?;
        ConfigError::check_positive("resolution", resolution, 1.0)?;
        Ok(Self {
            lookahead,
            resolution,
        })
    }

    /// Radius of the lookahead circle around the agent.
    #[must_use]
    pub fn lookahead(&self) -> f64 {
        self.lookahead
    }

    /// Parameter step used for sampling and Newton convergence.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }
}

/// Steers an agent along a finished curve.
///
/// Holds no state between calls besides the curve and its parameters, so one
/// follower can serve any number of agents.
#[derive(Debug, Clone, Copy)]
pub struct PursuitFollower<'a> {
    spline: &'a CubicBezier,
    config: FollowerConfig,
}

impl<'a> PursuitFollower<'a> {
    /// Creates a follower for `spline`.
    #[must_use]
    pub fn new(spline: &'a CubicBezier, config: FollowerConfig) -> Self {
        Self { spline, config }
    }

    /// The curve being followed.
    #[must_use]
    pub fn spline(&self) -> &CubicBezier {
        self.spline
    }

    /// The follower parameters.
    #[must_use]
    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    /// Unit direction for an agent at `agent`. See [`steering_vector`].
    #[must_use]
    pub fn steering_vector(&self, agent: &Point2) -> Vector2 {
        steering_vector(
            self.spline,
            agent,
            self.config.lookahead,
            self.config.resolution,
        )
    }

    /// The point one unit along the steering direction.
    ///
    /// Callers moving at a different speed scale the steering vector instead.
    #[must_use]
    pub fn target(&self, agent: &Point2) -> Point2 {
        agent + self.steering_vector(agent)
    }
}
