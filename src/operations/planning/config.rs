use crate::error::{ConfigError, Result};

use super::SearchStrategy;

/// Search radius below which the optimizer stops shrinking and gives up.
pub const MIN_SEARCH_RADIUS: f64 = 1e-2;

/// Parameters of a planning request.
///
/// The values are fixed for the whole run. Defaults suit obstacles measured
/// in units of roughly one to ten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Parameter step used to sample the curve, in `(0, 1]`.
    pub resolution: f64,
    /// Half of the curve's width; the curve is offset by this along both normals.
    pub half_width: f64,
    /// Initial radius of the candidate circle around the focused control point.
    pub search_radius: f64,
    /// Factor applied to the search radius after each pass over both control points.
    pub radius_decay: f64,
    /// Number of candidates evenly spaced on the search circle.
    pub candidates: usize,
    /// Maximum number of search iterations.
    pub max_iterations: usize,
    /// Consecutive iterations with an unchanged collision count before stalling.
    pub stagnation_limit: usize,
    /// How candidate positions are generated.
    pub strategy: SearchStrategy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            resolution: 0.01,
            half_width: 0.5,
            search_radius: 1.0,
            radius_decay: 0.9,
            candidates: 16,
            max_iterations: 500,
            stagnation_limit: 40,
            strategy: SearchStrategy::Circle,
        }
    }
}

impl PlannerConfig {
    /// Checks every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParameterOutOfRange` for the first parameter outside
    /// its range, or `ConfigError::Invalid` for an unusable count or grid.
    pub fn validate(&self) -> Result<()> {
        ConfigError::check_positive("resolution", self.resolution, 1.0)?;
        ConfigError::check_range("half_width", self.half_width, 0.0, f64::MAX)?;
        ConfigError::check_positive("search_radius", self.search_radius, f64::MAX)?;
        if !(self.radius_decay > 0.0 && self.radius_decay < 1.0) {
            return Err(ConfigError::ParameterOutOfRange {
                parameter: "radius_decay",
                value: self.radius_decay,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        if self.candidates == 0 {
            return Err(ConfigError::Invalid("candidates must be at least 1".to_owned()).into());
        }
        if self.stagnation_limit == 0 {
            return Err(
                ConfigError::Invalid("stagnation_limit must be at least 1".to_owned()).into(),
            );
        }
        self.strategy.validate()
    }
}
