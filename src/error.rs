use thiserror::Error;

/// Top-level error type for the navigator.
#[derive(Debug, Error)]
pub enum BeznavError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while validating planner or follower parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Checks that `value` lies in `[min, max]`, returning an out-of-range error otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParameterOutOfRange` if `value` is outside the range or NaN.
    pub(crate) fn check_range(
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> std::result::Result<(), Self> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::ParameterOutOfRange {
                parameter,
                value,
                min,
                max,
            })
        }
    }

    /// Checks that `value` lies in `(0, max]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParameterOutOfRange` if `value` is not positive,
    /// exceeds `max`, or is NaN.
    pub(crate) fn check_positive(
        parameter: &'static str,
        value: f64,
        max: f64,
    ) -> std::result::Result<(), Self> {
        if value > 0.0 && value <= max {
            Ok(())
        } else {
            Err(Self::ParameterOutOfRange {
                parameter,
                value,
                min: 0.0,
                max,
            })
        }
    }
}

/// Convenience type alias for results using [`BeznavError`].
pub type Result<T> = std::result::Result<T, BeznavError>;
