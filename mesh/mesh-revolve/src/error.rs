//! Error types for revolve parameter validation.

use thiserror::Error;

/// Result type for revolve validation.
pub type RevolveResult<T> = Result<T, RevolveError>;

/// Problems found by the `validate()` methods of the revolve parameters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RevolveError {
    /// A length that must be positive is not.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// The provided value.
        value: f64,
    },

    /// Wall is too thick for the radius it hollows.
    #[error("wall thickness {wall} leaves no cavity inside radius {radius}")]
    WallTooThick {
        /// Wall thickness.
        wall: f64,
        /// Radius the wall is subtracted from.
        radius: f64,
    },

    /// Angular or height resolution is too low.
    #[error("{name} must be at least {min}, got {actual}")]
    TooFewSteps {
        /// Parameter name.
        name: &'static str,
        /// Minimum allowed.
        min: usize,
        /// Provided value.
        actual: usize,
    },

    /// Thread minor diameter is not below the major diameter.
    #[error("thread minor diameter {minor} must be below major diameter {major}")]
    ThreadDiameters {
        /// Major (crest) diameter.
        major: f64,
        /// Minor (root) diameter.
        minor: f64,
    },

    /// Thread height does not fit one full turn.
    #[error("thread height {height} is shorter than one pitch {pitch}")]
    PitchTooLarge {
        /// Thread pitch.
        pitch: f64,
        /// Threaded height.
        height: f64,
    },

    /// A hole does not fit inside the bore around it.
    #[error("hole radius {hole} must be below bore radius {bore}")]
    HoleTooLarge {
        /// Hole radius.
        hole: f64,
        /// Bore radius.
        bore: f64,
    },

    /// Floor is as tall as the part.
    #[error("floor thickness {floor} must be below height {height}")]
    FloorTooThick {
        /// Floor thickness.
        floor: f64,
        /// Part height.
        height: f64,
    },

    /// Beam angle outside (0, 180) degrees.
    #[error("beam angle must be between 0 and 180 degrees, got {0}")]
    BeamAngle(f64),

    /// Unrecognized bulb shape tag.
    #[error("unknown bulb shape: {0}")]
    UnknownShape(String),
}

/// Require `value > 0` (and finite).
pub(crate) fn positive(name: &'static str, value: f64) -> RevolveResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RevolveError::NonPositive { name, value })
    }
}

/// Require `actual >= min`.
pub(crate) fn at_least(name: &'static str, actual: usize, min: usize) -> RevolveResult<()> {
    if actual >= min {
        Ok(())
    } else {
        Err(RevolveError::TooFewSteps { name, min, actual })
    }
}
