//! Error types for sweep parameter validation.

use thiserror::Error;

/// Result type for sweep validation.
pub type SweepResult<T> = Result<T, SweepError>;

/// Problems found by [`crate::SweepSpec::validate`].
///
/// The sweep itself never fails; these are reported before generation so a
/// caller can reject a request instead of receiving an empty mesh.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Centerline has too few distinct points.
    #[error("centerline needs at least {min} distinct points, got {actual}")]
    TooFewPoints {
        /// Minimum required points.
        min: usize,
        /// Distinct point count.
        actual: usize,
    },

    /// Outer radius is zero, negative or not finite.
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// Inner radius does not fit inside the outer radius.
    #[error("inner radius {inner} must be positive and below outer radius {outer}")]
    InvalidInnerRadius {
        /// Requested inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
    },

    /// Segments count is too low.
    #[error("segments must be at least {min}, got {actual}")]
    TooFewSegments {
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },
}
