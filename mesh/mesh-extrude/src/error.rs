//! Error types for plate and housing validation.

use thiserror::Error;

/// Result type for extrusion validation.
pub type ExtrudeResult<T> = Result<T, ExtrudeError>;

/// Problems found by the `validate()` methods of the extrusion parameters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtrudeError {
    /// A length that must be positive is not.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// The provided value.
        value: f64,
    },

    /// Outline has too few points.
    #[error("outline needs at least {min} points, got {actual}")]
    TooFewPoints {
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },

    /// Too few segments to approximate a circle.
    #[error("{name} needs at least {min} segments, got {actual}")]
    TooFewSegments {
        /// Parameter name.
        name: &'static str,
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },

    /// Custom outline is not convex.
    #[error("custom outline must be convex (turns the wrong way at vertex {index})")]
    NonConvexOutline {
        /// First offending vertex.
        index: usize,
    },

    /// Hang hole does not fit inside the outline.
    #[error("hang hole of radius {radius} needs {needed} mm of clearance, outline leaves {available}")]
    HoleOutsideOutline {
        /// Hole radius.
        radius: f64,
        /// Clearance required from hole center to every edge.
        needed: f64,
        /// Smallest distance from hole center to an edge.
        available: f64,
    },

    /// Housing wall is too thick for its depth or floor.
    #[error("{name} ({value}) must be below {limit}")]
    TooLarge {
        /// Parameter name.
        name: &'static str,
        /// The provided value.
        value: f64,
        /// Exclusive upper bound.
        limit: f64,
    },
}

/// Require `value > 0` (and finite).
pub(crate) fn positive(name: &'static str, value: f64) -> ExtrudeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ExtrudeError::NonPositive { name, value })
    }
}
