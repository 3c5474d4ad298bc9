//! Font loading errors.

use std::time::Duration;

use thiserror::Error;

/// Result type for font loading.
pub type FontResult<T> = Result<T, FontError>;

/// Errors raised while loading font outlines.
///
/// Glyph-level problems (missing glyphs, empty outlines) are not errors:
/// they produce empty output and a `warn!` event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FontError {
    /// The source has no font with this identifier.
    #[error("font '{font_id}' is not available")]
    Unavailable {
        /// Requested identifier.
        font_id: String,
    },

    /// The loader did not finish in time.
    #[error("loading font '{font_id}' timed out after {timeout:?}")]
    Timeout {
        /// Requested identifier.
        font_id: String,
        /// Configured limit.
        timeout: Duration,
    },

    /// The loader failed (I/O or malformed data).
    #[error("failed to load font '{font_id}': {reason}")]
    LoaderFailed {
        /// Requested identifier.
        font_id: String,
        /// Underlying failure.
        reason: String,
    },
}

impl FontError {
    /// Identifier of the font that failed.
    #[must_use]
    pub fn font_id(&self) -> &str {
        match self {
            Self::Unavailable { font_id }
            | Self::Timeout { font_id, .. }
            | Self::LoaderFailed { font_id, .. } => font_id,
        }
    }
}
