//! Error types for design validation and export.

use glyph_centerline::FontError;
use mesh_extrude::ExtrudeError;
use mesh_from_curves::SweepError;
use mesh_io::IoError;
use mesh_revolve::RevolveError;
use raster_trace::TraceError;
use thiserror::Error;

/// Result type for design operations.
pub type DesignResult<T> = Result<T, DesignError>;

/// Errors raised while validating, generating or exporting a design.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DesignError {
    /// Tube section rejected.
    #[error("tube: {0}")]
    Sweep(#[from] SweepError),

    /// Lathe, thread, reflector or cup rejected.
    #[error("revolve: {0}")]
    Revolve(#[from] RevolveError),

    /// Plate or housing rejected.
    #[error("extrude: {0}")]
    Extrude(#[from] ExtrudeError),

    /// Font could not be loaded.
    #[error(transparent)]
    Font(#[from] FontError),

    /// Raster buffer or trace settings rejected.
    #[error("trace: {0}")]
    Trace(#[from] TraceError),

    /// Writing parts failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Design record could not be parsed.
    #[error("invalid design JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A design field is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParam {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Text field is empty or whitespace.
    #[error("{design} needs non-empty text")]
    EmptyText {
        /// Design kind.
        design: &'static str,
    },

    /// Inputs were valid but produced nothing printable.
    #[error("{design} produced no geometry")]
    NoGeometry {
        /// Design kind.
        design: &'static str,
    },
}

/// Require `value > 0` (and finite).
pub(crate) fn positive(name: &'static str, value: f64) -> DesignResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DesignError::InvalidParam { name, value })
    }
}

/// Require non-blank text.
pub(crate) fn non_empty(design: &'static str, text: &str) -> DesignResult<()> {
    if text.trim().is_empty() {
        Err(DesignError::EmptyText { design })
    } else {
        Ok(())
    }
}
