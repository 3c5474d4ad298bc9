//! Errors from reading and writing STL parts.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL reading and writing.
pub type IoResult<T> = Result<T, IoError>;

/// Problems reading, writing or decoding STL data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IoError {
    /// STL file does not exist.
    #[error("STL file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// ASCII STL that does not follow the facet grammar.
    #[error("malformed ASCII STL: {message}")]
    InvalidContent {
        /// What was wrong.
        message: String,
    },

    /// Binary STL shorter than its header.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual data size.
        got: usize,
    },

    /// Binary STL ends before the declared triangles.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Triangle count from the header.
        expected: u32,
        /// Complete triangles present.
        got: u32,
    },

    /// Mesh has more triangles than a binary STL can count.
    #[error("{count} triangles exceed the binary STL limit")]
    TooManyTriangles {
        /// Triangle count of the mesh.
        count: usize,
    },

    /// Filesystem failure.
    #[error("STL I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Vertex coordinate that is not a number.
    #[error("bad coordinate in ASCII STL: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl IoError {
    /// Malformed-content error.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
