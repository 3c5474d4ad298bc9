//! Error types for raster input.

use thiserror::Error;

/// Result type for raster construction.
pub type TraceResult<T> = Result<T, TraceError>;

/// Errors raised when building a raster from raw bytes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TraceError {
    /// Buffer length does not match the declared dimensions.
    #[error("{width}x{height} image with {channels} channel(s) needs {expected} bytes, got {actual}")]
    BufferSize {
        /// Declared width in pixels.
        width: usize,
        /// Declared height in pixels.
        height: usize,
        /// Bytes per pixel.
        channels: usize,
        /// Required buffer length.
        expected: usize,
        /// Provided buffer length.
        actual: usize,
    },

    /// Width or height is zero.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage {
        /// Declared width in pixels.
        width: usize,
        /// Declared height in pixels.
        height: usize,
    },

    /// A tracing parameter is out of range.
    #[error("{name} is out of range: {value}")]
    InvalidParam {
        /// Parameter name.
        name: &'static str,
        /// The provided value.
        value: f64,
    },
}

pub(crate) fn check_len(
    width: usize,
    height: usize,
    channels: usize,
    actual: usize,
) -> TraceResult<()> {
    if width == 0 || height == 0 {
        return Err(TraceError::EmptyImage { width, height });
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .unwrap_or(usize::MAX);
    if expected != actual {
        return Err(TraceError::BufferSize {
            width,
            height,
            channels,
            expected,
            actual,
        });
    }
    Ok(())
}
