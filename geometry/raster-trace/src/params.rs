//! Tracing parameters.

use crate::error::{TraceError, TraceResult};

/// What to extract from the binarized raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TraceMode {
    /// Thin to a skeleton and follow single-pixel strokes.
    #[default]
    Centerline,
    /// Follow the outer boundary of each connected component.
    Outline,
}

/// Parameters for [`trace_image`](crate::trace_image).
///
/// # Example
///
/// ```
/// use raster_trace::{TraceMode, TraceParams};
///
/// let params = TraceParams::default()
///     .with_threshold(100)
///     .with_invert(true)
///     .with_pixel_size(0.5);
/// assert_eq!(params.mode, TraceMode::Centerline);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TraceParams {
    /// Intensities strictly below this are foreground.
    pub threshold: u8,
    /// Treat light pixels as foreground instead.
    pub invert: bool,
    /// Cap on thinning rounds.
    pub max_iterations: usize,
    /// Chains with fewer pixels are discarded.
    pub min_path_points: usize,
    /// Douglas–Peucker tolerance, in pixels.
    pub simplify_tolerance: f64,
    /// Stroke centerlines or filled outlines.
    pub mode: TraceMode,
    /// Millimetres per pixel. When set, paths are scaled and flipped to
    /// y-up design space; otherwise they stay in pixel coordinates.
    pub pixel_size: Option<f64>,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            threshold: 128,
            invert: false,
            max_iterations: crate::thin::MAX_THINNING_ROUNDS,
            min_path_points: 5,
            simplify_tolerance: 1.0,
            mode: TraceMode::Centerline,
            pixel_size: None,
        }
    }
}

impl TraceParams {
    /// Outline tracing with the other settings at their defaults.
    #[must_use]
    pub fn outlines() -> Self {
        Self {
            mode: TraceMode::Outline,
            ..Self::default()
        }
    }

    /// Set the binarization threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set whether light pixels are foreground.
    #[must_use]
    pub const fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the minimum chain length.
    #[must_use]
    pub const fn with_min_path_points(mut self, points: usize) -> Self {
        self.min_path_points = points;
        self
    }

    /// Set the simplification tolerance.
    #[must_use]
    pub const fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    /// Place output in millimetres at `size` per pixel.
    #[must_use]
    pub const fn with_pixel_size(mut self, size: f64) -> Self {
        self.pixel_size = Some(size);
        self
    }

    /// Check the numeric fields.
    ///
    /// # Errors
    ///
    /// [`TraceError::InvalidParam`] naming the first field out of range.
    pub fn validate(&self) -> TraceResult<()> {
        let tolerance = self.simplify_tolerance;
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(TraceError::InvalidParam {
                name: "simplify_tolerance",
                value: tolerance,
            });
        }
        if let Some(size) = self.pixel_size {
            if size <= 0.0 || !size.is_finite() {
                return Err(TraceError::InvalidParam {
                    name: "pixel_size",
                    value: size,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_values() {
        assert!(TraceParams::outlines().validate().is_ok());
        assert!(matches!(
            TraceParams::default().with_pixel_size(0.0).validate(),
            Err(TraceError::InvalidParam {
                name: "pixel_size",
                ..
            })
        ));
        assert!(
            TraceParams::default()
                .with_simplify_tolerance(f64::NAN)
                .validate()
                .is_err()
        );
    }
}
