//! Neon-style tubes traced from a drawing.

use mesh_types::Mesh;
use raster_trace::{GrayImage, TraceParams, trace_image};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::DesignContext;
use crate::design::Design;
use crate::error::{DesignError, DesignResult};
use crate::tube::TubeSection;

/// A grayscale drawing whose strokes become tubes.
///
/// `pixels` holds `width × height` bytes in row-major order, top row first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTrace {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Grayscale samples.
    pub pixels: Vec<u8>,
    /// Tracing settings; `pixel_size` maps pixels to mm.
    pub trace: TraceParams,
    /// Tube cross-section.
    pub tube: TubeSection,
}

impl Default for ImageTrace {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            trace: TraceParams::default().with_pixel_size(0.5),
            tube: TubeSection {
                diameter: 6.0,
                wall_thickness: Some(1.0),
                ..TubeSection::default()
            },
        }
    }
}

impl ImageTrace {
    /// Trace the given grayscale buffer.
    #[must_use]
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
            ..Self::default()
        }
    }

    /// Set the tracing settings.
    #[must_use]
    pub fn with_trace(mut self, trace: TraceParams) -> Self {
        self.trace = trace;
        self
    }

    /// Set the tube section.
    #[must_use]
    pub fn with_tube(mut self, tube: TubeSection) -> Self {
        self.tube = tube;
        self
    }

    fn image(&self) -> DesignResult<GrayImage> {
        Ok(GrayImage::new(self.width, self.height, self.pixels.clone())?)
    }
}

impl Design for ImageTrace {
    fn kind(&self) -> &'static str {
        "image_trace"
    }

    fn validate(&self) -> DesignResult<()> {
        self.image()?;
        self.trace.validate()?;
        self.tube.validate()
    }

    fn build(&self, _ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        let paths = trace_image(&self.image()?, &self.trace);
        info!(
            width = self.width,
            height = self.height,
            paths = paths.len(),
            "Traced drawing"
        );
        if paths.is_empty() {
            return Err(DesignError::NoGeometry { design: self.kind() });
        }
        let parts = self.tube.sweep_paths(&paths);
        if parts.iter().all(Mesh::is_empty) {
            return Err(DesignError::NoGeometry { design: self.kind() });
        }
        Ok(parts)
    }
}
