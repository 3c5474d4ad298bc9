//! Tube section shared by the stroke-following designs.

use mesh_from_curves::{SweepSpec, TUBE_BOTTOM, TUBE_PART, TUBE_TOP, sweep_halves, sweep_tube};
use mesh_types::{IndexedMesh, Mesh};
use nalgebra::Point3;
use path_types::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DesignResult;

/// Cross-section swept along every stroke, in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeSection {
    /// Outer tube diameter.
    pub diameter: f64,
    /// Wall left around the bore, or `None` for a solid tube.
    pub wall_thickness: Option<f64>,
    /// Vertices per ring.
    pub segments: usize,
    /// Cut into top and bottom halves for printing.
    pub split: bool,
}

impl Default for TubeSection {
    fn default() -> Self {
        Self {
            diameter: 12.0,
            wall_thickness: Some(1.2),
            segments: 24,
            split: true,
        }
    }
}

impl TubeSection {
    /// Sweep spec for one centerline.
    #[must_use]
    pub fn spec(&self, points: Vec<Point3<f64>>, closed: bool) -> SweepSpec {
        let radius = self.diameter / 2.0;
        let mut spec = SweepSpec::new(points, radius).with_segments(self.segments);
        if let Some(wall) = self.wall_thickness {
            spec = spec.with_inner_radius(radius - wall);
        }
        if self.split {
            spec = spec.split_half();
        }
        if closed {
            spec = spec.closed_loop();
        }
        spec
    }

    /// Check the section on a unit segment.
    ///
    /// # Errors
    ///
    /// [`crate::DesignError::Sweep`] for a non-positive diameter, a wall that
    /// leaves no bore, or too few segments.
    pub fn validate(&self) -> DesignResult<()> {
        let probe = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        self.spec(probe, false).validate()?;
        Ok(())
    }

    /// Sweep every path (lying in the z = 0 plane) and merge the results
    /// into named parts: `tube_top` and `tube_bottom` when split, otherwise
    /// `tube`.
    ///
    /// Paths too short to sweep are skipped.
    #[must_use]
    pub fn sweep_paths<'a>(&self, paths: impl IntoIterator<Item = &'a Path>) -> Vec<Mesh> {
        let mut top = IndexedMesh::new();
        let mut bottom = IndexedMesh::new();
        let mut swept = 0usize;
        let mut skipped = 0usize;

        for path in paths {
            let spec = self.spec(path.to_3d(0.0), path.closed);
            if let Err(err) = spec.validate() {
                debug!(%err, points = path.len(), "Skipping stroke");
                skipped += 1;
                continue;
            }
            if self.split {
                let halves = sweep_halves(&spec);
                top.merge(&halves.top);
                bottom.merge(&halves.bottom);
            } else {
                top.merge(&sweep_tube(&spec));
            }
            swept += 1;
        }

        info!(
            swept,
            skipped,
            faces = top.faces.len() + bottom.faces.len(),
            "Swept strokes"
        );
        if self.split {
            vec![
                Mesh::from_indexed(TUBE_TOP, &top),
                Mesh::from_indexed(TUBE_BOTTOM, &bottom),
            ]
        } else {
            vec![Mesh::from_indexed(TUBE_PART, &top)]
        }
    }
}
