//! Channel-letter housings and their diffuser faces.

use mesh_types::IndexedMesh;
use nalgebra::Point2;
use path_types::{ContourPair, Path};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ExtrudeError, ExtrudeResult, positive};
use crate::extrude::{extrude_region, extrude_tray, wound};

/// Channel-letter housing dimensions, in mm.
///
/// A housing is an open tray following a glyph's outline: a floor, walls of
/// `wall_thickness` along every contour, and an opening on top that takes a
/// diffuser face of `diffuser_thickness`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LetterHousingParams {
    /// Overall height of the walls.
    pub depth: f64,
    /// Wall thickness.
    pub wall_thickness: f64,
    /// Floor thickness.
    pub floor_thickness: f64,
    /// Diffuser plate thickness.
    pub diffuser_thickness: f64,
    /// Gap between the diffuser edge and the walls.
    pub diffuser_clearance: f64,
}

impl Default for LetterHousingParams {
    fn default() -> Self {
        Self {
            depth: 25.0,
            wall_thickness: 2.0,
            floor_thickness: 2.0,
            diffuser_thickness: 1.5,
            diffuser_clearance: 0.2,
        }
    }
}

impl LetterHousingParams {
    /// Set the wall height.
    #[must_use]
    pub const fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Set the wall thickness.
    #[must_use]
    pub const fn with_wall_thickness(mut self, wall: f64) -> Self {
        self.wall_thickness = wall;
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive dimensions or a floor at least as
    /// tall as the housing.
    pub fn validate(&self) -> ExtrudeResult<()> {
        positive("depth", self.depth)?;
        positive("wall_thickness", self.wall_thickness)?;
        positive("floor_thickness", self.floor_thickness)?;
        positive("diffuser_thickness", self.diffuser_thickness)?;
        if self.diffuser_clearance.is_nan() || self.diffuser_clearance < 0.0 {
            return Err(ExtrudeError::NonPositive {
                name: "diffuser_clearance",
                value: self.diffuser_clearance,
            });
        }
        if self.floor_thickness >= self.depth {
            return Err(ExtrudeError::TooLarge {
                name: "floor_thickness",
                value: self.floor_thickness,
                limit: self.depth,
            });
        }
        Ok(())
    }
}

/// Outline CCW then holes CW, or `None` when the outer has under 3 points.
fn pair_loops(pair: &ContourPair) -> Option<Vec<Vec<Point2<f64>>>> {
    if pair.outer.len() < 3 {
        return None;
    }
    let mut loops = vec![wound(&pair.outer.points, true)];
    loops.extend(
        pair.inners
            .iter()
            .filter(|inner| inner.len() >= 3)
            .map(|inner| wound(&inner.points, false)),
    );
    Some(loops)
}

/// Move the outline of `loops` inward and its holes outward by `distance`.
///
/// Point order is kept, so each moved loop stays index-aligned with its
/// source.
fn shrink(loops: &[Vec<Point2<f64>>], distance: f64) -> Vec<Vec<Point2<f64>>> {
    loops
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let d = if i == 0 { distance } else { -distance };
            Path::new(l.clone(), true).offset_inward(d).points
        })
        .collect()
}

/// Build the housing for a set of glyph contours.
///
/// Each contour pair becomes one closed tray; the walls stand on the outline
/// and every counter, with their inner faces at the outline moved by
/// `wall_thickness` along averaged vertex normals. Contours with fewer than
/// 3 points are skipped.
#[must_use]
pub fn letter_housing(contours: &[ContourPair], params: &LetterHousingParams) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    if let Err(err) = params.validate() {
        warn!(%err, "Letter housing parameters cannot be built");
        return mesh;
    }

    for (index, pair) in contours.iter().enumerate() {
        let Some(loops) = pair_loops(pair) else {
            warn!(index, points = pair.outer.len(), "Skipping degenerate contour");
            continue;
        };
        let inner = shrink(&loops, params.wall_thickness);
        let tray = extrude_tray(&loops, &inner, params.floor_thickness, params.depth);
        debug!(index, loops = loops.len(), faces = tray.faces.len(), "Built letter tray");
        mesh.merge(&tray);
    }

    info!(
        contours = contours.len(),
        depth = params.depth,
        faces = mesh.faces.len(),
        "Generated letter housing"
    );
    mesh
}

/// Build the diffuser faces that sit in the housing openings.
///
/// The outline shrinks by `wall_thickness + diffuser_clearance` and each
/// counter grows by the same, then the region is extruded from `z = 0` to
/// `diffuser_thickness`.
#[must_use]
pub fn diffuser_face(contours: &[ContourPair], params: &LetterHousingParams) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    if let Err(err) = params.validate() {
        warn!(%err, "Diffuser parameters cannot be built");
        return mesh;
    }

    let inset = params.wall_thickness + params.diffuser_clearance;
    for pair in contours {
        let Some(loops) = pair_loops(pair) else {
            continue;
        };
        let moved = shrink(&loops, inset);
        if let Some((outer, holes)) = moved.split_first() {
            mesh.merge(&extrude_region(outer, holes, 0.0, params.diffuser_thickness));
        }
    }

    info!(
        contours = contours.len(),
        thickness = params.diffuser_thickness,
        faces = mesh.faces.len(),
        "Generated diffuser face"
    );
    mesh
}
