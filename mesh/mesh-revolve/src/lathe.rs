//! Hollow lathed shells (bulb covers, diffuser domes).

use mesh_types::IndexedMesh;
use tracing::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RevolveError, RevolveResult, at_least, positive};
use crate::meridian::{RADIUS_EPSILON, Ring, revolve};
use crate::profile::{BulbShape, Profile};

/// Dimensions of a lathed shell.
///
/// # Example
///
/// ```
/// use mesh_revolve::{BulbShape, LatheParams, lathe_shell};
///
/// let params = LatheParams::bulb(110.0, 60.0).with_wall_thickness(1.2);
/// params.validate().unwrap();
///
/// let shell = lathe_shell(&BulbShape::Pear, &params);
/// assert!(shell.edge_report().is_closed());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatheParams {
    /// Overall height in mm.
    pub height: f64,
    /// Largest outer diameter in mm.
    pub max_diameter: f64,
    /// Shell wall thickness in mm.
    pub wall_thickness: f64,
    /// Vertices per ring.
    pub segments: usize,
    /// Number of height steps between the rim and the tip.
    pub height_rings: usize,
}

impl Default for LatheParams {
    fn default() -> Self {
        Self {
            height: 110.0,
            max_diameter: 60.0,
            wall_thickness: 1.6,
            segments: 64,
            height_rings: 48,
        }
    }
}

impl LatheParams {
    /// Bulb-sized shell.
    #[must_use]
    pub fn bulb(height: f64, max_diameter: f64) -> Self {
        Self {
            height,
            max_diameter,
            ..Self::default()
        }
    }

    /// Low dome for a diffuser cap.
    #[must_use]
    pub fn diffuser(diameter: f64, height: f64) -> Self {
        Self {
            height,
            max_diameter: diameter,
            wall_thickness: 1.2,
            height_rings: 24,
            ..Self::default()
        }
    }

    /// Set the wall thickness.
    #[must_use]
    pub const fn with_wall_thickness(mut self, wall: f64) -> Self {
        self.wall_thickness = wall;
        self
    }

    /// Set the angular segment count.
    #[must_use]
    pub const fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Set the number of height steps.
    #[must_use]
    pub const fn with_height_rings(mut self, rings: usize) -> Self {
        self.height_rings = rings;
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive dimensions, a wall at least as thick
    /// as the radius (or half the height), or too few rings.
    pub fn validate(&self) -> RevolveResult<()> {
        positive("height", self.height)?;
        positive("max_diameter", self.max_diameter)?;
        positive("wall_thickness", self.wall_thickness)?;
        let radius = self.max_diameter / 2.0;
        if self.wall_thickness >= radius || 2.0 * self.wall_thickness >= self.height {
            return Err(RevolveError::WallTooThick {
                wall: self.wall_thickness,
                radius,
            });
        }
        at_least("segments", self.segments, 3)?;
        at_least("height_rings", self.height_rings, 2)?;
        Ok(())
    }
}

/// Lathe a hollow shell, open at the bottom.
///
/// The outer surface follows `max_radius · profile(t)` and the inner one the
/// same curve less the wall, clamped at 0. Each surface ends at its first
/// ring too small to resolve, closed by a fan to an apex on the axis; the
/// inner apex stays at least one wall thickness below the outer one. A flat
/// ring joins the two surfaces at the open rim.
#[must_use]
pub fn lathe_shell(profile: &impl Profile, params: &LatheParams) -> IndexedMesh {
    if !(params.height > 0.0 && params.max_diameter > 0.0 && params.wall_thickness > 0.0) {
        warn!(profile = profile.name(), "Lathe dimensions are not positive");
        return IndexedMesh::new();
    }

    let radius = params.max_diameter / 2.0;
    let wall = params.wall_thickness;
    let steps = params.height_rings.max(2);

    #[allow(clippy::cast_precision_loss)]
    // Precision: ring counts are small
    let stations: Vec<(f64, f64)> = (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            (t * params.height, radius * profile.radius_at(t))
        })
        .collect();

    // Outer surface, up to the first degenerate ring
    let mut meridian: Vec<Ring> = Vec::with_capacity(2 * stations.len() + 2);
    let mut outer_top = params.height;
    for &(z, r) in &stations {
        if r < RADIUS_EPSILON {
            outer_top = z;
            break;
        }
        meridian.push(Ring::Circle { radius: r, z });
    }
    meridian.push(Ring::Apex { z: outer_top });

    // Inner surface, down from its apex
    let inner_limit = outer_top - wall;
    let inner_count = stations
        .iter()
        .take_while(|&&(z, r)| z < inner_limit && r - wall >= RADIUS_EPSILON)
        .count();
    let inner_top = stations
        .get(inner_count)
        .map_or(inner_limit, |&(z, _)| z.min(inner_limit));
    meridian.push(Ring::Apex { z: inner_top });
    meridian.extend(
        stations[..inner_count]
            .iter()
            .rev()
            .map(|&(z, r)| Ring::Circle { radius: r - wall, z }),
    );

    let mesh = revolve(&meridian, params.segments.max(3));
    info!(
        profile = profile.name(),
        height = params.height,
        max_diameter = params.max_diameter,
        faces = mesh.faces.len(),
        "Lathed shell"
    );
    mesh
}

/// Dome-shaped diffuser cap.
#[must_use]
pub fn diffuser_cap(params: &LatheParams) -> IndexedMesh {
    lathe_shell(&BulbShape::Dome, params)
}
