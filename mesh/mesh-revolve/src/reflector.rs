//! Parabolic-style LED reflectors.

use mesh_types::IndexedMesh;
use tracing::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RevolveError, RevolveResult, at_least, positive};
use crate::meridian::{Ring, revolve};
use crate::profile::{PowerFlare, Profile};

/// Reflector dimensions, in mm and degrees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReflectorParams {
    /// Radius of the opening the LED sits in.
    pub seat_radius: f64,
    /// Distance from the seat to the mouth.
    pub depth: f64,
    /// Full beam angle in degrees.
    pub beam_angle: f64,
    /// Wall thickness.
    pub wall_thickness: f64,
    /// Vertices per ring.
    pub segments: usize,
    /// Rings between seat and mouth.
    pub depth_steps: usize,
}

impl Default for ReflectorParams {
    fn default() -> Self {
        Self {
            seat_radius: 4.0,
            depth: 15.0,
            beam_angle: 60.0,
            wall_thickness: 1.2,
            segments: 64,
            depth_steps: 24,
        }
    }
}

impl ReflectorParams {
    /// Reflector for a round LED of `seat_radius` with the given beam.
    #[must_use]
    pub fn new(seat_radius: f64, depth: f64, beam_angle: f64) -> Self {
        Self {
            seat_radius,
            depth,
            beam_angle,
            ..Self::default()
        }
    }

    /// Set the wall thickness.
    #[must_use]
    pub const fn with_wall_thickness(mut self, wall: f64) -> Self {
        self.wall_thickness = wall;
        self
    }

    /// Inner radius at the mouth: `seat + depth · tan(beam / 2)`.
    #[must_use]
    pub fn open_radius(&self) -> f64 {
        self.seat_radius + self.depth * (self.beam_angle.to_radians() / 2.0).tan()
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive dimensions, a beam angle outside
    /// (0, 180), or too few segments or steps.
    pub fn validate(&self) -> RevolveResult<()> {
        positive("seat_radius", self.seat_radius)?;
        positive("depth", self.depth)?;
        positive("wall_thickness", self.wall_thickness)?;
        if !(self.beam_angle > 0.0 && self.beam_angle < 180.0) {
            return Err(RevolveError::BeamAngle(self.beam_angle));
        }
        at_least("segments", self.segments, 3)?;
        at_least("depth_steps", self.depth_steps, 1)?;
        Ok(())
    }
}

/// Build the reflector shell.
///
/// The inner wall flares from the seat to [`ReflectorParams::open_radius`]
/// along [`PowerFlare::reflector`]; the outer wall is the same curve one
/// wall thickness out. Rims close the back and front; the seat stays open.
#[must_use]
pub fn reflector(params: &ReflectorParams) -> IndexedMesh {
    if let Err(err) = params.validate() {
        warn!(%err, "Reflector parameters cannot be built");
        return IndexedMesh::new();
    }

    let open = params.open_radius();
    let flare = PowerFlare::reflector(params.seat_radius / open);
    let steps = params.depth_steps;
    let wall = params.wall_thickness;

    #[allow(clippy::cast_precision_loss)]
    // Precision: step counts are small
    let inner: Vec<(f64, f64)> = (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            (open * flare.radius_at(t), t * params.depth)
        })
        .collect();

    let mut meridian: Vec<Ring> = Vec::with_capacity(2 * inner.len());
    meridian.extend(inner.iter().map(|&(r, z)| Ring::circle(r + wall, z)));
    meridian.extend(inner.iter().rev().map(|&(r, z)| Ring::circle(r, z)));

    let mesh = revolve(&meridian, params.segments);
    info!(
        open_radius = open,
        beam_angle = params.beam_angle,
        faces = mesh.faces.len(),
        "Generated reflector"
    );
    mesh
}
