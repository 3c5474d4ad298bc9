//! Helical screw bases (Edison sockets).

use mesh_types::IndexedMesh;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RevolveError, RevolveResult, at_least, positive};
use crate::meridian::{Ring, cup_floor, revolve};
use crate::profile::{Profile, ThreadPhase};

/// Screw base dimensions, in mm.
///
/// The base is a threaded cup: the thread runs from `z = 0` up to a whole
/// number of turns, a tapered collar widens to the bulb shell's base, and a
/// bore of `minor/2 - wall` leaves room for the socket wiring above a floor.
///
/// # Example
///
/// ```
/// use mesh_revolve::{ThreadParams, screw_thread};
///
/// let params = ThreadParams::e26().with_height(14.0);
/// params.validate().unwrap();
///
/// let base = screw_thread(&params);
/// assert!(base.edge_report().is_closed());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThreadParams {
    /// Crest diameter.
    pub major_diameter: f64,
    /// Root diameter.
    pub minor_diameter: f64,
    /// Axial advance per turn.
    pub pitch: f64,
    /// Threaded height; only whole turns are cut.
    pub height: f64,
    /// Diameter of the cable hole through the floor.
    pub wire_hole: Option<f64>,
    /// Material between the thread root and the bore.
    pub wall_thickness: f64,
    /// Thickness of the floor at the bottom of the bore.
    pub floor_thickness: f64,
    /// Height of the taper from the thread to the shell base.
    pub collar_height: f64,
    /// Diameter at the top of the collar.
    pub shell_base_diameter: f64,
    /// Angular steps per turn.
    pub steps_per_turn: usize,
}

impl Default for ThreadParams {
    fn default() -> Self {
        Self::e26()
    }
}

impl ThreadParams {
    /// Medium Edison screw (North America).
    #[must_use]
    pub fn e26() -> Self {
        Self {
            major_diameter: 26.0,
            minor_diameter: 24.1,
            pitch: 3.629,
            height: 18.0,
            wire_hole: Some(6.0),
            wall_thickness: 1.6,
            floor_thickness: 2.0,
            collar_height: 6.0,
            shell_base_diameter: 32.0,
            steps_per_turn: 48,
        }
    }

    /// Medium Edison screw (Europe).
    #[must_use]
    pub fn e27() -> Self {
        Self {
            major_diameter: 26.45,
            minor_diameter: 24.26,
            ..Self::e26()
        }
    }

    /// Candelabra screw.
    #[must_use]
    pub fn e12() -> Self {
        Self {
            major_diameter: 11.89,
            minor_diameter: 10.27,
            pitch: 2.54,
            height: 12.0,
            wire_hole: Some(3.0),
            wall_thickness: 1.2,
            floor_thickness: 1.5,
            collar_height: 4.0,
            shell_base_diameter: 16.0,
            steps_per_turn: 36,
        }
    }

    /// Set the threaded height.
    #[must_use]
    pub const fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Set the wire hole diameter, or `None` for a solid floor.
    #[must_use]
    pub const fn with_wire_hole(mut self, diameter: Option<f64>) -> Self {
        self.wire_hole = diameter;
        self
    }

    /// Set the collar's top diameter.
    #[must_use]
    pub const fn with_shell_base_diameter(mut self, diameter: f64) -> Self {
        self.shell_base_diameter = diameter;
        self
    }

    /// Whole turns that fit in the threaded height.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation: floor of a small positive ratio
    pub fn turns(&self) -> usize {
        if self.pitch > 0.0 && self.height.is_finite() {
            (self.height / self.pitch).floor().max(0.0) as usize
        } else {
            0
        }
    }

    /// Radius of the bore inside the thread.
    #[must_use]
    pub fn bore_radius(&self) -> f64 {
        self.minor_diameter / 2.0 - self.wall_thickness
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive dimensions, a minor diameter not
    /// below the major, less than one turn of thread, a wall that fills the
    /// bore, a wire hole wider than the bore, or a floor taller than the
    /// part.
    pub fn validate(&self) -> RevolveResult<()> {
        positive("major_diameter", self.major_diameter)?;
        positive("minor_diameter", self.minor_diameter)?;
        positive("pitch", self.pitch)?;
        positive("height", self.height)?;
        positive("wall_thickness", self.wall_thickness)?;
        positive("floor_thickness", self.floor_thickness)?;
        positive("collar_height", self.collar_height)?;
        positive("shell_base_diameter", self.shell_base_diameter)?;
        if self.minor_diameter >= self.major_diameter {
            return Err(RevolveError::ThreadDiameters {
                major: self.major_diameter,
                minor: self.minor_diameter,
            });
        }
        if self.turns() == 0 {
            return Err(RevolveError::PitchTooLarge {
                pitch: self.pitch,
                height: self.height,
            });
        }
        let bore = self.bore_radius();
        if bore <= 0.0 {
            return Err(RevolveError::WallTooThick {
                wall: self.wall_thickness,
                radius: self.minor_diameter / 2.0,
            });
        }
        if let Some(hole) = self.wire_hole {
            positive("wire_hole", hole)?;
            if hole / 2.0 >= bore {
                return Err(RevolveError::HoleTooLarge {
                    hole: hole / 2.0,
                    bore,
                });
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let top = self.turns() as f64 * self.pitch + self.collar_height;
        if self.floor_thickness >= top {
            return Err(RevolveError::FloorTooThick {
                floor: self.floor_thickness,
                height: top,
            });
        }
        at_least("steps_per_turn", self.steps_per_turn, 3)?;
        Ok(())
    }
}

/// Build the threaded screw base.
///
/// Every thread ring is sampled at `steps_per_turn` angles; the ring at
/// height `z` takes the [`ThreadPhase`] radius at phase
/// `z / pitch - θ / 2π`, so the crest climbs one pitch per turn. Rings are
/// spaced `pitch / steps_per_turn` apart over `turns · steps_per_turn`
/// steps.
#[must_use]
pub fn screw_thread(params: &ThreadParams) -> IndexedMesh {
    let turns = params.turns();
    let bore = params.bore_radius();
    if turns == 0 || bore <= 0.0 || params.minor_diameter >= params.major_diameter {
        warn!(
            turns,
            bore,
            major = params.major_diameter,
            minor = params.minor_diameter,
            "Thread parameters cannot be built"
        );
        return IndexedMesh::new();
    }

    let steps = params.steps_per_turn.max(3);
    let major_radius = params.major_diameter / 2.0;
    let phase = ThreadPhase {
        minor_ratio: params.minor_diameter / params.major_diameter,
    };
    let ring_count = turns * steps;

    #[allow(clippy::cast_precision_loss)]
    // Precision: step counts are small
    let dz = params.pitch / steps as f64;
    #[allow(clippy::cast_precision_loss)]
    let thread_top = turns as f64 * params.pitch;
    let collar_top = thread_top + params.collar_height;

    let mut meridian: Vec<Ring> = Vec::with_capacity(ring_count + 6);
    meridian.extend((0..=ring_count).map(|k| {
        let radii = (0..steps)
            .map(|j| {
                // Phase in whole steps, (k - j) mod steps
                let m = (k + steps - j % steps) % steps;
                #[allow(clippy::cast_precision_loss)]
                let u = m as f64 / steps as f64;
                major_radius * phase.radius_at(u)
            })
            .collect();
        #[allow(clippy::cast_precision_loss)]
        let z = k as f64 * dz;
        Ring::Varying { radii, z }
    }));
    meridian.push(Ring::circle(params.shell_base_diameter / 2.0, collar_top));
    meridian.push(Ring::circle(bore, collar_top));
    meridian.extend(cup_floor(
        bore,
        params.floor_thickness,
        params.wire_hole.map(|d| d / 2.0),
    ));

    debug!(turns, steps, rings = meridian.len(), "Built thread meridian");
    let mesh = revolve(&meridian, steps);
    info!(
        major = params.major_diameter,
        pitch = params.pitch,
        turns,
        faces = mesh.faces.len(),
        "Generated screw thread"
    );
    mesh
}
