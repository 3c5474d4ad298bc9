//! LED holder cups.

use mesh_types::IndexedMesh;
use tracing::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RevolveError, RevolveResult, at_least, positive};
use crate::meridian::{Ring, cup_floor, revolve};

/// Cylindrical cup that holds an LED module, in mm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedHousingParams {
    /// Outside diameter.
    pub outer_diameter: f64,
    /// Bore diameter.
    pub inner_diameter: f64,
    /// Overall height.
    pub height: f64,
    /// Floor thickness.
    pub floor_thickness: f64,
    /// Cable hole through the floor.
    pub cable_hole: Option<f64>,
    /// Vertices per ring.
    pub segments: usize,
}

impl Default for LedHousingParams {
    fn default() -> Self {
        Self {
            outer_diameter: 24.0,
            inner_diameter: 20.5,
            height: 12.0,
            floor_thickness: 2.0,
            cable_hole: Some(4.0),
            segments: 48,
        }
    }
}

impl LedHousingParams {
    /// Cup sized for an LED board of `board_diameter` with `wall` around it.
    #[must_use]
    pub fn for_board(board_diameter: f64, wall: f64) -> Self {
        let inner_diameter = board_diameter + 0.5;
        Self {
            outer_diameter: inner_diameter + 2.0 * wall,
            inner_diameter,
            ..Self::default()
        }
    }

    /// Set the cable hole diameter, or `None` for a closed floor.
    #[must_use]
    pub const fn with_cable_hole(mut self, diameter: Option<f64>) -> Self {
        self.cable_hole = diameter;
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive dimensions, a bore not inside the
    /// outer wall, a cable hole wider than the bore, or a floor at least as
    /// tall as the cup.
    pub fn validate(&self) -> RevolveResult<()> {
        positive("outer_diameter", self.outer_diameter)?;
        positive("inner_diameter", self.inner_diameter)?;
        positive("height", self.height)?;
        positive("floor_thickness", self.floor_thickness)?;
        if self.inner_diameter >= self.outer_diameter {
            return Err(RevolveError::WallTooThick {
                wall: (self.outer_diameter - self.inner_diameter) / 2.0,
                radius: self.outer_diameter / 2.0,
            });
        }
        if let Some(hole) = self.cable_hole {
            positive("cable_hole", hole)?;
            if hole >= self.inner_diameter {
                return Err(RevolveError::HoleTooLarge {
                    hole: hole / 2.0,
                    bore: self.inner_diameter / 2.0,
                });
            }
        }
        if self.floor_thickness >= self.height {
            return Err(RevolveError::FloorTooThick {
                floor: self.floor_thickness,
                height: self.height,
            });
        }
        at_least("segments", self.segments, 3)
    }
}

/// Build the LED cup: outer wall, top rim, bore, floor and optional hole.
#[must_use]
pub fn led_housing(params: &LedHousingParams) -> IndexedMesh {
    if let Err(err) = params.validate() {
        warn!(%err, "LED housing parameters cannot be built");
        return IndexedMesh::new();
    }

    let outer = params.outer_diameter / 2.0;
    let bore = params.inner_diameter / 2.0;
    let mut meridian = vec![
        Ring::circle(outer, 0.0),
        Ring::circle(outer, params.height),
        Ring::circle(bore, params.height),
    ];
    meridian.extend(cup_floor(
        bore,
        params.floor_thickness,
        params.cable_hole.map(|d| d / 2.0),
    ));

    let mesh = revolve(&meridian, params.segments);
    info!(
        outer_diameter = params.outer_diameter,
        height = params.height,
        faces = mesh.faces.len(),
        "Generated LED housing"
    );
    mesh
}
