//! Lathed lamp parts: bulb shells, LED holders and diffuser caps.

use mesh_revolve::{
    BulbShape, LatheParams, LedHousingParams, Profile, ReflectorParams, ThreadParams,
    diffuser_cap, lathe_shell, led_housing, reflector, screw_thread,
};
use mesh_types::{IndexedMesh, Mesh};
use serde::{Deserialize, Serialize};

use crate::context::DesignContext;
use crate::design::Design;
use crate::error::{DesignError, DesignResult, positive};

/// Part name of a lathed bulb.
pub const BULB_SHELL: &str = "bulb_shell";
/// Part name of a threaded base.
pub const SCREW_BASE: &str = "screw_base";
/// Part name of an LED cup.
pub const LED_HOLDER: &str = "led_holder";
/// Part name of a reflector.
pub const REFLECTOR: &str = "reflector";
/// Part name of a dome cap.
pub const DIFFUSER_CAP: &str = "diffuser_cap";

/// Lamp socket sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrewBase {
    /// Medium Edison screw (North America).
    #[default]
    E26,
    /// Medium Edison screw (Europe).
    E27,
    /// Candelabra screw.
    E12,
}

impl ScrewBase {
    /// Thread preset for this socket.
    #[must_use]
    pub fn thread(self) -> ThreadParams {
        match self {
            Self::E26 => ThreadParams::e26(),
            Self::E27 => ThreadParams::e27(),
            Self::E12 => ThreadParams::e12(),
        }
    }
}

fn check_parts(
    design: &'static str,
    parts: &[(&'static str, IndexedMesh)],
) -> DesignResult<Vec<Mesh>> {
    if parts.iter().any(|(_, mesh)| mesh.faces.is_empty()) {
        return Err(DesignError::NoGeometry { design });
    }
    Ok(parts
        .iter()
        .map(|(name, mesh)| Mesh::from_indexed(*name, mesh))
        .collect())
}

/// Printable bulb shell on a screw base.
///
/// The base's collar widens to the shell's neck, so the two parts glue
/// flush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulbShell {
    /// Silhouette.
    pub shape: BulbShape,
    /// Overall shell height in mm.
    pub height: f64,
    /// Widest diameter in mm.
    pub max_diameter: f64,
    /// Shell wall in mm.
    pub wall_thickness: f64,
    /// Vertices per ring.
    pub segments: usize,
    /// Socket thread, or `None` to print the shell alone.
    pub base: Option<ScrewBase>,
}

impl Default for BulbShell {
    fn default() -> Self {
        let lathe = LatheParams::default();
        Self {
            shape: BulbShape::default(),
            height: lathe.height,
            max_diameter: lathe.max_diameter,
            wall_thickness: lathe.wall_thickness,
            segments: lathe.segments,
            base: Some(ScrewBase::default()),
        }
    }
}

impl BulbShell {
    /// Shell of the given shape and size.
    #[must_use]
    pub fn new(shape: BulbShape, height: f64, max_diameter: f64) -> Self {
        Self {
            shape,
            height,
            max_diameter,
            ..Self::default()
        }
    }

    /// Lathe parameters for the shell.
    #[must_use]
    pub fn lathe(&self) -> LatheParams {
        LatheParams::bulb(self.height, self.max_diameter)
            .with_wall_thickness(self.wall_thickness)
            .with_segments(self.segments)
    }

    /// Outer diameter of the shell at its neck.
    #[must_use]
    pub fn neck_diameter(&self) -> f64 {
        self.shape.radius_at(0.0) * self.max_diameter
    }

    /// Thread parameters for the base, if any.
    #[must_use]
    pub fn thread(&self) -> Option<ThreadParams> {
        self.base
            .map(|base| base.thread().with_shell_base_diameter(self.neck_diameter()))
    }
}

impl Design for BulbShell {
    fn kind(&self) -> &'static str {
        "bulb_shell"
    }

    fn validate(&self) -> DesignResult<()> {
        self.lathe().validate()?;
        if let Some(thread) = self.thread() {
            thread.validate()?;
        }
        Ok(())
    }

    fn build(&self, _ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        let mut parts = vec![(BULB_SHELL, lathe_shell(&self.shape, &self.lathe()))];
        if let Some(thread) = self.thread() {
            parts.push((SCREW_BASE, screw_thread(&thread)));
        }
        check_parts(self.kind(), &parts)
    }
}

/// LED module cup with a matching reflector.
///
/// The reflector's seat takes the same board as the cup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedHolder {
    /// LED board diameter in mm.
    pub board_diameter: f64,
    /// Cup wall in mm.
    pub wall_thickness: f64,
    /// Cup height in mm.
    pub cup_height: f64,
    /// Cable hole through the cup floor.
    pub cable_hole: Option<f64>,
    /// Full beam angle in degrees.
    pub beam_angle: f64,
    /// Reflector depth in mm.
    pub reflector_depth: f64,
}

impl Default for LedHolder {
    fn default() -> Self {
        let cup = LedHousingParams::default();
        Self {
            board_diameter: 20.0,
            wall_thickness: 1.75,
            cup_height: cup.height,
            cable_hole: cup.cable_hole,
            beam_angle: 60.0,
            reflector_depth: 15.0,
        }
    }
}

impl LedHolder {
    /// Cup parameters.
    #[must_use]
    pub fn cup(&self) -> LedHousingParams {
        let cup = LedHousingParams::for_board(self.board_diameter, self.wall_thickness)
            .with_cable_hole(self.cable_hole);
        LedHousingParams {
            height: self.cup_height,
            ..cup
        }
    }

    /// Reflector parameters.
    #[must_use]
    pub fn reflector(&self) -> ReflectorParams {
        let seat_radius = self.cup().inner_diameter / 2.0;
        ReflectorParams::new(seat_radius, self.reflector_depth, self.beam_angle)
    }
}

impl Design for LedHolder {
    fn kind(&self) -> &'static str {
        "led_holder"
    }

    fn validate(&self) -> DesignResult<()> {
        positive("board_diameter", self.board_diameter)?;
        self.cup().validate()?;
        self.reflector().validate()?;
        Ok(())
    }

    fn build(&self, _ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        check_parts(
            self.kind(),
            &[
                (LED_HOLDER, led_housing(&self.cup())),
                (REFLECTOR, reflector(&self.reflector())),
            ],
        )
    }
}

/// Dome that snaps over a fixture opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffuserCap {
    /// Rim diameter in mm.
    pub diameter: f64,
    /// Dome height in mm.
    pub height: f64,
    /// Wall in mm.
    pub wall_thickness: f64,
}

impl Default for DiffuserCap {
    fn default() -> Self {
        let params = LatheParams::diffuser(60.0, 30.0);
        Self {
            diameter: params.max_diameter,
            height: params.height,
            wall_thickness: params.wall_thickness,
        }
    }
}

impl DiffuserCap {
    /// Lathe parameters for the dome.
    #[must_use]
    pub fn lathe(&self) -> LatheParams {
        LatheParams::diffuser(self.diameter, self.height).with_wall_thickness(self.wall_thickness)
    }
}

impl Design for DiffuserCap {
    fn kind(&self) -> &'static str {
        "diffuser_cap"
    }

    fn validate(&self) -> DesignResult<()> {
        self.lathe().validate()?;
        Ok(())
    }

    fn build(&self, _ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        check_parts(self.kind(), &[(DIFFUSER_CAP, diffuser_cap(&self.lathe()))])
    }
}
