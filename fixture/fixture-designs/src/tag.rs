//! Pet tags with optional raised lettering.

use glyph_centerline::TextParams;
use mesh_extrude::{PlateOutline, PlateParams, extrude_region, plate};
use mesh_types::{IndexedMesh, Mesh};
use nalgebra::Point2;
use path_types::Rect;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::context::DesignContext;
use crate::design::Design;
use crate::error::{DesignError, DesignResult, non_empty, positive};

/// Part name of the tag plate.
pub const TAG_BODY: &str = "tag_body";
/// Part name of the raised lettering.
pub const TAG_TEXT: &str = "tag_text";

/// Raised lettering on a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagText {
    /// The lettering.
    pub text: String,
    /// Font identifier.
    pub font: String,
    /// Em size in mm.
    pub size: f64,
    /// Height above the plate in mm.
    pub height: f64,
}

impl Default for TagText {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: "sans".to_string(),
            size: 8.0,
            height: 1.0,
        }
    }
}

/// Flat tag with a hang hole and optional raised text.
///
/// Both parts share one coordinate frame: the plate spans
/// `0..thickness` and the lettering sits on top of it, centered in the
/// area below the hang hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetTag {
    /// Plate outline.
    pub outline: PlateOutline,
    /// Plate thickness in mm.
    pub thickness: f64,
    /// Hang hole diameter, or `None` for no hole.
    pub hang_hole: Option<f64>,
    /// Optional lettering.
    pub text: Option<TagText>,
}

impl Default for PetTag {
    fn default() -> Self {
        let plate = PlateParams::default();
        Self {
            outline: plate.outline,
            thickness: plate.thickness,
            hang_hole: plate.hang_hole,
            text: None,
        }
    }
}

impl PetTag {
    /// Round tag of `diameter`.
    #[must_use]
    pub fn round(diameter: f64) -> Self {
        Self {
            outline: PlateOutline::Circle { diameter },
            ..Self::default()
        }
    }

    /// Add lettering.
    #[must_use]
    pub fn with_text(mut self, text: TagText) -> Self {
        self.text = Some(text);
        self
    }

    /// Plate parameters for the generator.
    #[must_use]
    pub fn plate_params(&self) -> PlateParams {
        PlateParams {
            outline: self.outline.clone(),
            ..PlateParams::default()
        }
        .with_thickness(self.thickness)
        .with_hang_hole(self.hang_hole)
    }

    /// Point the lettering is centered on: the middle of the outline's
    /// bounds, or of the part below the hang hole when there is one.
    #[must_use]
    pub fn text_center(&self) -> Point2<f64> {
        let params = self.plate_params();
        let outline = params.outline.sample(params.segments);
        let Some(bounds) = Rect::from_points(&outline) else {
            return Point2::origin();
        };
        let center = bounds.center();
        match params.hang_hole {
            Some(diameter) => {
                let radius = diameter / 2.0;
                let hole_bottom = params.hole_center(&outline, radius).y - radius;
                Point2::new(center.x, (bounds.min.y + hole_bottom) / 2.0)
            }
            None => center,
        }
    }

    fn lettering(&self, ctx: &DesignContext, text: &TagText) -> DesignResult<IndexedMesh> {
        let params = self.plate_params();
        let layout = ctx
            .centered_text(self.kind(), &text.font, &text.text, &TextParams::sized(text.size))?
            .translated(self.text_center().coords);

        if let (Some(letters), Some(plate_bounds)) = (
            layout.bounds,
            Rect::from_points(&params.outline.sample(params.segments)),
        ) {
            if letters.width() > plate_bounds.width() || letters.height() > plate_bounds.height() {
                warn!(
                    text_width = letters.width(),
                    plate_width = plate_bounds.width(),
                    "Tag text overhangs the plate"
                );
            }
        }

        let (z0, z1) = (self.thickness, self.thickness + text.height);
        let mut mesh = IndexedMesh::new();
        for pair in layout.contours() {
            let holes: Vec<Vec<Point2<f64>>> =
                pair.inners.iter().map(|inner| inner.points.clone()).collect();
            mesh.merge(&extrude_region(&pair.outer.points, &holes, z0, z1));
        }
        Ok(mesh)
    }
}

impl Design for PetTag {
    fn kind(&self) -> &'static str {
        "pet_tag"
    }

    fn validate(&self) -> DesignResult<()> {
        self.plate_params().validate()?;
        if let Some(text) = &self.text {
            non_empty(self.kind(), &text.text)?;
            positive("text.size", text.size)?;
            positive("text.height", text.height)?;
        }
        Ok(())
    }

    fn build(&self, ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        let body = plate(&self.plate_params());
        if body.faces.is_empty() {
            return Err(DesignError::NoGeometry { design: self.kind() });
        }
        let mut parts = vec![Mesh::from_indexed(TAG_BODY, &body)];
        if let Some(text) = &self.text {
            let letters = self.lettering(ctx, text)?;
            parts.push(Mesh::from_indexed(TAG_TEXT, &letters));
        }
        Ok(parts)
    }
}

