//! Designs built from laid-out text.

use glyph_centerline::TextParams;
use mesh_extrude::{LetterHousingParams, diffuser_face, letter_housing};
use mesh_types::Mesh;
use path_types::ContourPair;
use serde::{Deserialize, Serialize};

use crate::context::DesignContext;
use crate::design::Design;
use crate::error::{DesignError, DesignResult, non_empty, positive};
use crate::tube::TubeSection;

/// Part name of a letter housing.
pub const LETTER_HOUSING: &str = "letter_housing";
/// Part name of the matching diffuser face.
pub const LETTER_DIFFUSER: &str = "letter_diffuser";

fn default_font() -> String {
    "sans".to_string()
}

/// Neon-style sign: a hollow tube along the centerline of every letter.
///
/// ```json
/// { "design": "neon_sign", "text": "OPEN", "font": "script", "size": 80,
///   "tube": { "diameter": 12, "wall_thickness": 1.2, "split": true } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeonSign {
    /// Sign text; newlines start new lines.
    pub text: String,
    /// Font identifier.
    pub font: String,
    /// Em size in mm.
    pub size: f64,
    /// Extra gap between letters in mm.
    pub letter_spacing: f64,
    /// Tube cross-section.
    pub tube: TubeSection,
}

impl Default for NeonSign {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: default_font(),
            size: 80.0,
            letter_spacing: 0.0,
            tube: TubeSection::default(),
        }
    }
}

impl NeonSign {
    /// Sign reading `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the font identifier.
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the em size.
    #[must_use]
    pub const fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the tube section.
    #[must_use]
    pub fn with_tube(mut self, tube: TubeSection) -> Self {
        self.tube = tube;
        self
    }

    fn text_params(&self) -> TextParams {
        TextParams::sized(self.size).with_letter_spacing(self.letter_spacing)
    }
}

impl Design for NeonSign {
    fn kind(&self) -> &'static str {
        "neon_sign"
    }

    fn validate(&self) -> DesignResult<()> {
        non_empty(self.kind(), &self.text)?;
        positive("size", self.size)?;
        self.tube.validate()
    }

    fn build(&self, ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        let layout = ctx.centered_text(self.kind(), &self.font, &self.text, &self.text_params())?;
        let parts = self.tube.sweep_paths(layout.centerlines());
        if parts.iter().all(Mesh::is_empty) {
            return Err(DesignError::NoGeometry { design: self.kind() });
        }
        Ok(parts)
    }
}

/// Channel letters: an open housing per glyph plus a diffuser face that
/// drops into its opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlluminatedLetters {
    /// Letter text.
    pub text: String,
    /// Font identifier.
    pub font: String,
    /// Em size in mm.
    pub size: f64,
    /// Extra gap between letters in mm.
    pub letter_spacing: f64,
    /// Wall height.
    pub depth: f64,
    /// Wall thickness.
    pub wall_thickness: f64,
    /// Floor thickness.
    pub floor_thickness: f64,
    /// Diffuser face thickness.
    pub diffuser_thickness: f64,
    /// Gap between the diffuser and the walls.
    pub diffuser_clearance: f64,
}

impl Default for IlluminatedLetters {
    fn default() -> Self {
        let housing = LetterHousingParams::default();
        Self {
            text: String::new(),
            font: default_font(),
            size: 150.0,
            letter_spacing: 5.0,
            depth: housing.depth,
            wall_thickness: housing.wall_thickness,
            floor_thickness: housing.floor_thickness,
            diffuser_thickness: housing.diffuser_thickness,
            diffuser_clearance: housing.diffuser_clearance,
        }
    }
}

impl IlluminatedLetters {
    /// Letters spelling `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the font identifier.
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the em size.
    #[must_use]
    pub const fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Housing dimensions for the generators.
    #[must_use]
    pub const fn housing(&self) -> LetterHousingParams {
        LetterHousingParams {
            depth: self.depth,
            wall_thickness: self.wall_thickness,
            floor_thickness: self.floor_thickness,
            diffuser_thickness: self.diffuser_thickness,
            diffuser_clearance: self.diffuser_clearance,
        }
    }
}

impl Design for IlluminatedLetters {
    fn kind(&self) -> &'static str {
        "illuminated_letters"
    }

    fn validate(&self) -> DesignResult<()> {
        non_empty(self.kind(), &self.text)?;
        positive("size", self.size)?;
        self.housing().validate()?;
        Ok(())
    }

    fn build(&self, ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        let params = TextParams::sized(self.size).with_letter_spacing(self.letter_spacing);
        let layout = ctx.centered_text(self.kind(), &self.font, &self.text, &params)?;
        let contours: Vec<ContourPair> = layout.contours().cloned().collect();

        let housing = self.housing();
        let body = letter_housing(&contours, &housing);
        if body.faces.is_empty() {
            return Err(DesignError::NoGeometry { design: self.kind() });
        }
        let diffuser = diffuser_face(&contours, &housing);
        Ok(vec![
            Mesh::from_indexed(LETTER_HOUSING, &body),
            Mesh::from_indexed(LETTER_DIFFUSER, &diffuser),
        ])
    }
}
