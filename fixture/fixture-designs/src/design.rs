//! The design trait and the tagged record that selects a design.

use std::time::Instant;

use mesh_types::Mesh;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::DesignContext;
use crate::error::DesignResult;
use crate::lamp::{BulbShell, DiffuserCap, LedHolder};
use crate::tag::PetTag;
use crate::text::{IlluminatedLetters, NeonSign};
use crate::trace::ImageTrace;

/// A parametric design that turns into named printable parts.
pub trait Design {
    /// Snake-case design tag, as used in JSON records.
    fn kind(&self) -> &'static str;

    /// Check the record before generating anything.
    ///
    /// # Errors
    ///
    /// The first out-of-range field, as a typed error.
    fn validate(&self) -> DesignResult<()>;

    /// Generate the parts of an already validated record.
    ///
    /// # Errors
    ///
    /// Font loading failures, or [`crate::DesignError::NoGeometry`] when
    /// the record produces nothing printable.
    fn build(&self, ctx: &DesignContext) -> DesignResult<Vec<Mesh>>;

    /// Validate, then build.
    ///
    /// # Errors
    ///
    /// Anything [`Self::validate`] or [`Self::build`] reports.
    fn parts(&self, ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        let started = Instant::now();
        self.validate()?;
        let parts = self.build(ctx)?;
        info!(
            design = self.kind(),
            parts = parts.len(),
            triangles = parts.iter().map(Mesh::triangle_count).sum::<usize>(),
            elapsed = ?started.elapsed(),
            "Design generated"
        );
        Ok(parts)
    }
}

/// Any design, tagged by `"design"` in JSON.
///
/// ```
/// use fixture_designs::{Design, DesignRecord};
///
/// let record = DesignRecord::from_json(r#"{"design": "diffuser_cap", "diameter": 40}"#).unwrap();
/// assert_eq!(record.kind(), "diffuser_cap");
/// record.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "design", rename_all = "snake_case")]
pub enum DesignRecord {
    /// Tube lettering.
    NeonSign(NeonSign),
    /// Channel letters with diffusers.
    IlluminatedLetters(IlluminatedLetters),
    /// Tag plate with optional lettering.
    PetTag(PetTag),
    /// Bulb shell and screw base.
    BulbShell(BulbShell),
    /// LED cup and reflector.
    LedHolder(LedHolder),
    /// Dome cap.
    DiffuserCap(DiffuserCap),
    /// Tubes traced from an image.
    ImageTrace(ImageTrace),
}

impl DesignRecord {
    /// Parse a record.
    ///
    /// # Errors
    ///
    /// [`crate::DesignError::Json`] for malformed input or an unknown tag.
    pub fn from_json(json: &str) -> DesignResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn inner(&self) -> &dyn Design {
        match self {
            Self::NeonSign(d) => d,
            Self::IlluminatedLetters(d) => d,
            Self::PetTag(d) => d,
            Self::BulbShell(d) => d,
            Self::LedHolder(d) => d,
            Self::DiffuserCap(d) => d,
            Self::ImageTrace(d) => d,
        }
    }
}

impl Design for DesignRecord {
    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn validate(&self) -> DesignResult<()> {
        self.inner().validate()
    }

    fn build(&self, ctx: &DesignContext) -> DesignResult<Vec<Mesh>> {
        self.inner().build(ctx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DesignError;
    use crate::lamp::ScrewBase;
    use mesh_revolve::BulbShape;

    #[test]
    fn records_parse_with_defaults() {
        let record =
            DesignRecord::from_json(r#"{"design": "bulb_shell", "shape": "pear", "base": "e12"}"#)
                .unwrap();
        let DesignRecord::BulbShell(bulb) = &record else {
            panic!("expected a bulb shell, got {record:?}");
        };
        assert_eq!(bulb.shape, BulbShape::Pear);
        assert_eq!(bulb.base, Some(ScrewBase::E12));
        assert!((bulb.height - 110.0).abs() < f64::EPSILON);
        assert_eq!(record.kind(), "bulb_shell");
    }

    #[test]
    fn nested_sections_parse() {
        let record = DesignRecord::from_json(
            r#"{"design": "pet_tag",
                "outline": {"shape": "rounded_rect", "width": 40, "height": 25, "corner_radius": 5},
                "hang_hole": null,
                "text": {"text": "REX", "size": 10}}"#,
        )
        .unwrap();
        let DesignRecord::PetTag(tag) = record else {
            panic!("expected a pet tag");
        };
        assert!(tag.hang_hole.is_none());
        let text = tag.text.unwrap();
        assert_eq!(text.font, "sans");
        assert!((text.height - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_design_is_a_json_error() {
        assert!(matches!(
            DesignRecord::from_json(r#"{"design": "chandelier"}"#),
            Err(DesignError::Json(_))
        ));
    }

    #[test]
    fn record_round_trips() {
        let record = DesignRecord::LedHolder(LedHolder::default());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"design\":\"led_holder\""));
        assert_eq!(DesignRecord::from_json(&json).unwrap(), record);
    }
}
