//! Light-fixture designs composed from the mesh generators.
//!
//! Each design is a plain serde record that validates its fields and turns
//! into named printable parts:
//!
//! | Record | Parts |
//! |---|---|
//! | [`NeonSign`] | `tube_top`, `tube_bottom` (or `tube`) |
//! | [`IlluminatedLetters`] | `letter_housing`, `letter_diffuser` |
//! | [`PetTag`] | `tag_body`, `tag_text` |
//! | [`BulbShell`] | `bulb_shell`, `screw_base` |
//! | [`LedHolder`] | `led_holder`, `reflector` |
//! | [`DiffuserCap`] | `diffuser_cap` |
//! | [`ImageTrace`] | `tube_top`, `tube_bottom` (or `tube`) |
//!
//! [`DesignRecord`] wraps them all behind a `"design"` tag for JSON input.
//! A [`DesignContext`] supplies fonts; [`export_parts`] writes one STL per
//! part in parallel.
//!
//! # Example
//!
//! ```
//! use fixture_designs::{Design, DesignContext, DesignRecord, export_parts};
//! use mesh_io::StlEncoding;
//!
//! let ctx = DesignContext::with_font_dir("fonts");
//! let record = DesignRecord::from_json(r#"{"design": "led_holder", "beam_angle": 40}"#).unwrap();
//!
//! let parts = record.parts(&ctx).unwrap();
//! let names: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["led_holder", "reflector"]);
//!
//! let dir = tempfile::tempdir().unwrap();
//! let files = export_parts(&parts, dir.path(), StlEncoding::Binary).unwrap();
//! assert_eq!(files.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod context;
mod design;
mod error;
mod export;
mod lamp;
mod tag;
mod text;
mod trace;
mod tube;

pub use context::DesignContext;
pub use design::{Design, DesignRecord};
pub use error::{DesignError, DesignResult};
pub use export::{encode_parts, export_parts};
pub use lamp::{
    BULB_SHELL, BulbShell, DIFFUSER_CAP, DiffuserCap, LED_HOLDER, LedHolder, REFLECTOR,
    SCREW_BASE, ScrewBase,
};
pub use tag::{PetTag, TAG_BODY, TAG_TEXT, TagText};
pub use text::{IlluminatedLetters, LETTER_DIFFUSER, LETTER_HOUSING, NeonSign};
pub use trace::ImageTrace;
pub use tube::TubeSection;
