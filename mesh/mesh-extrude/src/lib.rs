//! Flat extrusions for light fixtures.
//!
//! This crate turns planar outlines into printable slabs:
//!
//! - [`plate`] - Tags and plates from a convex [`PlateOutline`] with an
//!   optional hang hole
//! - [`letter_housing`] - Channel-letter trays that follow glyph contours
//! - [`diffuser_face`] - The thin face that drops into a housing opening
//! - [`extrude_region`] - Any polygon with holes between two heights
//! - [`triangulate`] - Ear clipping with hole bridging, used for every cap
//!
//! Outlines may wind either way; outer loops are treated as counter-clockwise
//! and holes as clockwise after orientation. Wall offsets move each vertex
//! along its averaged edge normal, so thin strokes can fold over; no polygon
//! clipping is attempted.
//!
//! # Example
//!
//! ```
//! use mesh_extrude::{LetterHousingParams, letter_housing};
//! use path_types::{ContourPair, Path};
//! use nalgebra::Point2;
//!
//! let block = Path::closed_loop(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(30.0, 0.0),
//!     Point2::new(30.0, 50.0),
//!     Point2::new(0.0, 50.0),
//! ]);
//! let housing = letter_housing(&[ContourPair::solid(block)], &LetterHousingParams::default());
//! assert!(housing.edge_report().is_closed());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod extrude;
mod housing;
mod plate;
mod triangulate;

pub use error::{ExtrudeError, ExtrudeResult};
pub use extrude::extrude_region;
pub use housing::{LetterHousingParams, diffuser_face, letter_housing};
pub use plate::{MIN_HOLE_WALL, PlateOutline, PlateParams, plate};
pub use triangulate::triangulate;
