//! 2D path primitives for vector extraction.
//!
//! Font outlines and traced rasters are both reduced to the same handful of
//! 2D types before they reach the solid generators:
//!
//! - [`Path`] - Ordered points with a `closed` flag
//! - [`Rect`] - Axis-aligned bounding rectangle
//! - [`ContourPair`] - An outer contour with its nested holes
//! - [`simplify`] - Douglas–Peucker reduction over 2D or 3D points
//!
//! # Conventions
//!
//! Coordinates are `f64` in the shape's local space, Y up. A closed path
//! stores its loop once; the edge from the last point back to the first is
//! implicit. Signed area is positive for counter-clockwise loops, so the
//! sign tells an outer contour from a hole once the winding convention of
//! the source is known.
//!
//! # Example
//!
//! ```
//! use path_types::{Path, simplify};
//! use nalgebra::Point2;
//!
//! let zigzag = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 5.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(3.0, 5.0),
//! ];
//! assert_eq!(simplify(&zigzag, 0.1).len(), 4);
//! assert_eq!(simplify(&zigzag, 10.0), vec![zigzag[0], zigzag[3]]);
//!
//! let square = Path::closed_loop(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//! assert!((square.signed_area() - 4.0).abs() < 1e-12);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod contour;
mod path;
mod rect;
mod simplify;

pub use contour::{ContourPair, NESTING_TOLERANCE};
pub use path::Path;
pub use rect::Rect;
pub use simplify::{PathPoint, simplify, simplify_closed};

pub use nalgebra::{Point2, Point3, Vector2};
