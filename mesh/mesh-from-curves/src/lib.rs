//! Tube sweeps for neon-style signs and glyph strokes.
//!
//! This crate turns a 3D centerline into a watertight tube mesh:
//!
//! - **Solid and hollow tubes**: a disc or annulus swept along the path,
//!   closed by fan or ring caps
//! - **Split-half mode**: two printable halves cut along the path plane,
//!   each closed by flat seam faces
//! - **Closed loops**: the last ring joins the first (glyph counters)
//! - **Frames**: planar frames that keep the cut horizontal, or
//!   rotation-minimizing parallel transport for 3D paths
//!
//! # Quick Start
//!
//! ```
//! use mesh_from_curves::{SweepSpec, sweep_parts};
//! use nalgebra::Point3;
//!
//! let path = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(40.0, 0.0, 0.0),
//!     Point3::new(40.0, 25.0, 0.0),
//! ];
//!
//! let spec = SweepSpec::neon_channel(path, 8.0, 1.2);
//! spec.validate().unwrap();
//!
//! let parts = sweep_parts(&spec);
//! assert_eq!(parts.len(), 2);
//! assert_eq!(parts[0].name, "tube_top");
//! assert!(parts[0].edge_report().is_closed());
//! ```
//!
//! # Degenerate Input
//!
//! Sweeps never fail. A centerline with fewer than 2 distinct points or a
//! non-positive radius yields an empty mesh and a `warn!` event; use
//! [`SweepSpec::validate`] to reject such requests up front.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod frame;
mod sweep;

pub use error::{SweepError, SweepResult};
pub use frame::{Frame, FrameMode, parallel_transport_frames, path_directions, sweep_frames};
pub use sweep::{
    MIN_SEGMENTS, SweepSpec, TUBE_BOTTOM, TUBE_PART, TUBE_TOP, TubeHalves, sweep_halves,
    sweep_parts, sweep_tube,
};
