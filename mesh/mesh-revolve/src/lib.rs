//! Revolved solids for light fixtures.
//!
//! Every generator here describes a closed **meridian loop** (a sequence of
//! rings in the (r, z) half-plane, traversed counter-clockwise) and hands it
//! to [`revolve`], so each part comes out watertight with outward winding:
//!
//! - [`lathe_shell`] - Hollow bulb shells from a [`Profile`] ([`BulbShape`])
//! - [`diffuser_cap`] - Dome-profile shell for diffusers
//! - [`screw_thread`] - Edison-style threaded base with collar and floor
//! - [`reflector`] - Flared LED reflector following a [`PowerFlare`]
//! - [`led_housing`] - Cylindrical LED cup with optional cable hole
//!
//! # Example
//!
//! ```
//! use mesh_revolve::{BulbShape, LatheParams, ThreadParams, lathe_shell, screw_thread};
//!
//! let shape: BulbShape = "flame".parse().unwrap();
//! let shell = lathe_shell(&shape, &LatheParams::bulb(90.0, 45.0));
//! let base = screw_thread(&ThreadParams::e26().with_shell_base_diameter(45.0 * 0.4));
//!
//! assert!(shell.signed_volume() > 0.0);
//! assert!(base.edge_report().is_closed());
//! ```
//!
//! # Axis
//!
//! Parts are revolved about +Z with their base at `z = 0`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod housing;
mod lathe;
mod meridian;
mod profile;
mod reflector;
mod thread;

pub use error::{RevolveError, RevolveResult};
pub use housing::{LedHousingParams, led_housing};
pub use lathe::{LatheParams, diffuser_cap, lathe_shell};
pub use meridian::{RADIUS_EPSILON, Ring, cup_floor, revolve};
pub use profile::{BulbShape, PowerFlare, Profile, ThreadPhase};
pub use reflector::{ReflectorParams, reflector};
pub use thread::{ThreadParams, screw_thread};
