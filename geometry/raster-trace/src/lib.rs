//! Raster to vector tracing.
//!
//! Turns a grayscale image into 2D paths for tube sweeps or extrusions:
//!
//! 1. [`GrayImage::binarize`] - Threshold into a [`Bitmap`]
//! 2. [`zhang_suen`] - Thin strokes to one-pixel skeletons
//! 3. [`trace_strokes`] - Follow skeleton pixels into chains, or
//!    [`trace_outlines`] - Follow the outer boundary of each component
//! 4. Douglas–Peucker simplification and optional placement in millimetres
//!
//! [`trace_image`] runs the whole pipeline with [`TraceParams`].
//!
//! # Determinism
//!
//! Components are discovered in row-major order and neighbours are visited
//! in a fixed order, so a given raster always traces to the same paths.
//!
//! # Example
//!
//! ```
//! use raster_trace::{GrayImage, TraceParams, trace_image};
//!
//! let (w, h) = (12, 12);
//! let mut data = vec![255u8; w * h];
//! for i in 2..10 {
//!     data[i * w + 5] = 0;
//!     data[i * w + 6] = 0;
//! }
//! let image = GrayImage::new(w, h, data).unwrap();
//!
//! let params = TraceParams::default().with_pixel_size(0.25);
//! let paths = trace_image(&image, &params);
//! assert_eq!(paths.len(), 1);
//! assert!(!paths[0].closed);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod image;
mod params;
mod pipeline;
mod thin;
mod trace;

pub use error::{TraceError, TraceResult};
pub use image::{Bitmap, GrayImage};
pub use params::{TraceMode, TraceParams};
pub use pipeline::{trace_bitmap, trace_image};
pub use thin::{MAX_THINNING_ROUNDS, ThinningStats, zhang_suen};
pub use trace::{PixelPath, trace_outlines, trace_strokes};
