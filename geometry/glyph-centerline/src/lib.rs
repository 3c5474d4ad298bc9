//! Single-stroke centerlines from glyph outlines.
//!
//! Neon-style signs bend one tube along each letter, so a filled glyph has
//! to become a stroke through its middle. This crate takes outlines that an
//! external parser already decoded (see [`OutlineSink`]) and:
//!
//! 1. Flattens curves by fixed-step sampling ([`flatten`])
//! 2. Groups closed contours into outlines and counters by bounding-box
//!    nesting ([`pair_contours`])
//! 3. Derives a centerline per group ([`centerlines`]): midpoints between a
//!    loop and its counterpart, scan-line midpoints for long solid strokes,
//!    or an inward offset for blobs
//! 4. Simplifies every centerline with Douglas–Peucker
//!
//! [`layout_text`] places glyphs along lines with kerning, and
//! [`FontCache`] loads each font at most once at a time through a
//! [`FontSource`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use glyph_centerline::{
//!     FontCache, FontOutlines, InMemoryFontSource, OutlineCommand, TextParams, layout_text,
//! };
//!
//! let stem = vec![
//!     OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
//!     OutlineCommand::LineTo { x: 120.0, y: 0.0 },
//!     OutlineCommand::LineTo { x: 120.0, y: 700.0 },
//!     OutlineCommand::LineTo { x: 0.0, y: 700.0 },
//!     OutlineCommand::Close,
//! ];
//! let font = FontOutlines::new(1000.0).with_glyph('l', 300.0, stem);
//! let cache = FontCache::new(Arc::new(InMemoryFontSource::new().with_font("block", font)));
//!
//! let font = cache.get("block").unwrap();
//! let layout = layout_text(&font, "ll", &TextParams::sized(40.0));
//! assert_eq!(layout.centerlines().count(), 2);
//! ```
//!
//! # Coordinates
//!
//! Outlines are y-up font units; everything after [`flatten`] is in output
//! units (font units times the scale).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod cache;
mod centerline;
mod error;
mod font;
mod layout;
mod outline;

pub use cache::{FontCache, FontSource, InMemoryFontSource, JsonFontSource};
pub use centerline::{
    CenterlineParams, GlyphContours, centerlines, glyph_centerlines, pair_contours,
};
pub use error::{FontError, FontResult};
pub use font::{FontOutlines, Glyph};
pub use layout::{PlacedGlyph, TextLayout, TextParams, layout_text};
pub use outline::{
    CURVE_SAMPLE_RANGE, DEFAULT_CURVE_SAMPLES, OutlineBuilder, OutlineCommand, OutlineSink,
    flatten, replay,
};
