//! Placing glyph centerlines along lines of text.

use nalgebra::{Point2, Vector2};
use path_types::{ContourPair, Path, Rect};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::centerline::{CenterlineParams, centerlines, pair_contours};
use crate::font::FontOutlines;
use crate::outline::flatten;

/// Text placement settings. Lengths are in output units (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextParams {
    /// Em size.
    pub size: f64,
    /// Extra space added after every glyph.
    pub letter_spacing: f64,
    /// Baseline-to-baseline distance as a multiple of `size`.
    pub line_height: f64,
    /// Centerline extraction tuning.
    pub centerline: CenterlineParams,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            size: 50.0,
            letter_spacing: 0.0,
            line_height: 1.2,
            centerline: CenterlineParams::default(),
        }
    }
}

impl TextParams {
    /// Text at the given em size.
    #[must_use]
    pub fn sized(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Set the extra spacing between glyphs.
    #[must_use]
    pub const fn with_letter_spacing(mut self, spacing: f64) -> Self {
        self.letter_spacing = spacing;
        self
    }
}

/// One glyph placed in design space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    /// The character.
    pub ch: char,
    /// Pen position (baseline origin) of the glyph.
    pub origin: Point2<f64>,
    /// Single-stroke centerlines, already translated.
    pub centerlines: Vec<Path>,
    /// Filled outline contours, already translated.
    pub contours: Vec<ContourPair>,
}

/// Laid-out text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    /// Placed glyphs in reading order (whitespace included).
    pub glyphs: Vec<PlacedGlyph>,
    /// Bounds of all centerlines and contours.
    pub bounds: Option<Rect>,
}

impl TextLayout {
    /// All centerlines of all glyphs.
    pub fn centerlines(&self) -> impl Iterator<Item = &Path> + '_ {
        self.glyphs.iter().flat_map(|g| g.centerlines.iter())
    }

    /// All outline contours of all glyphs.
    pub fn contours(&self) -> impl Iterator<Item = &ContourPair> + '_ {
        self.glyphs.iter().flat_map(|g| g.contours.iter())
    }

    /// Move every glyph by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2<f64>) -> Self {
        let glyphs = self
            .glyphs
            .iter()
            .map(|g| PlacedGlyph {
                ch: g.ch,
                origin: g.origin + offset,
                centerlines: g.centerlines.iter().map(|p| p.translated(offset)).collect(),
                contours: g
                    .contours
                    .iter()
                    .map(|c| ContourPair {
                        outer: c.outer.translated(offset),
                        inners: c.inners.iter().map(|p| p.translated(offset)).collect(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            glyphs,
            bounds: self.bounds.map(|b| b.translated(offset)),
        }
    }

    /// The layout moved so its bounds are centered on the origin.
    #[must_use]
    pub fn centered(&self) -> Self {
        match self.bounds {
            Some(b) => self.translated(-b.center().coords),
            None => self.clone(),
        }
    }
}

fn grow(bounds: &mut Option<Rect>, path: &Path) {
    if let Some(b) = path.bounds() {
        *bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
    }
}

/// Lay out `text` left to right with `font`.
///
/// Glyphs advance by their advance width plus pair kerning (both scaled from
/// font units) plus `letter_spacing`. A newline returns to `x = 0` and drops
/// one `line_height`. Characters missing from the font log a warning and
/// advance by half an em.
///
/// # Example
///
/// ```
/// use glyph_centerline::{FontOutlines, OutlineCommand, TextParams, layout_text};
///
/// let bar = vec![
///     OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
///     OutlineCommand::LineTo { x: 100.0, y: 0.0 },
///     OutlineCommand::LineTo { x: 100.0, y: 700.0 },
///     OutlineCommand::LineTo { x: 0.0, y: 700.0 },
///     OutlineCommand::Close,
/// ];
/// let font = FontOutlines::new(1000.0).with_glyph('I', 300.0, bar);
///
/// let layout = layout_text(&font, "II", &TextParams::sized(10.0));
/// assert_eq!(layout.glyphs.len(), 2);
/// assert!((layout.glyphs[1].origin.x - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn layout_text(font: &FontOutlines, text: &str, params: &TextParams) -> TextLayout {
    let scale = font.scale_for(params.size);
    let mut layout = TextLayout::default();
    let mut pen = Point2::origin();
    let mut previous: Option<char> = None;

    for ch in text.chars() {
        if ch == '\n' {
            pen = Point2::new(0.0, pen.y - params.size * params.line_height);
            previous = None;
            continue;
        }
        if let Some(left) = previous {
            pen.x += font.kerning(left, ch) * scale;
        }

        let Some(glyph) = font.glyph(ch) else {
            if !ch.is_whitespace() {
                warn!(%ch, "Glyph missing from font, leaving a gap");
            }
            pen.x += params.size / 2.0 + params.letter_spacing;
            previous = None;
            continue;
        };

        let offset = pen.coords;
        let contours = flatten(&glyph.commands, scale, params.centerline.curve_samples);
        let grouped = pair_contours(contours);
        let strokes: Vec<Path> = centerlines(&grouped, &params.centerline)
            .iter()
            .map(|p| p.translated(offset))
            .collect();
        let pairs: Vec<ContourPair> = grouped
            .pairs
            .iter()
            .map(|c| ContourPair {
                outer: c.outer.translated(offset),
                inners: c.inners.iter().map(|p| p.translated(offset)).collect(),
            })
            .collect();

        for path in strokes.iter().chain(pairs.iter().map(|c| &c.outer)) {
            grow(&mut layout.bounds, path);
        }

        layout.glyphs.push(PlacedGlyph {
            ch,
            origin: pen,
            centerlines: strokes,
            contours: pairs,
        });
        pen.x += glyph.advance * scale + params.letter_spacing;
        previous = Some(ch);
    }

    debug!(
        chars = text.chars().count(),
        glyphs = layout.glyphs.len(),
        strokes = layout.centerlines().count(),
        "Laid out text"
    );
    layout
}
