//! Decoded font outlines and metrics.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::outline::OutlineCommand;

/// Outline and advance of one glyph, in font units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Horizontal advance.
    pub advance: f64,
    /// Drawing commands.
    #[serde(default)]
    pub commands: Vec<OutlineCommand>,
}

/// Every glyph of one font, already decoded by an external parser.
///
/// Serialized as JSON with single-character keys:
///
/// ```json
/// {
///   "units_per_em": 1000,
///   "ascender": 800,
///   "descender": -200,
///   "glyphs": { "A": { "advance": 600, "commands": [ ... ] } },
///   "kerning": { "A": { "V": -80 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontOutlines {
    /// Font units per em.
    pub units_per_em: f64,
    /// Height above the baseline.
    #[serde(default)]
    pub ascender: f64,
    /// Depth below the baseline (negative).
    #[serde(default)]
    pub descender: f64,
    /// Glyphs by character.
    pub glyphs: HashMap<char, Glyph>,
    /// Pair kerning: left character, then right character.
    #[serde(default)]
    pub kerning: HashMap<char, HashMap<char, f64>>,
}

impl Default for FontOutlines {
    fn default() -> Self {
        Self {
            units_per_em: 1000.0,
            ascender: 800.0,
            descender: -200.0,
            glyphs: HashMap::new(),
            kerning: HashMap::new(),
        }
    }
}

impl FontOutlines {
    /// Empty font with the given em size.
    #[must_use]
    pub fn new(units_per_em: f64) -> Self {
        Self {
            units_per_em,
            ..Self::default()
        }
    }

    /// Add or replace a glyph.
    #[must_use]
    pub fn with_glyph(mut self, ch: char, advance: f64, commands: Vec<OutlineCommand>) -> Self {
        self.glyphs.insert(ch, Glyph { advance, commands });
        self
    }

    /// Add a kerning adjustment between `left` and `right`.
    #[must_use]
    pub fn with_kerning(mut self, left: char, right: char, value: f64) -> Self {
        self.kerning.entry(left).or_default().insert(right, value);
        self
    }

    /// Glyph for `ch`, if the font has one.
    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Kerning between two characters, zero when unset.
    #[must_use]
    pub fn kerning(&self, left: char, right: char) -> f64 {
        self.kerning
            .get(&left)
            .and_then(|row| row.get(&right))
            .copied()
            .unwrap_or(0.0)
    }

    /// Scale from font units to output units for an em of `size`.
    #[must_use]
    pub fn scale_for(&self, size: f64) -> f64 {
        if self.units_per_em > 0.0 {
            size / self.units_per_em
        } else {
            0.0
        }
    }

    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT_JSON: &str = r#"{
        "units_per_em": 2048,
        "glyphs": {
            "A": { "advance": 1200, "commands": [
                { "op": "move_to", "x": 0, "y": 0 },
                { "op": "line_to", "x": 600, "y": 1400 },
                { "op": "line_to", "x": 1200, "y": 0 },
                { "op": "close" }
            ] },
            " ": { "advance": 500 }
        },
        "kerning": { "A": { "V": -80 } }
    }"#;

    #[test]
    fn parses_json_font() {
        let font = FontOutlines::from_json(FONT_JSON).unwrap_or_default();
        assert_eq!(font.glyphs.len(), 2);
        assert!((font.units_per_em - 2048.0).abs() < f64::EPSILON);
        assert_eq!(font.glyph('A').map(|g| g.commands.len()), Some(4));
        assert!(font.glyph(' ').is_some_and(|g| g.commands.is_empty()));
        assert!((font.kerning('A', 'V') + 80.0).abs() < f64::EPSILON);
        assert!(font.kerning('V', 'A').abs() < f64::EPSILON);
    }

    #[test]
    fn builders_and_scale() {
        let font = FontOutlines::new(1000.0)
            .with_glyph('I', 300.0, Vec::new())
            .with_kerning('I', 'I', 10.0);
        assert!((font.scale_for(20.0) - 0.02).abs() < 1e-15);
        assert!((font.kerning('I', 'I') - 10.0).abs() < f64::EPSILON);
        assert!(font.glyph('J').is_none());
        assert!(FontOutlines::new(0.0).scale_for(10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(FontOutlines::from_json("{\"glyphs\": 3}").is_err());
    }
}
