//! Shared state for design generation.

use std::path::PathBuf;
use std::sync::Arc;

use glyph_centerline::{FontCache, FontOutlines, JsonFontSource, TextLayout, TextParams, layout_text};
use tracing::debug;

use crate::error::{DesignError, DesignResult};

/// Everything a design needs besides its own record.
///
/// The context owns the font cache, so one context can serve many designs
/// (and threads) while each font is parsed once.
#[derive(Debug)]
pub struct DesignContext {
    fonts: FontCache,
    fallback_font: Option<String>,
}

impl DesignContext {
    /// Context over an existing cache.
    #[must_use]
    pub fn new(fonts: FontCache) -> Self {
        Self {
            fonts,
            fallback_font: None,
        }
    }

    /// Context reading `<dir>/<font_id>.json` font files.
    #[must_use]
    pub fn with_font_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(FontCache::new(Arc::new(JsonFontSource::new(dir))))
    }

    /// Use `font_id` whenever a design's font cannot be loaded.
    #[must_use]
    pub fn with_fallback_font(mut self, font_id: impl Into<String>) -> Self {
        self.fallback_font = Some(font_id.into());
        self
    }

    /// The font cache.
    #[must_use]
    pub const fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// Outlines for `font_id`, or for the fallback font.
    ///
    /// # Errors
    ///
    /// [`DesignError::Font`] when neither font loads.
    pub fn font(&self, font_id: &str) -> DesignResult<Arc<FontOutlines>> {
        let font = match &self.fallback_font {
            Some(fallback) => self.fonts.get_or_fallback(font_id, fallback)?,
            None => self.fonts.get(font_id)?,
        };
        Ok(font)
    }

    /// Lay out `text` and center it on the origin.
    ///
    /// # Errors
    ///
    /// [`DesignError::Font`] when the font is unavailable, or
    /// [`DesignError::NoGeometry`] when none of the characters has an
    /// outline.
    pub fn centered_text(
        &self,
        design: &'static str,
        font_id: &str,
        text: &str,
        params: &TextParams,
    ) -> DesignResult<TextLayout> {
        let font = self.font(font_id)?;
        let layout = layout_text(&font, text, params);
        if layout.bounds.is_none() {
            return Err(DesignError::NoGeometry { design });
        }
        debug!(design, font_id, glyphs = layout.glyphs.len(), "Text laid out");
        Ok(layout.centered())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use glyph_centerline::{InMemoryFontSource, OutlineCommand};

    fn context() -> DesignContext {
        let bar = vec![
            OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
            OutlineCommand::LineTo { x: 100.0, y: 0.0 },
            OutlineCommand::LineTo { x: 100.0, y: 700.0 },
            OutlineCommand::LineTo { x: 0.0, y: 700.0 },
            OutlineCommand::Close,
        ];
        let font = FontOutlines::new(1000.0).with_glyph('I', 300.0, bar);
        let source = InMemoryFontSource::new().with_font("block", font);
        DesignContext::new(FontCache::new(Arc::new(source)))
    }

    #[test]
    fn fallback_font_is_used() {
        let ctx = context();
        assert!(matches!(ctx.font("fancy"), Err(DesignError::Font(_))));
        let ctx = ctx.with_fallback_font("block");
        assert!(ctx.font("fancy").is_ok());
        assert_eq!(ctx.fonts().loaded_count(), 1);
    }

    #[test]
    fn text_is_centered() {
        let layout = context()
            .centered_text("test", "block", "II", &TextParams::sized(10.0))
            .unwrap();
        let bounds = layout.bounds.unwrap();
        assert!(bounds.center().coords.norm() < 1e-9);
    }

    #[test]
    fn text_without_outlines_is_rejected() {
        let result = context().centered_text("test", "block", "??", &TextParams::sized(10.0));
        assert!(matches!(result, Err(DesignError::NoGeometry { design: "test" })));
    }
}
