//! `render`: design record to STL files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use fixture_designs::{Design, DesignContext, DesignRecord, export_parts};
use glyph_centerline::{FontCache, JsonFontSource};
use mesh_io::StlEncoding;
use tracing::info;

/// Where fonts come from.
#[derive(Debug, Clone)]
pub struct FontOptions {
    pub dir: PathBuf,
    pub fallback: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl FontOptions {
    fn context(&self) -> DesignContext {
        let mut cache = FontCache::new(Arc::new(JsonFontSource::new(&self.dir)));
        if let Some(ms) = self.timeout_ms {
            cache = cache.with_timeout(Duration::from_millis(ms));
        }
        let ctx = DesignContext::new(cache);
        match &self.fallback {
            Some(font) => ctx.with_fallback_font(font.clone()),
            None => ctx,
        }
    }
}

pub fn run(
    design: &Path,
    fonts: &FontOptions,
    out: &Path,
    encoding: StlEncoding,
) -> Result<Vec<PathBuf>> {
    let json = std::fs::read_to_string(design)
        .with_context(|| format!("Failed to read {}", design.display()))?;
    let record = DesignRecord::from_json(&json)
        .with_context(|| format!("Failed to parse {}", design.display()))?;
    info!(design = record.kind(), path = %design.display(), "Rendering design");

    let parts = record
        .parts(&fonts.context())
        .with_context(|| format!("Failed to generate {}", record.kind()))?;
    export_parts(&parts, out, encoding)
        .with_context(|| format!("Failed to write parts to {}", out.display()))
}
