//! `bulb` and `reflector`: parametric generators without a design file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use fixture_designs::{BulbShell, Design, DesignContext, REFLECTOR, ScrewBase, export_parts};
use glyph_centerline::{FontCache, InMemoryFontSource};
use mesh_io::StlEncoding;
use mesh_revolve::{BulbShape, ReflectorParams, reflector as build_reflector};
use mesh_types::Mesh;

fn parse_base(base: &str) -> Result<Option<ScrewBase>> {
    Ok(match base.to_ascii_lowercase().as_str() {
        "e26" => Some(ScrewBase::E26),
        "e27" => Some(ScrewBase::E27),
        "e12" => Some(ScrewBase::E12),
        "none" => None,
        other => bail!("unknown screw base '{other}' (expected e26, e27, e12 or none)"),
    })
}

pub fn bulb(shape: &str, height: f64, diameter: f64, wall: f64, base: &str) -> Result<Vec<Mesh>> {
    let shape: BulbShape = shape.parse()?;
    let design = BulbShell {
        wall_thickness: wall,
        base: parse_base(base)?,
        ..BulbShell::new(shape, height, diameter)
    };
    // Lathed parts never touch fonts
    let ctx = DesignContext::new(FontCache::new(Arc::new(InMemoryFontSource::new())));
    design.parts(&ctx).context("Failed to generate bulb")
}

pub fn reflector(seat_radius: f64, depth: f64, beam_angle: f64, wall: f64) -> Result<Vec<Mesh>> {
    let params = ReflectorParams::new(seat_radius, depth, beam_angle).with_wall_thickness(wall);
    params.validate().context("Invalid reflector")?;
    Ok(vec![Mesh::from_indexed(REFLECTOR, &build_reflector(&params))])
}

pub fn save(parts: &[Mesh], out: &Path, encoding: StlEncoding) -> Result<Vec<PathBuf>> {
    export_parts(parts, out, encoding)
        .with_context(|| format!("Failed to write parts to {}", out.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulb_parts() -> Result<()> {
        let parts = bulb("Pear", 100.0, 55.0, 1.4, "e27")?;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].name, "screw_base");

        let bare = bulb("dome", 40.0, 40.0, 1.2, "none")?;
        assert_eq!(bare.len(), 1);

        assert!(bulb("cone", 100.0, 55.0, 1.4, "e27").is_err());
        assert!(bulb("globe", 100.0, 55.0, 1.4, "gu10").is_err());
        assert!(bulb("globe", 100.0, 55.0, 40.0, "e26").is_err());
        Ok(())
    }

    #[test]
    fn reflector_is_checked_then_saved() -> Result<()> {
        assert!(reflector(10.0, 15.0, 190.0, 1.2).is_err());

        let parts = reflector(10.0, 15.0, 45.0, 1.2)?;
        let dir = tempfile::tempdir()?;
        let written = save(&parts, dir.path(), StlEncoding::Binary)?;
        assert_eq!(written, vec![dir.path().join("reflector.stl")]);
        Ok(())
    }
}
