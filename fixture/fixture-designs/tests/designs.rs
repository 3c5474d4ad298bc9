//! End-to-end design generation with an in-memory font.
//!
//! Run with: cargo test -p fixture-designs --test designs

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use approx::assert_relative_eq;
use fixture_designs::{
    BulbShell, Design, DesignContext, DesignError, DesignRecord, IlluminatedLetters, ImageTrace,
    NeonSign, PetTag, TagText, TubeSection, export_parts,
};
use glyph_centerline::{FontCache, FontOutlines, InMemoryFontSource, OutlineCommand};
use mesh_io::{StlEncoding, load_stl};
use mesh_revolve::BulbShape;
use mesh_types::Mesh;

// =============================================================================
// Fixtures
// =============================================================================

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<OutlineCommand> {
    vec![
        OutlineCommand::MoveTo { x: x0, y: y0 },
        OutlineCommand::LineTo { x: x1, y: y0 },
        OutlineCommand::LineTo { x: x1, y: y1 },
        OutlineCommand::LineTo { x: x0, y: y1 },
        OutlineCommand::Close,
    ]
}

/// Block font with a bar `I` and a rectangular `O`.
fn block_font() -> FontOutlines {
    let mut o = rect(0.0, 0.0, 500.0, 700.0);
    o.extend(rect(100.0, 100.0, 400.0, 600.0));
    FontOutlines::new(1000.0)
        .with_glyph('I', 250.0, rect(0.0, 0.0, 100.0, 700.0))
        .with_glyph('O', 600.0, o)
        .with_glyph(' ', 300.0, Vec::new())
}

fn context() -> DesignContext {
    let source = InMemoryFontSource::new().with_font("block", block_font());
    DesignContext::new(FontCache::new(Arc::new(source)))
}

fn thin_tube() -> TubeSection {
    TubeSection {
        diameter: 5.0,
        wall_thickness: Some(0.8),
        ..TubeSection::default()
    }
}

fn assert_printable(parts: &[Mesh]) {
    for part in parts {
        assert!(!part.is_empty(), "{} is empty", part.name);
        assert!(part.edge_report().is_closed(), "{} is open", part.name);
        assert!(part.signed_volume() > 0.0, "{} is inside out", part.name);
    }
}

fn names(parts: &[Mesh]) -> Vec<&str> {
    parts.iter().map(|p| p.name.as_str()).collect()
}

fn min_z(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .flat_map(|t| t.vertices())
        .map(|v| v.z)
        .fold(f64::INFINITY, f64::min)
}

// =============================================================================
// Text designs
// =============================================================================

#[test]
fn neon_sign_gives_two_closed_halves() {
    let sign = NeonSign::new("IO")
        .with_font("block")
        .with_size(100.0)
        .with_tube(thin_tube());
    let parts = sign.parts(&context()).unwrap();
    assert_eq!(names(&parts), ["tube_top", "tube_bottom"]);
    assert_printable(&parts);
}

#[test]
fn unsplit_neon_sign_is_one_tube() {
    let tube = TubeSection {
        split: false,
        ..thin_tube()
    };
    let sign = NeonSign::new("I O").with_font("block").with_size(100.0).with_tube(tube);
    let parts = sign.parts(&context()).unwrap();
    assert_eq!(names(&parts), ["tube"]);
    assert_printable(&parts);
}

#[test]
fn text_errors_are_typed() {
    let ctx = context();
    assert!(matches!(
        NeonSign::new("  ").with_font("block").parts(&ctx),
        Err(DesignError::EmptyText { design: "neon_sign" })
    ));
    assert!(matches!(
        NeonSign::new("IO").with_font("missing").parts(&ctx),
        Err(DesignError::Font(_))
    ));
    assert!(matches!(
        NeonSign::new("??").with_font("block").parts(&ctx),
        Err(DesignError::NoGeometry { .. })
    ));

    let fallback = context().with_fallback_font("block");
    let sign = NeonSign::new("IO").with_font("missing").with_tube(thin_tube());
    assert!(sign.parts(&fallback).is_ok());
}

#[test]
fn illuminated_letters_housing_and_diffuser() {
    let letters = IlluminatedLetters::new("IO").with_font("block").with_size(100.0);
    let parts = letters.parts(&context()).unwrap();
    assert_eq!(names(&parts), ["letter_housing", "letter_diffuser"]);
    assert_printable(&parts);
    // The diffuser is printed flat
    assert_relative_eq!(min_z(&parts[1]), 0.0);
}

// =============================================================================
// Tag
// =============================================================================

#[test]
fn tag_text_sits_on_the_plate() {
    let tag = PetTag::round(40.0).with_text(TagText {
        text: "IO".to_string(),
        font: "block".to_string(),
        size: 10.0,
        height: 1.2,
    });
    let parts = tag.parts(&context()).unwrap();
    assert_eq!(names(&parts), ["tag_body", "tag_text"]);
    assert_printable(&parts);
    assert_relative_eq!(min_z(&parts[1]), tag.thickness, epsilon = 1e-9);

    // Lettering is pushed below the hang hole
    assert!(tag.text_center().y < 0.0);
    assert_relative_eq!(tag.text_center().x, 0.0, epsilon = 1e-9);
}

#[test]
fn plain_tag_has_no_text_part() {
    let tag = PetTag {
        hang_hole: None,
        ..PetTag::round(30.0)
    };
    let parts = tag.parts(&context()).unwrap();
    assert_eq!(names(&parts), ["tag_body"]);
    assert_printable(&parts);
    assert_relative_eq!(tag.text_center().y, 0.0, epsilon = 1e-9);
}

// =============================================================================
// Lathed and traced designs
// =============================================================================

#[test]
fn every_bulb_shape_prints() {
    for shape in BulbShape::ALL {
        let parts = BulbShell::new(shape, 100.0, 60.0).parts(&context()).unwrap();
        assert_eq!(names(&parts), ["bulb_shell", "screw_base"], "{shape}");
        assert_printable(&parts);
    }
}

fn ring_image(size: usize, inset: usize, width: usize) -> Vec<u8> {
    let mut pixels = vec![255u8; size * size];
    for y in inset..size - inset {
        for x in inset..size - inset {
            let edge = x.min(y).min(size - 1 - x).min(size - 1 - y);
            if edge < inset + width {
                pixels[y * size + x] = 0;
            }
        }
    }
    pixels
}

#[test]
fn traced_ring_becomes_tubes() {
    let design = ImageTrace::new(40, 40, ring_image(40, 5, 3)).with_tube(TubeSection {
        diameter: 2.0,
        wall_thickness: Some(0.4),
        ..TubeSection::default()
    });
    let parts = design.parts(&context()).unwrap();
    assert_eq!(names(&parts), ["tube_top", "tube_bottom"]);
    assert_printable(&parts);
}

#[test]
fn trace_buffer_is_checked() {
    let design = ImageTrace::new(10, 10, vec![0; 99]);
    assert!(matches!(design.validate(), Err(DesignError::Trace(_))));

    let blank = ImageTrace::new(10, 10, vec![255; 100]);
    assert!(matches!(
        blank.parts(&context()),
        Err(DesignError::NoGeometry { design: "image_trace" })
    ));
}

// =============================================================================
// JSON to files
// =============================================================================

#[test]
fn json_record_to_stl_files() {
    let record = DesignRecord::from_json(
        r#"{"design": "neon_sign", "text": "OI", "font": "block", "size": 100,
            "tube": {"diameter": 5, "wall_thickness": 0.8, "segments": 16}}"#,
    )
    .unwrap();
    let parts = record.parts(&context()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let paths = export_parts(&parts, dir.path(), StlEncoding::Ascii).unwrap();
    assert_eq!(paths.len(), 2);
    for (path, part) in paths.iter().zip(&parts) {
        let loaded = load_stl(path).unwrap();
        assert_eq!(loaded.triangle_count(), part.triangle_count());
    }
}
