//! Straight extrusion of planar regions.

use mesh_types::IndexedMesh;
use nalgebra::{Point2, Point3};
use tracing::debug;

use crate::triangulate::triangulate;

/// Signed shoelace area of a closed loop (positive when CCW).
pub(crate) fn loop_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

/// Copy of `points` wound counter-clockwise (`ccw`) or clockwise.
pub(crate) fn wound(points: &[Point2<f64>], ccw: bool) -> Vec<Point2<f64>> {
    let mut out = points.to_vec();
    if (loop_area(&out) > 0.0) != ccw {
        out.reverse();
    }
    out
}

fn lift(mesh: &mut IndexedMesh, points: &[Point2<f64>], z: f64) -> Vec<u32> {
    mesh.add_ring(points.iter().map(|p| Point3::new(p.x, p.y, z)))
}

/// Fill the region bounded by `rings` (outer first) with triangles facing
/// +Z, or -Z when `down`.
fn fill(mesh: &mut IndexedMesh, loops: &[Vec<Point2<f64>>], rings: &[Vec<u32>], down: bool) {
    let Some((outer, holes)) = loops.split_first() else {
        return;
    };
    let lookup: Vec<u32> = rings.iter().flatten().copied().collect();
    for [a, b, c] in triangulate(outer, holes) {
        if down {
            mesh.add_triangle(lookup[a], lookup[c], lookup[b]);
        } else {
            mesh.add_triangle(lookup[a], lookup[b], lookup[c]);
        }
    }
}

/// Orient an outline CCW and its holes CW, dropping holes under 3 points.
pub(crate) fn oriented_loops(
    outer: &[Point2<f64>],
    holes: &[Vec<Point2<f64>>],
) -> Vec<Vec<Point2<f64>>> {
    std::iter::once(wound(outer, true))
        .chain(
            holes
                .iter()
                .filter(|h| h.len() >= 3)
                .map(|h| wound(h, false)),
        )
        .collect()
}

/// Extrude a polygon with holes between `z0` and `z1`.
///
/// The loops may wind either way. Walls follow every loop and both faces
/// are triangulated with [`triangulate`], so the result is closed with
/// outward normals. An outline under 3 points or `z1 <= z0` gives an empty
/// mesh.
///
/// # Example
///
/// ```
/// use mesh_extrude::extrude_region;
/// use nalgebra::Point2;
///
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ];
/// let slab = extrude_region(&square, &[], 0.0, 1.0);
/// assert!((slab.signed_volume() - 4.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn extrude_region(
    outer: &[Point2<f64>],
    holes: &[Vec<Point2<f64>>],
    z0: f64,
    z1: f64,
) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    if outer.len() < 3 || z1 <= z0 {
        return mesh;
    }

    let loops = oriented_loops(outer, holes);
    let bottom: Vec<Vec<u32>> = loops.iter().map(|l| lift(&mut mesh, l, z0)).collect();
    let top: Vec<Vec<u32>> = loops.iter().map(|l| lift(&mut mesh, l, z1)).collect();

    for (b, t) in bottom.iter().zip(&top) {
        mesh.connect_rings(b, t);
    }
    fill(&mut mesh, &loops, &top, false);
    fill(&mut mesh, &loops, &bottom, true);

    debug!(
        loops = loops.len(),
        faces = mesh.faces.len(),
        "Extruded region"
    );
    mesh
}

/// Extrude an open-topped tray: a floor slab with walls standing on its rim.
///
/// `loops` (outline CCW, then holes CW) bound the footprint; `inner_loops`
/// are the same loops moved into the material by the wall thickness, in the
/// same order. The solid fills the footprint from `0` to `floor`, and the
/// band between each loop and its moved copy from `floor` up to `depth`.
pub(crate) fn extrude_tray(
    loops: &[Vec<Point2<f64>>],
    inner_loops: &[Vec<Point2<f64>>],
    floor: f64,
    depth: f64,
) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    if loops.is_empty() || loops.len() != inner_loops.len() {
        return mesh;
    }

    let base: Vec<Vec<u32>> = loops.iter().map(|l| lift(&mut mesh, l, 0.0)).collect();
    let rim: Vec<Vec<u32>> = loops.iter().map(|l| lift(&mut mesh, l, depth)).collect();
    let lip: Vec<Vec<u32>> = inner_loops
        .iter()
        .map(|l| lift(&mut mesh, l, depth))
        .collect();
    let floor_top: Vec<Vec<u32>> = inner_loops
        .iter()
        .map(|l| lift(&mut mesh, l, floor))
        .collect();

    // Cross-section of each wall: base → rim → lip → floor top
    for i in 0..loops.len() {
        mesh.connect_rings(&base[i], &rim[i]);
        mesh.connect_rings(&rim[i], &lip[i]);
        mesh.connect_rings(&lip[i], &floor_top[i]);
    }
    fill(&mut mesh, loops, &base, true);
    fill(&mut mesh, inner_loops, &floor_top, false);
    mesh
}
