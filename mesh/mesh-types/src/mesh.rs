//! Indexed triangle mesh and ring builders.

use crate::{Aabb, EdgeReport, MeshBounds, MeshTopology, Triangle, topology};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Generators build this type: shared vertices keep ring seams exact, so
/// a closed solid stays closed once it is expanded into a [`crate::Mesh`].
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Point3};
///
/// let mut mesh = IndexedMesh::new();
/// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
/// let d = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// mesh.add_quad(a, b, c, d);
///
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.face_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Append a vertex and return its index.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: indices are u32, meshes past 4B vertices are unsupported
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Append a ring (or arc) of vertices and return their indices in order.
    pub fn add_ring(&mut self, points: impl IntoIterator<Item = Point3<f64>>) -> Vec<u32> {
        points.into_iter().map(|p| self.add_vertex(p)).collect()
    }

    /// Append one triangle.
    #[inline]
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.faces.push([a, b, c]);
    }

    /// Append a quad `a → b → c → d` as the triangles `[a, b, c]` and `[a, c, d]`.
    #[inline]
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.faces.push([a, b, c]);
        self.faces.push([a, c, d]);
    }

    /// Join two closed rings with a quad strip, wrapping the last vertex to the first.
    ///
    /// With both rings counter-clockwise about the direction from `from` to
    /// `to`, the strip faces away from that axis. Swapping the arguments
    /// flips the strip. Rings of unequal length are joined up to the shorter.
    pub fn connect_rings(&mut self, from: &[u32], to: &[u32]) {
        let n = from.len().min(to.len());
        if n < 2 {
            return;
        }
        for j in 0..n {
            let k = (j + 1) % n;
            self.add_quad(from[j], from[k], to[k], to[j]);
        }
    }

    /// Join two open arcs with a quad strip (no wrap-around quad).
    pub fn connect_strip(&mut self, from: &[u32], to: &[u32]) {
        let n = from.len().min(to.len());
        for j in 1..n {
            self.add_quad(from[j - 1], from[j], to[j], to[j - 1]);
        }
    }

    /// Close a ring onto a single apex vertex that lies ahead of it.
    ///
    /// Same orientation rule as [`Self::connect_rings`] with `to` collapsed
    /// to the apex.
    pub fn fan_to_apex(&mut self, ring: &[u32], apex: u32) {
        let n = ring.len();
        if n < 2 {
            return;
        }
        for j in 0..n {
            self.add_triangle(ring[j], ring[(j + 1) % n], apex);
        }
    }

    /// Open a ring out of a single apex vertex that lies behind it.
    pub fn fan_from_apex(&mut self, apex: u32, ring: &[u32]) {
        let n = ring.len();
        if n < 2 {
            return;
        }
        for j in 0..n {
            self.add_triangle(apex, ring[(j + 1) % n], ring[j]);
        }
    }

    /// Fill a convex polygon with a fan anchored at its first vertex.
    ///
    /// Produces `ring.len() - 2` triangles. The fill faces along the axis the
    /// ring winds counter-clockwise about; `reverse` faces it the other way.
    pub fn cap_polygon(&mut self, ring: &[u32], reverse: bool) {
        for k in 1..ring.len().saturating_sub(1) {
            if reverse {
                self.add_triangle(ring[0], ring[k + 1], ring[k]);
            } else {
                self.add_triangle(ring[0], ring[k], ring[k + 1]);
            }
        }
    }

    /// Translate mesh by the given vector.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for position in &mut self.vertices {
            *position += offset;
        }
    }

    /// Scale mesh uniformly around the origin.
    pub fn scale(&mut self, factor: f64) {
        for position in &mut self.vertices {
            position.coords *= factor;
        }
    }

    /// Signed volume by the divergence theorem.
    ///
    /// Positive for a closed mesh with outward-facing winding, negative when
    /// inside-out, meaningless for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles().map(|tri| signed_tetra_volume(&tri)).sum::<f64>() / 6.0
    }

    /// Absolute volume.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Reverse the winding of every face.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }

    /// Append another mesh, offsetting its face indices.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: faces index vertices with u32
    pub fn merge(&mut self, other: &Self) {
        let vertex_offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| [f[0] + vertex_offset, f[1] + vertex_offset, f[2] + vertex_offset]),
        );
    }

    /// Edge usage counts computed on vertex indices.
    #[must_use]
    pub fn edge_report(&self) -> EdgeReport {
        topology::edge_report(self.faces.iter().copied())
    }
}

fn signed_tetra_volume(tri: &Triangle) -> f64 {
    tri.v0.coords.dot(&tri.v1.coords.cross(&tri.v2.coords))
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Point3<f64>> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            *self.vertices.get(i0 as usize)?,
            *self.vertices.get(i1 as usize)?,
            *self.vertices.get(i2 as usize)?,
        ))
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.faces.iter().copied()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}

/// Unit cube from (0,0,0) to (1,1,1) with outward-facing winding.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(8, 12);
    let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    let bottom = mesh.add_ring(square.iter().map(|&(x, y)| Point3::new(x, y, 0.0)));
    let top = mesh.add_ring(square.iter().map(|&(x, y)| Point3::new(x, y, 1.0)));
    mesh.connect_rings(&bottom, &top);
    mesh.cap_polygon(&bottom, true);
    mesh.cap_polygon(&top, false);
    mesh
}
