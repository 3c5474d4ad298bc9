//! Named triangle-list meshes: one printable part each.

use crate::{Aabb, EdgeReport, IndexedMesh, MeshBounds, MeshTopology, Triangle, topology};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named, ordered list of triangles forming one printable part.
///
/// Triangle order is irrelevant to validity but preserved so that output is
/// deterministic. Parts are what the serializer writes, one file each
/// (`tube_top`, `tube_bottom`, `diffuser_cap`, ...).
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, Mesh};
///
/// let part = Mesh::from_indexed("cube", &unit_cube());
/// assert_eq!(part.name, "cube");
/// assert_eq!(part.triangle_count(), 12);
/// assert!(part.edge_report().is_closed());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Part name, also used for the serialized header and file name.
    pub name: String,
    /// Facets in generation order.
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty part.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::new(),
        }
    }

    /// Create a part from explicit triangles.
    #[must_use]
    pub fn from_triangles(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
        }
    }

    /// Expand an indexed mesh into a named part, preserving face order.
    #[must_use]
    pub fn from_indexed(name: impl Into<String>, mesh: &IndexedMesh) -> Self {
        Self {
            name: name.into(),
            triangles: mesh.triangles().collect(),
        }
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// `true` when the part has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append all triangles of `other`, keeping this part's name.
    pub fn extend_from(&mut self, other: &Self) {
        self.triangles.extend_from_slice(&other.triangles);
    }

    /// Append the faces of an indexed mesh.
    pub fn append_indexed(&mut self, mesh: &IndexedMesh) {
        self.triangles.extend(mesh.triangles());
    }

    /// Translate every vertex.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for tri in &mut self.triangles {
            tri.v0 += offset;
            tri.v1 += offset;
            tri.v2 += offset;
        }
    }

    /// Signed volume; positive for closed, outward-wound parts.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| t.v0.coords.dot(&t.v1.coords.cross(&t.v2.coords)))
            .sum::<f64>()
            / 6.0
    }

    /// Edge usage after welding vertices with bit-identical positions.
    ///
    /// Generators share ring vertices, so seams between surfaces weld
    /// exactly and a closed solid reports zero boundary edges.
    #[must_use]
    pub fn edge_report(&self) -> EdgeReport {
        let mut ids: HashMap<[u64; 3], u32> = HashMap::new();
        let mut key = |p: &Point3<f64>| -> u32 {
            // +0.0 folds -0.0 onto 0.0 so both weld together
            let bits = [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits(), (p.z + 0.0).to_bits()];
            let next = u32::try_from(ids.len()).unwrap_or(u32::MAX);
            *ids.entry(bits).or_insert(next)
        };
        let faces: Vec<[u32; 3]> = self
            .triangles
            .iter()
            .map(|t| [key(&t.v0), key(&t.v1), key(&t.v2)])
            .collect();
        topology::edge_report(faces.into_iter())
    }
}

impl MeshBounds for Mesh {
    fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for tri in &self.triangles {
            for v in tri.vertices() {
                aabb.expand_to_include(&v);
            }
        }
        aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_cube;
    use approx::assert_relative_eq;

    #[test]
    fn from_indexed_preserves_order() {
        let cube = unit_cube();
        let part = Mesh::from_indexed("cube", &cube);
        for (i, tri) in part.triangles.iter().enumerate() {
            assert_eq!(Some(*tri), cube.triangle(i));
        }
        assert_relative_eq!(part.signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn welding_closes_shared_positions() {
        let part = Mesh::from_indexed("cube", &unit_cube());
        let report = part.edge_report();
        assert_eq!(report.edge_count, 18);
        assert!(report.is_closed());
    }

    #[test]
    fn dropping_a_face_opens_the_part() {
        let mut part = Mesh::from_indexed("cube", &unit_cube());
        part.triangles.pop();
        assert_eq!(part.edge_report().boundary_edges, 3);
    }

    #[test]
    fn translate_moves_bounds() {
        let mut part = Mesh::from_indexed("cube", &unit_cube());
        part.translate(Vector3::new(0.0, 0.0, 5.0));
        let b = part.bounds();
        assert_relative_eq!(b.min.z, 5.0);
        assert_relative_eq!(b.max.z, 6.0);
        assert!(Mesh::new("empty").bounds_opt().is_none());
    }

    #[test]
    fn extend_keeps_name() {
        let mut a = Mesh::from_indexed("a", &unit_cube());
        let b = Mesh::from_indexed("b", &unit_cube());
        a.extend_from(&b);
        assert_eq!(a.name, "a");
        assert_eq!(a.triangle_count(), 24);
    }
}
