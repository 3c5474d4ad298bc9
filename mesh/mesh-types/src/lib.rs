//! Core mesh types for the light-fixture generators.
//!
//! This crate provides the foundational 3D types every generator and the
//! serializer share:
//!
//! - [`Triangle`] - A concrete facet with vertex positions
//! - [`IndexedMesh`] - Shared vertices plus index faces, the type generators build
//! - [`Mesh`] - A named, ordered triangle list: one printable part
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`EdgeReport`] - Boundary/non-manifold edge counts for closure checks
//!
//! # Units
//!
//! All coordinates are `f64` millimetres. Serialization narrows to `f32`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system** with Z up. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**, so normals point
//! outward by the right-hand rule.
//!
//! # Ring Builders
//!
//! Swept, lathed and extruded solids are all built from rings of vertices
//! connected by quad strips. [`IndexedMesh::connect_rings`] joins two rings
//! so that, when both rings run counter-clockwise about the direction of
//! travel from the first ring to the second, the strip faces away from that
//! axis.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Mesh, MeshTopology, Point3};
//!
//! let mut mesh = IndexedMesh::new();
//! let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(0.5, 1.0, 0.0));
//! mesh.add_triangle(a, b, c);
//!
//! let part = Mesh::from_indexed("plate", &mesh);
//! assert_eq!(part.triangle_count(), 1);
//! assert_eq!(mesh.face_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod part;
mod topology;
mod traits;
mod triangle;

// Re-export core types
pub use bounds::Aabb;
pub use mesh::{IndexedMesh, unit_cube};
pub use part::Mesh;
pub use topology::EdgeReport;
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};
