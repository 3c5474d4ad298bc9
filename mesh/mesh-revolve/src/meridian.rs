//! Meridian loops: the primitive every revolved solid is built from.
//!
//! A meridian loop is a closed sequence of rings in the (r, z) half-plane.
//! Traversed counter-clockwise (up the outside, inward across the top, down
//! the inside, outward across the bottom) and revolved about the Z axis,
//! it gives a closed solid with outward-facing winding.

use std::f64::consts::TAU;

use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::{debug, warn};

/// Radii below this collapse to a point on the axis.
pub const RADIUS_EPSILON: f64 = 1e-6;

/// One station of a meridian loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Ring {
    /// Circle of constant radius at height `z`.
    Circle {
        /// Radius.
        radius: f64,
        /// Height.
        z: f64,
    },
    /// Ring at height `z` whose radius varies with angle.
    ///
    /// `radii[j]` is the radius at angle `j · 2π / radii.len()`. When the
    /// revolve uses a different segment count, the nearest sample is used.
    Varying {
        /// Radius per angular step.
        radii: Vec<f64>,
        /// Height.
        z: f64,
    },
    /// A single point on the axis.
    Apex {
        /// Height.
        z: f64,
    },
}

impl Ring {
    /// Circle, or an apex when `radius` is below [`RADIUS_EPSILON`].
    #[must_use]
    pub fn circle(radius: f64, z: f64) -> Self {
        if radius < RADIUS_EPSILON {
            Self::Apex { z }
        } else {
            Self::Circle { radius, z }
        }
    }

    /// Height of the ring.
    #[must_use]
    pub const fn z(&self) -> f64 {
        match self {
            Self::Circle { z, .. } | Self::Varying { z, .. } | Self::Apex { z } => *z,
        }
    }

    /// `true` for an axis point, including rings too small to resolve.
    #[must_use]
    pub fn is_apex(&self) -> bool {
        match self {
            Self::Apex { .. } => true,
            Self::Circle { radius, .. } => *radius < RADIUS_EPSILON,
            Self::Varying { radii, .. } => radii.iter().all(|&r| r < RADIUS_EPSILON),
        }
    }

    fn radius_at(&self, j: usize, segments: usize) -> f64 {
        match self {
            Self::Circle { radius, .. } => *radius,
            Self::Varying { radii, .. } if radii.is_empty() => 0.0,
            Self::Varying { radii, .. } => radii[j * radii.len() / segments],
            Self::Apex { .. } => 0.0,
        }
    }
}

/// Vertices emitted for one ring.
enum Station {
    Loop(Vec<u32>),
    Point(u32),
}

/// Revolve a closed meridian loop about the Z axis.
///
/// Consecutive rings are joined by quad strips, a ring next to an apex by a
/// triangle fan, and two consecutive apexes by nothing (they lie on the
/// axis). The last ring joins the first.
///
/// # Example
///
/// ```
/// use mesh_revolve::{Ring, revolve};
///
/// // Solid cylinder: bottom center, bottom rim, top rim, top center
/// let meridian = [
///     Ring::Apex { z: 0.0 },
///     Ring::circle(5.0, 0.0),
///     Ring::circle(5.0, 10.0),
///     Ring::Apex { z: 10.0 },
/// ];
/// let mesh = revolve(&meridian, 32);
/// assert!(mesh.edge_report().is_closed());
/// assert!(mesh.signed_volume() > 0.0);
/// ```
#[must_use]
pub fn revolve(meridian: &[Ring], segments: usize) -> IndexedMesh {
    if meridian.len() < 2 || segments < 3 {
        warn!(
            rings = meridian.len(),
            segments, "Meridian too short to revolve"
        );
        return IndexedMesh::new();
    }

    #[allow(clippy::cast_precision_loss)]
    // Precision: segment counts are small
    let angles: Vec<(f64, f64)> = (0..segments)
        .map(|j| (TAU * j as f64 / segments as f64).sin_cos())
        .collect();

    let mut mesh = IndexedMesh::with_capacity(
        meridian.len() * segments,
        meridian.len() * segments * 2,
    );
    let stations: Vec<Station> = meridian
        .iter()
        .map(|ring| {
            let z = ring.z();
            if ring.is_apex() {
                Station::Point(mesh.add_vertex(Point3::new(0.0, 0.0, z)))
            } else {
                Station::Loop(mesh.add_ring(angles.iter().enumerate().map(|(j, &(s, c))| {
                    let r = ring.radius_at(j, segments);
                    Point3::new(r * c, r * s, z)
                })))
            }
        })
        .collect();

    let n = stations.len();
    for i in 0..n {
        match (&stations[i], &stations[(i + 1) % n]) {
            (Station::Loop(a), Station::Loop(b)) => mesh.connect_rings(a, b),
            (Station::Loop(a), Station::Point(apex)) => mesh.fan_to_apex(a, *apex),
            (Station::Point(apex), Station::Loop(b)) => mesh.fan_from_apex(*apex, b),
            (Station::Point(_), Station::Point(_)) => {}
        }
    }

    debug!(
        rings = n,
        segments,
        faces = mesh.faces.len(),
        "Revolved meridian loop"
    );
    mesh
}

/// Floor and bottom of a cup whose bore of `bore_radius` ends at `floor_z`.
///
/// Continues a meridian that has come down the inside wall: across the
/// floor, then down a through-hole to `z = 0` when `hole_radius` is given,
/// or along the axis otherwise. The loop then returns outward across the
/// bottom to its first ring.
#[must_use]
pub fn cup_floor(bore_radius: f64, floor_z: f64, hole_radius: Option<f64>) -> Vec<Ring> {
    match hole_radius.filter(|&r| r >= RADIUS_EPSILON && r < bore_radius) {
        Some(hole) => vec![
            Ring::circle(bore_radius, floor_z),
            Ring::circle(hole, floor_z),
            Ring::circle(hole, 0.0),
        ],
        None => vec![
            Ring::circle(bore_radius, floor_z),
            Ring::Apex { z: floor_z },
            Ring::Apex { z: 0.0 },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::MeshTopology;

    #[allow(clippy::cast_precision_loss)]
    fn polygon_area(radius: f64, segments: usize) -> f64 {
        0.5 * segments as f64 * radius * radius * (TAU / segments as f64).sin()
    }

    #[test]
    fn solid_cylinder() {
        let meridian = [
            Ring::Apex { z: 0.0 },
            Ring::circle(2.0, 0.0),
            Ring::circle(2.0, 5.0),
            Ring::Apex { z: 5.0 },
        ];
        let mesh = revolve(&meridian, 24);
        assert_eq!(mesh.face_count(), 24 * 4);
        assert!(mesh.edge_report().is_closed());
        assert_relative_eq!(
            mesh.signed_volume(),
            polygon_area(2.0, 24) * 5.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn tube_with_rims() {
        let meridian = [
            Ring::circle(3.0, 0.0),
            Ring::circle(3.0, 4.0),
            Ring::circle(2.0, 4.0),
            Ring::circle(2.0, 0.0),
        ];
        let mesh = revolve(&meridian, 16);
        assert!(mesh.edge_report().is_closed());
        let expected = (polygon_area(3.0, 16) - polygon_area(2.0, 16)) * 4.0;
        assert_relative_eq!(mesh.signed_volume(), expected, epsilon = 1e-9);
    }

    #[test]
    fn small_circle_becomes_apex() {
        assert!(Ring::circle(1e-9, 1.0).is_apex());
        assert!(!Ring::circle(0.1, 1.0).is_apex());
        let cone = [Ring::circle(1.0, 0.0), Ring::circle(0.0, 3.0), Ring::Apex { z: 0.0 }];
        let mesh = revolve(&cone, 12);
        assert!(mesh.edge_report().is_closed());
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn varying_ring_is_sampled_per_angle() {
        let bumpy: Vec<f64> = (0..8).map(|j| if j % 2 == 0 { 2.0 } else { 1.5 }).collect();
        let meridian = [
            Ring::Apex { z: 0.0 },
            Ring::Varying {
                radii: bumpy.clone(),
                z: 0.0,
            },
            Ring::Varying { radii: bumpy, z: 1.0 },
            Ring::Apex { z: 1.0 },
        ];
        let mesh = revolve(&meridian, 8);
        assert!(mesh.edge_report().is_closed());
        assert_relative_eq!(mesh.vertices[1].x, 2.0);
        assert_relative_eq!(
            nalgebra::Vector2::new(mesh.vertices[2].x, mesh.vertices[2].y).norm(),
            1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn cup_floor_with_and_without_hole() {
        for hole in [None, Some(1.0)] {
            let mut meridian = vec![Ring::circle(4.0, 0.0), Ring::circle(4.0, 6.0)];
            meridian.push(Ring::circle(3.0, 6.0));
            meridian.extend(cup_floor(3.0, 1.5, hole));
            let mesh = revolve(&meridian, 20);
            assert!(mesh.edge_report().is_closed());
            let hole_area = hole.map_or(0.0, |r| polygon_area(r, 20) * 1.5);
            let expected =
                polygon_area(4.0, 20) * 6.0 - polygon_area(3.0, 20) * 4.5 - hole_area;
            assert_relative_eq!(mesh.signed_volume(), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn too_short_is_empty() {
        assert!(revolve(&[Ring::circle(1.0, 0.0)], 12).faces.is_empty());
        assert!(revolve(&[Ring::circle(1.0, 0.0), Ring::Apex { z: 1.0 }], 2)
            .faces
            .is_empty());
    }
}
