//! Flat tags and plates with an optional hang hole.

use std::f64::consts::{FRAC_PI_2, TAU};

use mesh_types::IndexedMesh;
use nalgebra::{Point2, Point3, Vector2};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ExtrudeError, ExtrudeResult, positive};
use crate::extrude::{loop_area, wound};

/// Material kept between a hang hole and the plate edge, in mm.
pub const MIN_HOLE_WALL: f64 = 0.8;

/// Convex outline of a plate, centered on the origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum PlateOutline {
    /// Round tag.
    Circle {
        /// Diameter in mm.
        diameter: f64,
    },
    /// Rectangle with rounded corners.
    RoundedRect {
        /// Width in mm.
        width: f64,
        /// Height in mm.
        height: f64,
        /// Corner radius, clamped to half the smaller side.
        corner_radius: f64,
    },
    /// Any convex polygon, either winding.
    Custom {
        /// Polygon vertices.
        points: Vec<Point2<f64>>,
    },
}

impl Default for PlateOutline {
    fn default() -> Self {
        Self::Circle { diameter: 30.0 }
    }
}

impl PlateOutline {
    /// Sample the outline counter-clockwise.
    ///
    /// Circles use `segments` points and each rounded corner a quarter of
    /// them; custom outlines are returned as given, rewound if needed.
    #[must_use]
    pub fn sample(&self, segments: usize) -> Vec<Point2<f64>> {
        let segments = segments.max(3);
        match self {
            Self::Circle { diameter } => circle(Point2::origin(), diameter / 2.0, segments),
            Self::RoundedRect {
                width,
                height,
                corner_radius,
            } => rounded_rect(*width, *height, *corner_radius, segments),
            Self::Custom { points } => wound(points, true),
        }
    }
}

/// `count` points on a circle, counter-clockwise from +X.
#[allow(clippy::cast_precision_loss)]
// Precision: segment counts are small
fn circle(center: Point2<f64>, radius: f64, count: usize) -> Vec<Point2<f64>> {
    let step = TAU / count as f64;
    (0..count)
        .map(|k| {
            let angle = k as f64 * step;
            center + Vector2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn rounded_rect(width: f64, height: f64, corner_radius: f64, segments: usize) -> Vec<Point2<f64>> {
    let (hx, hy) = (width / 2.0, height / 2.0);
    let r = corner_radius.clamp(0.0, hx.min(hy));
    if r <= f64::EPSILON {
        return vec![
            Point2::new(-hx, -hy),
            Point2::new(hx, -hy),
            Point2::new(hx, hy),
            Point2::new(-hx, hy),
        ];
    }

    let per_corner = (segments / 4).max(1);
    let corners = [
        (Point2::new(hx - r, -hy + r), -FRAC_PI_2),
        (Point2::new(hx - r, hy - r), 0.0),
        (Point2::new(-hx + r, hy - r), FRAC_PI_2),
        (Point2::new(-hx + r, -hy + r), 2.0 * FRAC_PI_2),
    ];
    let mut points = Vec::with_capacity(4 * (per_corner + 1));
    for (center, start) in corners {
        for k in 0..=per_corner {
            #[allow(clippy::cast_precision_loss)]
            let angle = start + FRAC_PI_2 * k as f64 / per_corner as f64;
            let p = center + Vector2::new(angle.cos(), angle.sin()) * r;
            if points.last().is_none_or(|last: &Point2<f64>| (last - p).norm() > 1e-9) {
                points.push(p);
            }
        }
    }
    if points.len() > 1 && (points[0] - points[points.len() - 1]).norm() <= 1e-9 {
        points.pop();
    }
    points
}

/// Flat plate parameters, in mm.
///
/// # Example
///
/// ```
/// use mesh_extrude::{PlateParams, plate};
///
/// let params = PlateParams::round_tag(32.0).with_thickness(2.5);
/// params.validate().unwrap();
///
/// let tag = plate(&params);
/// assert!(tag.edge_report().is_closed());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlateParams {
    /// Plate outline.
    pub outline: PlateOutline,
    /// Plate thickness.
    pub thickness: f64,
    /// Diameter of the hang hole near the top edge.
    pub hang_hole: Option<f64>,
    /// Gap between the hole and the top of the outline.
    pub hole_margin: f64,
    /// Segments for circles and rounded corners.
    pub segments: usize,
}

impl Default for PlateParams {
    fn default() -> Self {
        Self {
            outline: PlateOutline::default(),
            thickness: 3.0,
            hang_hole: Some(4.0),
            hole_margin: 2.0,
            segments: 64,
        }
    }
}

impl PlateParams {
    /// Round tag of the given diameter.
    #[must_use]
    pub fn round_tag(diameter: f64) -> Self {
        Self {
            outline: PlateOutline::Circle { diameter },
            ..Self::default()
        }
    }

    /// Rounded-rectangle tag.
    #[must_use]
    pub fn rect_tag(width: f64, height: f64, corner_radius: f64) -> Self {
        Self {
            outline: PlateOutline::RoundedRect {
                width,
                height,
                corner_radius,
            },
            ..Self::default()
        }
    }

    /// Set the thickness.
    #[must_use]
    pub const fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the hang hole diameter, or `None` for no hole.
    #[must_use]
    pub const fn with_hang_hole(mut self, diameter: Option<f64>) -> Self {
        self.hang_hole = diameter;
        self
    }

    /// Center of the hang hole for the sampled outline.
    ///
    /// The hole sits on the vertical center line of the outline's bounds,
    /// `hole_margin` below the top.
    #[must_use]
    pub fn hole_center(&self, outline: &[Point2<f64>], radius: f64) -> Point2<f64> {
        let (min_x, max_x, max_y) = outline.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(lo, hi, top), p| (lo.min(p.x), hi.max(p.x), top.max(p.y)),
        );
        Point2::new((min_x + max_x) / 2.0, max_y - self.hole_margin - radius)
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive dimensions, too few segments, a
    /// custom outline with under 3 points or a reflex corner, or a hang hole
    /// that leaves less than [`MIN_HOLE_WALL`] to any edge.
    pub fn validate(&self) -> ExtrudeResult<()> {
        positive("thickness", self.thickness)?;
        if self.segments < 8 {
            return Err(ExtrudeError::TooFewSegments {
                name: "segments",
                min: 8,
                actual: self.segments,
            });
        }
        match &self.outline {
            PlateOutline::Circle { diameter } => positive("diameter", *diameter)?,
            PlateOutline::RoundedRect { width, height, .. } => {
                positive("width", *width)?;
                positive("height", *height)?;
            }
            PlateOutline::Custom { points } => {
                if points.len() < 3 {
                    return Err(ExtrudeError::TooFewPoints {
                        min: 3,
                        actual: points.len(),
                    });
                }
                let ccw = wound(points, true);
                if loop_area(&ccw) <= 0.0 {
                    return Err(ExtrudeError::NonConvexOutline { index: 0 });
                }
                if let Some(index) = reflex_corner(&ccw) {
                    return Err(ExtrudeError::NonConvexOutline { index });
                }
            }
        }

        if let Some(diameter) = self.hang_hole {
            positive("hang_hole", diameter)?;
            positive("hole_margin", self.hole_margin)?;
            let outline = self.outline.sample(self.segments);
            let radius = diameter / 2.0;
            let center = self.hole_center(&outline, radius);
            let needed = radius + MIN_HOLE_WALL;
            let available = edge_clearance(&outline, center);
            if available < needed {
                return Err(ExtrudeError::HoleOutsideOutline {
                    radius,
                    needed,
                    available,
                });
            }
        }
        Ok(())
    }
}

/// First vertex of a CCW loop that turns clockwise.
fn reflex_corner(points: &[Point2<f64>]) -> Option<usize> {
    let n = points.len();
    (0..n).find(|&i| {
        let a = points[(i + n - 1) % n];
        let b = points[i];
        let c = points[(i + 1) % n];
        (b - a).perp(&(c - b)) < -1e-12
    })
}

/// Smallest signed distance from `p` to the edges of a CCW convex loop;
/// negative when `p` is outside.
fn edge_clearance(points: &[Point2<f64>], p: Point2<f64>) -> f64 {
    let n = points.len();
    (0..n)
        .filter_map(|i| {
            let a = points[i];
            let edge = points[(i + 1) % n] - a;
            let len = edge.norm();
            (len > f64::EPSILON).then(|| edge.perp(&(p - a)) / len)
        })
        .fold(f64::INFINITY, f64::min)
}

/// Where the ray from `origin` at `angle` leaves a convex loop.
fn ray_exit(points: &[Point2<f64>], origin: Point2<f64>, angle: f64) -> Point2<f64> {
    let d = Vector2::new(angle.cos(), angle.sin());
    let n = points.len();
    let mut best = f64::INFINITY;
    for i in 0..n {
        let a = points[i];
        let e = points[(i + 1) % n] - a;
        let denom = d.perp(&e);
        if denom.abs() <= f64::EPSILON {
            continue;
        }
        let w = a - origin;
        let s = w.perp(&e) / denom;
        let u = w.perp(&d) / denom;
        if s > 0.0 && (-1e-9..=1.0 + 1e-9).contains(&u) {
            best = best.min(s);
        }
    }
    if best.is_finite() {
        origin + d * best
    } else {
        origin
    }
}

/// Build a flat plate.
///
/// Without a hang hole the outline is extruded and fan-capped. With one,
/// the outline and the hole are resampled at shared angles around the hole
/// center (every outline corner plus every hole segment), and the top and
/// bottom become ring strips between the two loops.
#[must_use]
pub fn plate(params: &PlateParams) -> IndexedMesh {
    if let Err(err) = params.validate() {
        warn!(%err, "Plate parameters cannot be built");
        return IndexedMesh::new();
    }

    let outline = params.outline.sample(params.segments);
    let t = params.thickness;
    let lift = |points: &[Point2<f64>], z: f64| -> Vec<Point3<f64>> {
        points.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
    };

    let mut mesh = IndexedMesh::new();
    match params.hang_hole {
        None => {
            let bottom = mesh.add_ring(lift(&outline, 0.0));
            let top = mesh.add_ring(lift(&outline, t));
            mesh.cap_polygon(&bottom, true);
            mesh.connect_rings(&bottom, &top);
            mesh.cap_polygon(&top, false);
        }
        Some(diameter) => {
            let radius = diameter / 2.0;
            let center = params.hole_center(&outline, radius);
            let angles = shared_angles(&outline, center, params.segments);
            debug!(samples = angles.len(), "Resampled plate around hang hole");

            let outer: Vec<Point2<f64>> = angles
                .iter()
                .map(|&a| ray_exit(&outline, center, a))
                .collect();
            let hole: Vec<Point2<f64>> = angles
                .iter()
                .map(|&a| center + Vector2::new(a.cos(), a.sin()) * radius)
                .collect();

            let outer_bottom = mesh.add_ring(lift(&outer, 0.0));
            let outer_top = mesh.add_ring(lift(&outer, t));
            let hole_top = mesh.add_ring(lift(&hole, t));
            let hole_bottom = mesh.add_ring(lift(&hole, 0.0));
            mesh.connect_rings(&outer_bottom, &outer_top);
            mesh.connect_rings(&outer_top, &hole_top);
            mesh.connect_rings(&hole_top, &hole_bottom);
            mesh.connect_rings(&hole_bottom, &outer_bottom);
        }
    }

    info!(
        outline_points = outline.len(),
        hang_hole = ?params.hang_hole,
        faces = mesh.faces.len(),
        "Generated plate"
    );
    mesh
}

/// Sorted angles around `center`: one per hole segment and one per outline
/// corner, with near-duplicates merged.
fn shared_angles(outline: &[Point2<f64>], center: Point2<f64>, segments: usize) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let mut angles: Vec<f64> = (0..segments)
        .map(|k| TAU * k as f64 / segments as f64)
        .chain(
            outline
                .iter()
                .map(|p| (p.y - center.y).atan2(p.x - center.x).rem_euclid(TAU)),
        )
        .collect();
    angles.sort_by(f64::total_cmp);
    angles.dedup_by(|b, a| (*b - *a).abs() < 1e-9);
    if angles.len() > 1 && TAU - angles[angles.len() - 1] + angles[0] < 1e-9 {
        angles.pop();
    }
    angles
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshBounds, MeshTopology};
    use std::f64::consts::PI;

    #[allow(clippy::cast_precision_loss)]
    fn polygon_area(radius: f64, segments: usize) -> f64 {
        0.5 * segments as f64 * radius * radius * (TAU / segments as f64).sin()
    }

    #[test]
    fn round_tag_without_hole() {
        let params = PlateParams::round_tag(30.0).with_hang_hole(None);
        let mesh = plate(&params);
        assert!(mesh.edge_report().is_closed());
        assert_relative_eq!(
            mesh.signed_volume(),
            polygon_area(15.0, 64) * 3.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn rect_tag_with_hole() {
        let params = PlateParams::rect_tag(40.0, 25.0, 0.0).with_thickness(2.0);
        let mesh = plate(&params);
        assert!(mesh.edge_report().is_closed());

        let full = 40.0 * 25.0 * 2.0;
        let v = mesh.signed_volume();
        assert!(v <= full - polygon_area(2.0, 64) * 2.0 + 1e-9);
        assert!(v >= full - PI * 4.0 * 2.0 - 1e-9);

        let bounds = mesh.bounds();
        assert_relative_eq!(bounds.max.x, 20.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.y, 12.5, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.z, 2.0);
    }

    #[test]
    fn rounded_corners_shrink_the_area() {
        let sharp = PlateParams::rect_tag(30.0, 20.0, 0.0).with_hang_hole(None);
        let round = PlateParams::rect_tag(30.0, 20.0, 5.0).with_hang_hole(None);
        let sharp_v = plate(&sharp).signed_volume();
        let round_v = plate(&round).signed_volume();
        assert_relative_eq!(sharp_v, 30.0 * 20.0 * 3.0, epsilon = 1e-9);
        // Corner arcs are inscribed, so they cut a little more than a true fillet
        assert!(round_v < sharp_v - (100.0 - 25.0 * PI) * 3.0 + 1e-9);
        assert!(round_v > sharp_v - 100.0 * 3.0);
    }

    #[test]
    fn outline_is_counter_clockwise() {
        for outline in [
            PlateOutline::Circle { diameter: 10.0 },
            PlateOutline::RoundedRect {
                width: 10.0,
                height: 6.0,
                corner_radius: 2.0,
            },
            PlateOutline::Custom {
                points: vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(0.0, 5.0),
                    Point2::new(5.0, 0.0),
                ],
            },
        ] {
            let points = outline.sample(32);
            assert!(loop_area(&points) > 0.0);
            assert!(reflex_corner(&points).is_none());
        }
    }

    #[test]
    fn custom_shield_with_hole() {
        let params = PlateParams {
            outline: PlateOutline::Custom {
                points: vec![
                    Point2::new(0.0, -15.0),
                    Point2::new(12.0, -5.0),
                    Point2::new(12.0, 12.0),
                    Point2::new(-12.0, 12.0),
                    Point2::new(-12.0, -5.0),
                ],
            },
            ..PlateParams::default()
        };
        params.validate().unwrap();
        let mesh = plate(&params);
        assert!(mesh.edge_report().is_closed());
        assert!(mesh.signed_volume() > 0.0);
        // Every outline corner survives the resampling
        for corner in [(0.0, -15.0), (12.0, -5.0), (-12.0, 12.0)] {
            assert!(
                mesh.vertices
                    .iter()
                    .any(|p| (p.x - corner.0).abs() < 1e-9 && (p.y - corner.1).abs() < 1e-9)
            );
        }
    }

    #[test]
    fn validation() {
        let concave = PlateParams {
            outline: PlateOutline::Custom {
                points: vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(10.0, 0.0),
                    Point2::new(5.0, 2.0),
                    Point2::new(10.0, 10.0),
                    Point2::new(0.0, 10.0),
                ],
            },
            ..PlateParams::default()
        };
        assert!(matches!(
            concave.validate(),
            Err(ExtrudeError::NonConvexOutline { index: 2 })
        ));

        let tiny = PlateParams::round_tag(6.0).with_hang_hole(Some(5.0));
        assert!(matches!(
            tiny.validate(),
            Err(ExtrudeError::HoleOutsideOutline { .. })
        ));
        assert!(plate(&tiny).is_empty());

        assert!(matches!(
            PlateParams::round_tag(-1.0).validate(),
            Err(ExtrudeError::NonPositive { name: "diameter", .. })
        ));
    }
}
