//! Tube sweeps along a centerline.
//!
//! A sweep places one copy of a cross-section at every centerline point,
//! oriented by that point's [`Frame`], and stitches consecutive copies with
//! quad strips. The cross-section is a disc, an annulus (hollow), or the
//! upper/lower half of either (split-half). Split halves are swept directly
//! as half-sections, so the cut face is part of each half's wall and no
//! clipping is needed.

use std::f64::consts::TAU;

use mesh_types::{IndexedMesh, Mesh};
use nalgebra::Point3;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SweepError, SweepResult};
use crate::frame::{Frame, FrameMode, sweep_frames};

/// Part name of an unsplit tube.
pub const TUBE_PART: &str = "tube";
/// Part name of the upper split half.
pub const TUBE_TOP: &str = "tube_top";
/// Part name of the lower split half.
pub const TUBE_BOTTOM: &str = "tube_bottom";

/// Fewest radial segments a ring may have.
pub const MIN_SEGMENTS: usize = 3;

/// Consecutive centerline points closer than this are merged.
const DUPLICATE_EPSILON: f64 = 1e-9;

/// Centerline plus circular cross-section.
///
/// # Example
///
/// ```
/// use mesh_from_curves::{SweepSpec, sweep_tube};
/// use mesh_types::MeshTopology;
/// use nalgebra::Point3;
///
/// let spec = SweepSpec::new(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0)],
///     5.0,
/// )
/// .with_segments(16);
///
/// let mesh = sweep_tube(&spec);
/// assert_eq!(mesh.face_count(), 16 * 2 + 2 * 14);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepSpec {
    /// Centerline points in order.
    pub path: Vec<Point3<f64>>,
    /// Outer radius of the tube.
    pub radius: f64,
    /// Bore radius for hollow tubes.
    pub inner_radius: Option<f64>,
    /// Vertices per ring.
    pub radial_segments: usize,
    /// Build two halves cut along each ring's in-plane diameter.
    pub split: bool,
    /// Join the last ring back to the first instead of capping.
    pub closed: bool,
    /// Frame orientation rule.
    pub frame_mode: FrameMode,
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            radius: 1.0,
            inner_radius: None,
            radial_segments: 16,
            split: false,
            closed: false,
            frame_mode: FrameMode::Planar,
        }
    }
}

impl SweepSpec {
    /// Solid, unsplit tube of `radius` along `path`.
    #[must_use]
    pub fn new(path: Vec<Point3<f64>>, radius: f64) -> Self {
        Self {
            path,
            radius,
            ..Self::default()
        }
    }

    /// Neon-style channel: hollow, split into printable halves.
    ///
    /// `diameter` is the outer tube diameter; the bore leaves `wall` of
    /// material.
    #[must_use]
    pub fn neon_channel(path: Vec<Point3<f64>>, diameter: f64, wall: f64) -> Self {
        let radius = diameter / 2.0;
        Self::new(path, radius)
            .with_inner_radius(radius - wall)
            .with_segments(24)
            .split_half()
    }

    /// Set the bore radius.
    #[must_use]
    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = Some(inner_radius);
        self
    }

    /// Set the number of radial segments.
    #[must_use]
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.radial_segments = segments;
        self
    }

    /// Request split-half output.
    #[must_use]
    pub fn split_half(mut self) -> Self {
        self.split = true;
        self
    }

    /// Treat the centerline as a loop.
    #[must_use]
    pub fn closed_loop(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Set the frame orientation rule.
    #[must_use]
    pub fn with_frame_mode(mut self, mode: FrameMode) -> Self {
        self.frame_mode = mode;
        self
    }

    /// Check the structural minimums.
    ///
    /// # Errors
    ///
    /// Returns an error if the centerline has fewer than 2 distinct points
    /// (3 for a closed loop), the radius is not positive, the bore does not
    /// fit inside the tube, or fewer than 3 segments are requested.
    pub fn validate(&self) -> SweepResult<()> {
        let min = if self.closed { 3 } else { 2 };
        let distinct = dedup_centerline(&self.path, self.closed).len();
        if distinct < min {
            return Err(SweepError::TooFewPoints {
                min,
                actual: distinct,
            });
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SweepError::InvalidRadius(self.radius));
        }
        if let Some(inner) = self.inner_radius {
            if !(inner.is_finite() && inner > 0.0 && inner < self.radius) {
                return Err(SweepError::InvalidInnerRadius {
                    inner,
                    outer: self.radius,
                });
            }
        }
        if self.radial_segments < MIN_SEGMENTS {
            return Err(SweepError::TooFewSegments {
                min: MIN_SEGMENTS,
                actual: self.radial_segments,
            });
        }
        Ok(())
    }
}

/// The two pieces of a split-half sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TubeHalves {
    /// Half on the binormal side of the cut (z ≥ 0 for planar paths).
    pub top: IndexedMesh,
    /// Half on the opposite side.
    pub bottom: IndexedMesh,
}

/// Sweep the whole tube, ignoring the split flag.
///
/// Degenerate input (fewer than 2 distinct points, non-positive radius)
/// gives an empty mesh.
#[must_use]
pub fn sweep_tube(spec: &SweepSpec) -> IndexedMesh {
    let Some(centerline) = Centerline::prepare(spec, false) else {
        return IndexedMesh::new();
    };
    let section = Section::full(spec.radius, centerline.inner, centerline.segments);
    let mesh = centerline.sweep(&section);
    info!(
        points = centerline.points.len(),
        faces = mesh.faces.len(),
        hollow = centerline.inner.is_some(),
        closed = centerline.closed,
        "Swept tube"
    );
    mesh
}

/// Sweep the tube as two halves cut by the plane of each ring's tangent
/// and in-plane normal.
///
/// An odd segment count is bumped by one so the cut passes through ring
/// vertices. Each half is closed by flat seam faces along the cut.
#[must_use]
pub fn sweep_halves(spec: &SweepSpec) -> TubeHalves {
    let Some(centerline) = Centerline::prepare(spec, true) else {
        return TubeHalves::default();
    };
    let segments = centerline.segments;
    let top = centerline.sweep(&Section::half(spec.radius, centerline.inner, segments, true));
    let bottom = centerline.sweep(&Section::half(spec.radius, centerline.inner, segments, false));
    info!(
        points = centerline.points.len(),
        top_faces = top.faces.len(),
        bottom_faces = bottom.faces.len(),
        hollow = centerline.inner.is_some(),
        "Swept split tube"
    );
    TubeHalves { top, bottom }
}

/// Sweep into named parts: `tube_top` and `tube_bottom` when split,
/// otherwise a single `tube`.
#[must_use]
pub fn sweep_parts(spec: &SweepSpec) -> Vec<Mesh> {
    if spec.split {
        let halves = sweep_halves(spec);
        vec![
            Mesh::from_indexed(TUBE_TOP, &halves.top),
            Mesh::from_indexed(TUBE_BOTTOM, &halves.bottom),
        ]
    } else {
        vec![Mesh::from_indexed(TUBE_PART, &sweep_tube(spec))]
    }
}

/// Drop consecutive repeats, and the closing repeat of a loop.
fn dedup_centerline(points: &[Point3<f64>], closed: bool) -> Vec<Point3<f64>> {
    let mut out: Vec<Point3<f64>> = Vec::with_capacity(points.len());
    for &p in points {
        if out
            .last()
            .is_none_or(|last| nalgebra::distance(last, &p) > DUPLICATE_EPSILON)
        {
            out.push(p);
        }
    }
    if closed && out.len() > 1 {
        if let (Some(first), Some(last)) = (out.first(), out.last()) {
            if nalgebra::distance(first, last) <= DUPLICATE_EPSILON {
                out.pop();
            }
        }
    }
    out
}

/// Sanitized centerline with its frames.
struct Centerline {
    points: Vec<Point3<f64>>,
    frames: Vec<Frame>,
    closed: bool,
    inner: Option<f64>,
    segments: usize,
}

impl Centerline {
    fn prepare(spec: &SweepSpec, even_segments: bool) -> Option<Self> {
        let points = dedup_centerline(&spec.path, spec.closed);
        if points.len() < 2 {
            warn!(
                points = points.len(),
                "Sweep centerline has fewer than 2 distinct points"
            );
            return None;
        }
        if !(spec.radius.is_finite() && spec.radius > 0.0) {
            warn!(radius = spec.radius, "Sweep radius is not positive");
            return None;
        }

        let closed = spec.closed && points.len() >= 3;
        if spec.closed && !closed {
            warn!("Closed sweep needs 3 points, sweeping as an open tube");
        }

        let inner = spec
            .inner_radius
            .filter(|&r| r.is_finite() && r > 0.0 && r < spec.radius);
        if spec.inner_radius.is_some() && inner.is_none() {
            warn!(
                inner = spec.inner_radius,
                outer = spec.radius,
                "Bore does not fit, sweeping a solid tube"
            );
        }

        let mut segments = spec.radial_segments.max(MIN_SEGMENTS);
        if even_segments && segments % 2 == 1 {
            segments += 1;
        }

        let frames = sweep_frames(&points, closed, spec.frame_mode);
        debug!(
            points = points.len(),
            segments,
            mode = ?spec.frame_mode,
            "Computed sweep frames"
        );

        Some(Self {
            points,
            frames,
            closed,
            inner,
            segments,
        })
    }

    fn sweep(&self, section: &Section) -> IndexedMesh {
        let ring_len = section.points.len();
        let mut mesh = IndexedMesh::with_capacity(
            self.points.len() * ring_len,
            self.points.len() * ring_len * 4,
        );

        let rings: Vec<Vec<u32>> = self
            .points
            .iter()
            .zip(&self.frames)
            .map(|(center, frame)| {
                mesh.add_ring(
                    section
                        .points
                        .iter()
                        .map(|&(u, v)| frame.local_point(center, u, v)),
                )
            })
            .collect();

        let ring_count = rings.len();
        let spans = if self.closed {
            ring_count
        } else {
            ring_count - 1
        };
        for i in 0..spans {
            let (a, b) = (&rings[i], &rings[(i + 1) % ring_count]);
            for section_loop in &section.loops {
                mesh.connect_rings(&pick(a, section_loop), &pick(b, section_loop));
            }
        }

        if !self.closed {
            if let (Some(first), Some(last)) = (rings.first(), rings.last()) {
                section.cap.build(&mut mesh, first, false);
                section.cap.build(&mut mesh, last, true);
            }
        }
        mesh
    }
}

fn pick(ring: &[u32], indices: &[usize]) -> Vec<u32> {
    indices.iter().map(|&k| ring[k]).collect()
}

/// How a section's open ends are closed.
enum Cap {
    /// Convex polygon filled by a fan from its first vertex.
    Fan(Vec<usize>),
    /// Quad band between an outer and an inner run of vertices.
    Band {
        outer: Vec<usize>,
        inner: Vec<usize>,
        wrap: bool,
    },
}

impl Cap {
    /// Close one ring. `forward` caps face along the tangent (end of the
    /// tube), the others face back (start of the tube).
    fn build(&self, mesh: &mut IndexedMesh, ring: &[u32], forward: bool) {
        match self {
            Self::Fan(polygon) => mesh.cap_polygon(&pick(ring, polygon), !forward),
            Self::Band { outer, inner, wrap } => {
                let (outer, inner) = (pick(ring, outer), pick(ring, inner));
                let (from, to) = if forward {
                    (&outer, &inner)
                } else {
                    (&inner, &outer)
                };
                if *wrap {
                    mesh.connect_rings(from, to);
                } else {
                    mesh.connect_strip(from, to);
                }
            }
        }
    }
}

/// Cross-section in frame coordinates `(u, v)` along (normal, binormal).
struct Section {
    points: Vec<(f64, f64)>,
    /// Closed loops swept into walls, each counter-clockwise about the
    /// tangent as seen from the solid's outside.
    loops: Vec<Vec<usize>>,
    cap: Cap,
}

impl Section {
    fn full(radius: f64, inner: Option<f64>, segments: usize) -> Self {
        let outer_arc = arc(radius, segments, 0..segments);
        let outer: Vec<usize> = (0..segments).collect();
        match inner {
            None => Self {
                points: outer_arc,
                loops: vec![outer.clone()],
                cap: Cap::Fan(outer),
            },
            Some(inner_radius) => {
                let mut points = outer_arc;
                points.extend(arc(inner_radius, segments, 0..segments));
                let inner: Vec<usize> = (segments..2 * segments).collect();
                Self {
                    points,
                    loops: vec![outer.clone(), inner.iter().rev().copied().collect()],
                    cap: Cap::Band {
                        outer,
                        inner,
                        wrap: true,
                    },
                }
            }
        }
    }

    fn half(radius: f64, inner: Option<f64>, segments: usize, upper: bool) -> Self {
        let half = segments / 2;
        let range = if upper { 0..=half } else { half..=segments };
        let outer_arc = arc(radius, segments, range.clone());
        let outer: Vec<usize> = (0..=half).collect();
        match inner {
            None => Self {
                points: outer_arc,
                loops: vec![outer.clone()],
                cap: Cap::Fan(outer),
            },
            Some(inner_radius) => {
                let mut points = outer_arc;
                points.extend(arc(inner_radius, segments, range));
                let inner: Vec<usize> = (half + 1..=2 * half + 1).collect();
                let boundary = outer.iter().chain(inner.iter().rev()).copied().collect();
                Self {
                    points,
                    loops: vec![boundary],
                    cap: Cap::Band {
                        outer,
                        inner,
                        wrap: false,
                    },
                }
            }
        }
    }
}

/// Circle samples at `k · 2π / segments` for each `k` in `steps`.
///
/// Samples on the cut line are snapped so both halves share an exact seam.
fn arc(radius: f64, segments: usize, steps: impl Iterator<Item = usize>) -> Vec<(f64, f64)> {
    steps
        .map(|k| {
            if k == 0 || k == segments {
                (radius, 0.0)
            } else if 2 * k == segments {
                (-radius, 0.0)
            } else {
                #[allow(clippy::cast_precision_loss)]
                // Precision: segment counts are small
                let angle = TAU * k as f64 / segments as f64;
                (radius * angle.cos(), radius * angle.sin())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::MeshTopology;

    fn straight(length: f64) -> Vec<Point3<f64>> {
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(length, 0.0, 0.0)]
    }

    fn bent() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(20.0, 0.0, 0.0),
            Point3::new(30.0, 15.0, 0.0),
            Point3::new(30.0, 40.0, 0.0),
        ]
    }

    /// Area of a regular polygon inscribed in a circle.
    #[allow(clippy::cast_precision_loss)]
    fn polygon_area(radius: f64, segments: usize) -> f64 {
        0.5 * segments as f64 * radius * radius * (TAU / segments as f64).sin()
    }

    #[test]
    fn vertical_tube_triangle_count() {
        let spec = SweepSpec::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0)],
            5.0,
        )
        .with_segments(16);
        let mesh = sweep_tube(&spec);
        assert_eq!(mesh.face_count(), 60);
        assert!(mesh.edge_report().is_closed());
        assert_relative_eq!(
            mesh.signed_volume(),
            polygon_area(5.0, 16) * 10.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn bent_solid_tube_is_closed() {
        let mesh = sweep_tube(&SweepSpec::new(bent(), 2.0).with_segments(12));
        assert_eq!(mesh.face_count(), 3 * 12 * 2 + 2 * 10);
        assert!(mesh.edge_report().is_closed());
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn hollow_tube_volume() {
        let spec = SweepSpec::new(straight(10.0), 3.0)
            .with_inner_radius(2.0)
            .with_segments(20);
        let mesh = sweep_tube(&spec);
        assert_eq!(mesh.face_count(), 20 * 4 + 20 * 4);
        assert!(mesh.edge_report().is_closed());
        let expected = (polygon_area(3.0, 20) - polygon_area(2.0, 20)) * 10.0;
        assert_relative_eq!(mesh.signed_volume(), expected, epsilon = 1e-9);
    }

    #[test]
    fn split_halves_are_closed_and_sum_to_whole() {
        for inner in [None, Some(1.5)] {
            let mut spec = SweepSpec::new(bent(), 2.5).with_segments(16).split_half();
            spec.inner_radius = inner;
            let halves = sweep_halves(&spec);
            let whole = sweep_tube(&spec);

            assert!(halves.top.edge_report().is_closed());
            assert!(halves.bottom.edge_report().is_closed());
            assert!(halves.top.signed_volume() > 0.0);
            assert!(halves.bottom.signed_volume() > 0.0);
            assert_relative_eq!(
                halves.top.signed_volume() + halves.bottom.signed_volume(),
                whole.signed_volume(),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn split_halves_sit_on_either_side_of_the_plane() {
        let spec = SweepSpec::new(bent(), 2.0).with_segments(12).split_half();
        let halves = sweep_halves(&spec);
        assert!(halves.top.vertices.iter().all(|p| p.z >= -1e-12));
        assert!(halves.bottom.vertices.iter().all(|p| p.z <= 1e-12));
        assert!(halves.top.vertices.iter().any(|p| p.z > 1.9));
        assert!(halves.bottom.vertices.iter().any(|p| p.z < -1.9));
    }

    #[test]
    fn odd_split_segments_are_bumped() {
        let spec = SweepSpec::new(straight(5.0), 1.0).with_segments(7).split_half();
        let halves = sweep_halves(&spec);
        // 8 segments: 5 arc vertices per ring, 3 fan triangles per cap
        assert_eq!(halves.top.vertex_count(), 10);
        assert_eq!(halves.top.face_count(), 5 * 2 + 2 * 3);
        assert!(halves.top.edge_report().is_closed());
    }

    #[test]
    fn closed_loop_has_no_caps() {
        let square = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(20.0, 0.0, 0.0),
            Point3::new(20.0, 20.0, 0.0),
            Point3::new(0.0, 20.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        let spec = SweepSpec::new(square, 1.0).with_segments(10).closed_loop();
        let mesh = sweep_tube(&spec);
        assert_eq!(mesh.face_count(), 4 * 10 * 2);
        assert!(mesh.edge_report().is_closed());
        assert!(mesh.signed_volume() > 0.0);

        let halves = sweep_halves(&spec);
        assert!(halves.top.edge_report().is_closed());
        assert!(halves.bottom.edge_report().is_closed());
    }

    #[test]
    fn parts_are_named() {
        let parts = sweep_parts(&SweepSpec::neon_channel(bent(), 8.0, 1.2));
        let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, [TUBE_TOP, TUBE_BOTTOM]);
        assert!(parts.iter().all(|p| p.edge_report().is_closed()));

        let single = sweep_parts(&SweepSpec::new(bent(), 1.0));
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].name, TUBE_PART);
    }

    #[test]
    fn degenerate_input_is_empty() {
        let one = vec![Point3::new(1.0, 1.0, 1.0); 3];
        assert!(sweep_tube(&SweepSpec::new(one.clone(), 1.0)).faces.is_empty());
        assert!(sweep_tube(&SweepSpec::new(straight(1.0), 0.0)).faces.is_empty());
        assert!(sweep_halves(&SweepSpec::new(one, 1.0)).top.faces.is_empty());
    }

    #[test]
    fn duplicate_points_are_skipped() {
        let mut path = straight(10.0);
        path.insert(1, path[0]);
        path.push(path[2]);
        let mesh = sweep_tube(&SweepSpec::new(path, 1.0).with_segments(8));
        assert_eq!(mesh.face_count(), 8 * 2 + 2 * 6);
    }

    #[test]
    fn bad_bore_falls_back_to_solid() {
        let spec = SweepSpec::new(straight(10.0), 1.0)
            .with_inner_radius(2.0)
            .with_segments(8);
        assert!(spec.validate().is_err());
        let mesh = sweep_tube(&spec);
        assert_eq!(mesh.face_count(), 8 * 2 + 2 * 6);
    }

    #[test]
    fn validation() {
        assert!(SweepSpec::new(bent(), 1.0).validate().is_ok());
        assert!(matches!(
            SweepSpec::new(vec![Point3::origin()], 1.0).validate(),
            Err(SweepError::TooFewPoints { min: 2, actual: 1 })
        ));
        assert!(matches!(
            SweepSpec::new(straight(1.0), 1.0).closed_loop().validate(),
            Err(SweepError::TooFewPoints { min: 3, .. })
        ));
        assert!(matches!(
            SweepSpec::new(bent(), f64::NAN).validate(),
            Err(SweepError::InvalidRadius(_))
        ));
        assert!(matches!(
            SweepSpec::new(bent(), 1.0).with_segments(2).validate(),
            Err(SweepError::TooFewSegments { min: 3, actual: 2 })
        ));
    }

    #[test]
    fn parallel_transport_sweep_is_closed() {
        let helix: Vec<_> = (0..40)
            .map(|i| {
                let a = f64::from(i) * 0.3;
                Point3::new(10.0 * a.cos(), 10.0 * a.sin(), f64::from(i) * 0.5)
            })
            .collect();
        let spec = SweepSpec::new(helix, 1.0)
            .with_inner_radius(0.6)
            .with_frame_mode(FrameMode::ParallelTransport);
        let mesh = sweep_tube(&spec);
        assert!(mesh.edge_report().is_closed());
        assert!(mesh.signed_volume() > 0.0);
    }
}
