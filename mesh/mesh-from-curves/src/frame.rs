//! Ring frames along a sweep path.
//!
//! Every path point gets a direction and two unit vectors spanning the
//! plane normal to it. Ring vertices are placed at
//! `center + r·(cos a · normal + sin a · binormal)`, and `normal × binormal`
//! equals the tangent, so rings wind counter-clockwise about the direction
//! of travel.

use nalgebra::{Point3, UnitVector3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reference frame at a point on a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Tangent direction (forward along the path).
    pub tangent: Vector3<f64>,
    /// In-plane direction, perpendicular to the tangent.
    pub normal: Vector3<f64>,
    /// `tangent × normal`; "up" for paths lying in the XY plane.
    pub binormal: Vector3<f64>,
}

/// How ring frames are oriented along the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameMode {
    /// Normal lies in the XY plane and binormal points up (+Z side).
    ///
    /// Paths drawn in the XY plane keep a horizontal seam, which the
    /// split-half mode relies on.
    #[default]
    Planar,
    /// Rotation-minimizing frames, for paths that leave the XY plane.
    ParallelTransport,
}

impl Frame {
    /// A frame around `tangent` with an arbitrary perpendicular normal.
    #[must_use]
    pub fn from_tangent(tangent: Vector3<f64>) -> Self {
        let tangent = tangent.try_normalize(f64::EPSILON).unwrap_or(Vector3::z());
        let normal = find_perpendicular(tangent);
        Self::completed(tangent, normal)
    }

    /// A frame whose normal is horizontal (`Z × tangent`) so the binormal
    /// points up. Falls back to [`Frame::from_tangent`] for vertical tangents.
    #[must_use]
    pub fn planar(tangent: Vector3<f64>) -> Self {
        let tangent = tangent.try_normalize(f64::EPSILON).unwrap_or(Vector3::x());
        match Vector3::z().cross(&tangent).try_normalize(1e-9) {
            Some(normal) => Self::completed(tangent, normal),
            None => Self::from_tangent(tangent),
        }
    }

    fn completed(tangent: Vector3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }

    /// Point on the ring of `radius` around `center` at `angle` radians.
    #[must_use]
    pub fn ring_point(&self, center: &Point3<f64>, radius: f64, angle: f64) -> Point3<f64> {
        self.local_point(center, radius * angle.cos(), radius * angle.sin())
    }

    /// Point at local coordinates `(u, v)` along (normal, binormal).
    #[must_use]
    pub fn local_point(&self, center: &Point3<f64>, u: f64, v: f64) -> Point3<f64> {
        center + self.normal * u + self.binormal * v
    }
}

/// Find a unit vector perpendicular to `v`.
fn find_perpendicular(v: Vector3<f64>) -> Vector3<f64> {
    // Choose the axis most perpendicular to v
    let abs_x = v.x.abs();
    let abs_y = v.y.abs();
    let abs_z = v.z.abs();

    let perp = if abs_x <= abs_y && abs_x <= abs_z {
        Vector3::x()
    } else if abs_y <= abs_z {
        Vector3::y()
    } else {
        Vector3::z()
    };

    v.cross(&perp)
        .try_normalize(f64::EPSILON)
        .unwrap_or(Vector3::y())
}

/// Direction of travel at each path point.
///
/// The first point looks toward the next one, the last point looks back
/// from the previous one, interior points average the unit incoming and
/// outgoing directions. Closed loops treat every point as interior. A
/// hairpin whose average vanishes keeps the incoming direction.
#[must_use]
pub fn path_directions(points: &[Point3<f64>], closed: bool) -> Vec<Vector3<f64>> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    let unit = |from: usize, to: usize| (points[to] - points[from]).try_normalize(f64::EPSILON);

    (0..n)
        .map(|i| {
            let incoming = if i > 0 {
                unit(i - 1, i)
            } else if closed {
                unit(n - 1, 0)
            } else {
                None
            };
            let outgoing = if i + 1 < n {
                unit(i, i + 1)
            } else if closed {
                unit(n - 1, 0)
            } else {
                None
            };
            match (incoming, outgoing) {
                (Some(a), Some(b)) => (a + b).try_normalize(1e-9).unwrap_or(a),
                (Some(d), None) | (None, Some(d)) => d,
                (None, None) => Vector3::x(),
            }
        })
        .collect()
}

/// Frames for every path point using the requested orientation rule.
#[must_use]
pub fn sweep_frames(points: &[Point3<f64>], closed: bool, mode: FrameMode) -> Vec<Frame> {
    let directions = path_directions(points, closed);
    match mode {
        FrameMode::Planar => directions.into_iter().map(Frame::planar).collect(),
        FrameMode::ParallelTransport => parallel_transport_frames(&directions),
    }
}

/// Rotation-minimizing frames along a sequence of directions.
///
/// The first frame is planar; each following frame is the previous one
/// rotated onto the new tangent.
///
/// # Example
///
/// ```
/// use mesh_from_curves::{parallel_transport_frames, path_directions};
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 1.0),
/// ];
///
/// let frames = parallel_transport_frames(&path_directions(&points, false));
/// assert_eq!(frames.len(), 3);
/// ```
#[must_use]
pub fn parallel_transport_frames(directions: &[Vector3<f64>]) -> Vec<Frame> {
    let Some(&first) = directions.first() else {
        return Vec::new();
    };

    let mut frames = Vec::with_capacity(directions.len());
    frames.push(Frame::planar(first));
    for &tangent in &directions[1..] {
        let prev = frames[frames.len() - 1];
        frames.push(transport(&prev, tangent));
    }
    frames
}

/// Transport a frame from its tangent to `new_tangent`.
fn transport(prev: &Frame, new_tangent: Vector3<f64>) -> Frame {
    let new_tangent = new_tangent
        .try_normalize(f64::EPSILON)
        .unwrap_or(prev.tangent);

    let axis = prev.tangent.cross(&new_tangent);
    if axis.norm() < f64::EPSILON {
        if prev.tangent.dot(&new_tangent) > 0.0 {
            return Frame {
                tangent: new_tangent,
                ..*prev
            };
        }
        // Half turn about the normal keeps the frame right-handed
        return Frame {
            tangent: new_tangent,
            normal: prev.normal,
            binormal: -prev.binormal,
        };
    }

    let k = UnitVector3::new_normalize(axis).into_inner();
    let angle = prev.tangent.dot(&new_tangent).clamp(-1.0, 1.0).acos();
    let (sin_a, cos_a) = angle.sin_cos();

    // Rodrigues rotation formula
    let rotate = |v: Vector3<f64>| v * cos_a + k.cross(&v) * sin_a + k * k.dot(&v) * (1.0 - cos_a);

    Frame {
        tangent: new_tangent,
        normal: rotate(prev.normal),
        binormal: rotate(prev.binormal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_right_handed(frame: &Frame) {
        assert_relative_eq!(frame.tangent.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.normal.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.binormal.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.tangent.dot(&frame.normal), 0.0, epsilon = 1e-10);
        assert_relative_eq!(
            frame.normal.cross(&frame.binormal),
            frame.tangent,
            epsilon = 1e-10
        );
    }

    #[test]
    fn planar_frame_points_up() {
        let frame = Frame::planar(Vector3::x());
        assert_right_handed(&frame);
        assert_relative_eq!(frame.normal, Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.binormal, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn planar_frame_vertical_fallback() {
        let frame = Frame::planar(Vector3::z());
        assert_right_handed(&frame);
    }

    #[test]
    fn ring_point_follows_frame() {
        let frame = Frame::planar(Vector3::x());
        let p = frame.ring_point(&Point3::origin(), 2.0, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn directions_follow_rule() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let dirs = path_directions(&points, false);
        assert_relative_eq!(dirs[0], Vector3::x());
        assert_relative_eq!(dirs[1], Vector3::new(1.0, 1.0, 0.0).normalize(), epsilon = 1e-12);
        assert_relative_eq!(dirs[2], Vector3::y());
    }

    #[test]
    fn closed_directions_wrap() {
        let square = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let dirs = path_directions(&square, true);
        assert_relative_eq!(dirs[0], Vector3::new(1.0, -1.0, 0.0).normalize(), epsilon = 1e-12);
    }

    #[test]
    fn hairpin_keeps_incoming() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        let dirs = path_directions(&points, false);
        assert_relative_eq!(dirs[1], Vector3::x());
    }

    #[test]
    fn parallel_transport_stays_orthonormal() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.5),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
        ];
        let frames = sweep_frames(&points, false, FrameMode::ParallelTransport);
        assert_eq!(frames.len(), 5);
        for frame in &frames {
            assert_right_handed(frame);
        }
    }

    #[test]
    fn parallel_transport_reversal_is_right_handed() {
        let prev = Frame::planar(Vector3::x());
        let flipped = transport(&prev, -Vector3::x());
        assert_right_handed(&flipped);
    }

    #[test]
    fn too_short_paths_have_no_frames() {
        assert!(path_directions(&[Point3::origin()], false).is_empty());
        assert!(parallel_transport_frames(&[]).is_empty());
        assert!(sweep_frames(&[], true, FrameMode::Planar).is_empty());
    }
}
