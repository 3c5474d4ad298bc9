//! Ordered 2D point sequences.

use crate::{Rect, simplify, simplify_closed};
use nalgebra::{Point2, Point3, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of 2D points, open or closed.
///
/// A closed path stores its loop once: the segment from the last point back
/// to the first is implied. Derived quantities (signed area, bounds, length)
/// are computed on demand rather than cached, so a `Path` is plain data.
///
/// # Example
///
/// ```
/// use path_types::Path;
/// use nalgebra::Point2;
///
/// let stroke = Path::open(vec![Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)]);
/// assert!(!stroke.closed);
/// assert!((stroke.length() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    /// Points in order.
    pub points: Vec<Point2<f64>>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

impl Path {
    /// Create a path with an explicit closed flag.
    #[must_use]
    pub const fn new(points: Vec<Point2<f64>>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Create an open path.
    #[must_use]
    pub const fn open(points: Vec<Point2<f64>>) -> Self {
        Self::new(points, false)
    }

    /// Create a closed loop. A repeated closing point is dropped.
    #[must_use]
    pub fn closed_loop(mut points: Vec<Point2<f64>>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self::new(points, true)
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segments in order, including the closing segment of a closed path.
    pub fn segments(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        let n = self.points.len();
        let count = if self.closed && n > 2 { n } else { n.saturating_sub(1) };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed area by the shoelace formula over the implied loop.
    ///
    /// Positive for counter-clockwise winding. Open paths are measured as if
    /// closed.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice * 0.5
    }

    /// Bounding rectangle, `None` for an empty path.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(&self.points)
    }

    /// Total length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| nalgebra::distance(&a, &b)).sum()
    }

    /// The same path traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self::new(points, self.closed)
    }

    /// Apply `f` to every point.
    #[must_use]
    pub fn map_points(&self, f: impl Fn(Point2<f64>) -> Point2<f64>) -> Self {
        Self::new(self.points.iter().map(|&p| f(p)).collect(), self.closed)
    }

    /// The path moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2<f64>) -> Self {
        self.map_points(|p| p + offset)
    }

    /// The path scaled about the origin.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.map_points(|p| Point2::from(p.coords * factor))
    }

    /// Drop consecutive points closer than `epsilon`, including a closing
    /// point that repeats the start of a closed loop.
    #[must_use]
    pub fn deduplicated(&self, epsilon: f64) -> Self {
        let mut points: Vec<Point2<f64>> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if points
                .last()
                .is_none_or(|last| nalgebra::distance(last, &p) > epsilon)
            {
                points.push(p);
            }
        }
        if self.closed && points.len() > 1 {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if nalgebra::distance(first, last) <= epsilon {
                    points.pop();
                }
            }
        }
        Self::new(points, self.closed)
    }

    /// Douglas–Peucker reduction keeping the closed flag.
    #[must_use]
    pub fn simplified(&self, tolerance: f64) -> Self {
        let points = if self.closed {
            simplify_closed(&self.points, tolerance)
        } else {
            simplify(&self.points, tolerance)
        };
        Self::new(points, self.closed)
    }

    /// `count` points spaced evenly by arc length.
    ///
    /// Open paths include both endpoints; closed paths start at the first
    /// point and stop one spacing short of it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn resample(&self, count: usize) -> Vec<Point2<f64>> {
        let total = self.length();
        if count == 0 || self.points.is_empty() {
            return Vec::new();
        }
        if total <= 0.0 || count == 1 {
            return vec![self.points[0]; count];
        }
        let spacing = if self.closed {
            total / count as f64
        } else {
            total / (count - 1) as f64
        };

        let segments: Vec<_> = self.segments().collect();
        let mut out = Vec::with_capacity(count);
        let mut seg = 0;
        let mut seg_start = 0.0;
        for i in 0..count {
            let target = (spacing * i as f64).min(total);
            while seg + 1 < segments.len() {
                let (a, b) = segments[seg];
                let len = nalgebra::distance(&a, &b);
                if seg_start + len >= target {
                    break;
                }
                seg_start += len;
                seg += 1;
            }
            let (a, b) = segments[seg];
            let len = nalgebra::distance(&a, &b);
            let t = if len > 0.0 {
                ((target - seg_start) / len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            out.push(a + (b - a) * t);
        }
        out
    }

    /// Closest point on any segment to `query`, `None` for an empty path.
    #[must_use]
    pub fn nearest_point(&self, query: &Point2<f64>) -> Option<Point2<f64>> {
        if self.points.len() == 1 {
            return Some(self.points[0]);
        }
        self.segments()
            .map(|(a, b)| closest_on_segment(query, &a, &b))
            .min_by(|p, q| {
                nalgebra::distance_squared(p, query).total_cmp(&nalgebra::distance_squared(q, query))
            })
    }

    /// Move every vertex along its averaged unit edge normal.
    ///
    /// Positive `distance` moves toward the inside of a closed loop of either
    /// winding, and toward the left of an open path. No miter correction is
    /// applied, so corners move by exactly `distance`.
    #[must_use]
    pub fn offset_inward(&self, distance: f64) -> Self {
        let n = self.points.len();
        if n < 2 {
            return self.clone();
        }
        let side = if self.closed && self.signed_area() < 0.0 {
            -distance
        } else {
            distance
        };
        let left = |a: usize, b: usize| {
            let d = self.points[b] - self.points[a];
            Vector2::new(-d.y, d.x).try_normalize(f64::EPSILON)
        };

        let points = (0..n)
            .map(|i| {
                let incoming = match i {
                    0 if self.closed => left(n - 1, 0),
                    0 => None,
                    _ => left(i - 1, i),
                };
                let outgoing = if i + 1 < n {
                    left(i, i + 1)
                } else if self.closed {
                    left(i, 0)
                } else {
                    None
                };
                let normal = match (incoming, outgoing) {
                    (Some(a), Some(b)) => (a + b).try_normalize(f64::EPSILON).unwrap_or(a),
                    (Some(v), None) | (None, Some(v)) => v,
                    (None, None) => Vector2::zeros(),
                };
                self.points[i] + normal * side
            })
            .collect();
        Self::new(points, self.closed)
    }

    /// Lift into 3D at height `z`.
    #[must_use]
    pub fn to_3d(&self, z: f64) -> Vec<Point3<f64>> {
        self.points.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
    }
}

/// Closest point to `p` on the segment `a`–`b`.
#[must_use]
fn closest_on_segment(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> Point2<f64> {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f64::EPSILON {
        return *a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}
