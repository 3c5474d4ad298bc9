//! Douglas–Peucker polyline reduction.
//!
//! Works on any point type implementing [`PathPoint`], which covers both the
//! 2D centerlines coming out of the extractors and 3D sweep paths.

use nalgebra::{Point2, Point3};

/// Distance queries the simplifier needs from a point type.
pub trait PathPoint: Copy {
    /// Euclidean distance to `other`.
    fn distance_to(&self, other: &Self) -> f64;

    /// Perpendicular distance to the line through `a` and `b`.
    ///
    /// When `a` and `b` coincide the chord has no direction and the
    /// Euclidean distance to `a` is returned instead.
    fn distance_to_chord(&self, a: &Self, b: &Self) -> f64;
}

/// Chords shorter than this are treated as a single point.
const DEGENERATE_CHORD: f64 = 1e-12;

impl PathPoint for Point2<f64> {
    fn distance_to(&self, other: &Self) -> f64 {
        nalgebra::distance(self, other)
    }

    fn distance_to_chord(&self, a: &Self, b: &Self) -> f64 {
        let chord = b - a;
        let len = chord.norm();
        if len <= DEGENERATE_CHORD {
            return self.distance_to(a);
        }
        let rel = self - a;
        (chord.x * rel.y - chord.y * rel.x).abs() / len
    }
}

impl PathPoint for Point3<f64> {
    fn distance_to(&self, other: &Self) -> f64 {
        nalgebra::distance(self, other)
    }

    fn distance_to_chord(&self, a: &Self, b: &Self) -> f64 {
        let chord = b - a;
        let len = chord.norm();
        if len <= DEGENERATE_CHORD {
            return self.distance_to(a);
        }
        chord.cross(&(self - a)).norm() / len
    }
}

/// Reduce `points` to the vertices needed to stay within `tolerance`.
///
/// Paths of two points or fewer are returned unchanged. Otherwise the point
/// farthest from the first→last chord is kept when it lies more than
/// `tolerance` away and both halves are reduced the same way; when every
/// point is within tolerance only the endpoints remain. Ties keep the
/// earliest point, which makes the reduction idempotent.
///
/// Spans are processed from an explicit stack, so long paths cannot
/// exhaust the call stack; the output is the same as the recursive form.
///
/// # Example
///
/// ```
/// use path_types::simplify;
/// use nalgebra::Point2;
///
/// let line = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.01),
///     Point2::new(2.0, 0.0),
/// ];
/// assert_eq!(simplify(&line, 0.1), vec![line[0], line[2]]);
/// ```
#[must_use]
pub fn simplify<P: PathPoint>(points: &[P], tolerance: f64) -> Vec<P> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }
    let tolerance = if tolerance >= 0.0 { tolerance } else { 0.0 };

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0, n - 1)];
    while let Some((first, last)) = spans.pop() {
        if last <= first + 1 {
            continue;
        }
        let (a, b) = (&points[first], &points[last]);
        let mut max_dist = 0.0;
        let mut split = first;
        for (i, p) in points.iter().enumerate().take(last).skip(first + 1) {
            let d = p.distance_to_chord(a, b);
            if d > max_dist {
                max_dist = d;
                split = i;
            }
        }
        if max_dist > tolerance {
            keep[split] = true;
            spans.push((split, last));
            spans.push((first, split));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Reduce a closed loop stored without its repeated closing point.
///
/// The loop is reduced as `p0 … pn, p0`, so the first chord is degenerate
/// and the farthest point from `p0` anchors the split. The loop start is
/// always kept and the closing duplicate is dropped again.
#[must_use]
pub fn simplify_closed<P: PathPoint>(points: &[P], tolerance: f64) -> Vec<P> {
    if points.len() <= 3 {
        return points.to_vec();
    }
    let mut ring = points.to_vec();
    ring.push(points[0]);
    let mut reduced = simplify(&ring, tolerance);
    reduced.pop();
    reduced
}
