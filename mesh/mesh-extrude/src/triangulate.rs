//! Ear-clipping triangulation of simple polygons with holes.

use nalgebra::Point2;
use tracing::{debug, warn};

/// Triangulate a simple polygon with holes.
///
/// Indices refer to the concatenation of `outer` followed by every hole in
/// order. Triangles are counter-clockwise (facing +Z) whatever the winding
/// of the input loops. Holes are first bridged into the outer loop through
/// a mutually visible vertex pair, rightmost hole first, then ears are
/// clipped until three vertices remain.
///
/// Holes with fewer than 3 points are ignored. When no ear can be found,
/// convex or flat corners are clipped regardless of containment, and as a
/// last resort the remainder is fanned; a `warn!` event is logged.
///
/// # Example
///
/// ```
/// use mesh_extrude::triangulate;
/// use nalgebra::Point2;
///
/// let outer = [
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
/// ];
/// let hole = vec![
///     Point2::new(3.0, 3.0),
///     Point2::new(7.0, 3.0),
///     Point2::new(7.0, 7.0),
///     Point2::new(3.0, 7.0),
/// ];
///
/// let triangles = triangulate(&outer, &[hole]);
/// assert_eq!(triangles.len(), 8);
/// ```
#[must_use]
pub fn triangulate(outer: &[Point2<f64>], holes: &[Vec<Point2<f64>>]) -> Vec<[usize; 3]> {
    if outer.len() < 3 {
        return Vec::new();
    }

    let mut points: Vec<Point2<f64>> = outer.to_vec();
    let mut polygon = oriented((0..outer.len()).collect(), &points, true);

    let mut hole_loops = Vec::with_capacity(holes.len());
    for hole in holes {
        let start = points.len();
        points.extend_from_slice(hole);
        if hole.len() >= 3 {
            hole_loops.push(oriented((start..points.len()).collect(), &points, false));
        }
    }

    // Rightmost holes first so later bridges cannot cross earlier ones
    hole_loops.sort_by(|a, b| max_x(b, &points).total_cmp(&max_x(a, &points)));
    for hole in &hole_loops {
        if !bridge(&mut polygon, hole, &points) {
            warn!(hole_points = hole.len(), "No bridge found for hole, skipping it");
        }
    }

    let triangles = clip_ears(polygon, &points);
    debug!(
        points = points.len(),
        holes = hole_loops.len(),
        triangles = triangles.len(),
        "Triangulated polygon"
    );
    triangles
}

fn cross(o: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn signed_area(indices: &[usize], points: &[Point2<f64>]) -> f64 {
    let n = indices.len();
    (0..n)
        .map(|i| {
            let a = points[indices[i]];
            let b = points[indices[(i + 1) % n]];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

/// Reverse `indices` if needed so the loop winds CCW (`ccw`) or CW.
fn oriented(mut indices: Vec<usize>, points: &[Point2<f64>], ccw: bool) -> Vec<usize> {
    if (signed_area(&indices, points) > 0.0) != ccw {
        indices.reverse();
    }
    indices
}

fn max_x(indices: &[usize], points: &[Point2<f64>]) -> f64 {
    indices
        .iter()
        .map(|&i| points[i].x)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Point inside triangle `abc` or on its boundary, either winding.
fn in_triangle(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Splice `hole` into `polygon` through a bridge from the hole's rightmost
/// vertex to a visible polygon vertex.
fn bridge(polygon: &mut Vec<usize>, hole: &[usize], points: &[Point2<f64>]) -> bool {
    let Some((m_pos, m)) = hole.iter().copied().enumerate().max_by(|&(_, a), &(_, b)| {
        points[a]
            .x
            .total_cmp(&points[b].x)
            .then(points[b].y.total_cmp(&points[a].y))
    }) else {
        return false;
    };
    let mp = points[m];
    let n = polygon.len();

    // Nearest edge crossed by the ray from M toward +x
    let mut hit: Option<(f64, usize)> = None;
    for i in 0..n {
        let a = points[polygon[i]];
        let b = points[polygon[(i + 1) % n]];
        if (a.y - mp.y) * (b.y - mp.y) > 0.0 || a.y == b.y {
            continue;
        }
        let x = a.x + (mp.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if x < mp.x || hit.is_some_and(|(best, _)| x >= best) {
            continue;
        }
        let pos = if a.x >= b.x { i } else { (i + 1) % n };
        hit = Some((x, pos));
    }
    let Some((x, mut pos)) = hit else {
        return false;
    };

    // A vertex inside triangle (M, I, P) would block the bridge; the one
    // closest in angle to the ray is visible instead
    let ray_hit = Point2::new(x, mp.y);
    let p = points[polygon[pos]];
    let mut best_tan = f64::INFINITY;
    for (k, &idx) in polygon.iter().enumerate() {
        let v = points[idx];
        if k == pos || v == p || v.x < mp.x {
            continue;
        }
        if in_triangle(v, mp, ray_hit, p) {
            let dx = v.x - mp.x;
            let tan = if dx > 0.0 {
                (v.y - mp.y).abs() / dx
            } else {
                f64::INFINITY
            };
            if tan < best_tan {
                best_tan = tan;
                pos = k;
            }
        }
    }

    let p_idx = polygon[pos];
    let mut spliced = Vec::with_capacity(hole.len() + 2);
    spliced.extend_from_slice(&hole[m_pos..]);
    spliced.extend_from_slice(&hole[..m_pos]);
    spliced.push(m);
    spliced.push(p_idx);
    polygon.splice(pos + 1..pos + 1, spliced);
    true
}

fn is_ear(ring: &[usize], i: usize, points: &[Point2<f64>]) -> bool {
    let n = ring.len();
    let (ia, ib, ic) = (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]);
    let (a, b, c) = (points[ia], points[ib], points[ic]);
    if cross(a, b, c) <= 0.0 {
        return false;
    }
    ring.iter().all(|&k| {
        let p = points[k];
        k == ia || k == ib || k == ic || p == a || p == b || p == c || !in_triangle(p, a, b, c)
    })
}

fn clip_ears(mut ring: Vec<usize>, points: &[Point2<f64>]) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
    while ring.len() > 3 {
        let n = ring.len();
        let ear = (0..n).find(|&i| is_ear(&ring, i, points)).or_else(|| {
            (0..n).find(|&i| {
                let (a, b, c) = (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]);
                cross(points[a], points[b], points[c]) >= 0.0
            })
        });
        let Some(i) = ear else {
            warn!(
                remaining = n,
                "Ear clipping stuck, using fan triangulation"
            );
            for k in 1..n - 1 {
                triangles.push([ring[0], ring[k], ring[k + 1]]);
            }
            return triangles;
        };
        triangles.push([ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]]);
        ring.remove(i);
    }
    if ring.len() == 3 {
        triangles.push([ring[0], ring[1], ring[2]]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn area_of(triangles: &[[usize; 3]], points: &[Point2<f64>]) -> f64 {
        triangles
            .iter()
            .map(|t| cross(points[t[0]], points[t[1]], points[t[2]]) * 0.5)
            .sum()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]
    }

    #[test]
    fn convex_polygon() {
        let square = rect(0.0, 0.0, 2.0, 2.0);
        let tris = triangulate(&square, &[]);
        assert_eq!(tris.len(), 2);
        assert_relative_eq!(area_of(&tris, &square), 4.0);
    }

    #[test]
    fn clockwise_input_gives_ccw_triangles() {
        let mut square = rect(0.0, 0.0, 2.0, 2.0);
        square.reverse();
        let tris = triangulate(&square, &[]);
        for t in &tris {
            assert!(cross(square[t[0]], square[t[1]], square[t[2]]) > 0.0);
        }
    }

    #[test]
    fn concave_l_shape() {
        let l = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        let tris = triangulate(&l, &[]);
        assert_eq!(tris.len(), 4);
        assert_relative_eq!(area_of(&tris, &l), 7.0);
        for t in &tris {
            assert!(cross(l[t[0]], l[t[1]], l[t[2]]) > 0.0);
        }
    }

    #[test]
    fn square_with_hole() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let hole = rect(3.0, 3.0, 7.0, 7.0);
        let tris = triangulate(&outer, &[hole.clone()]);
        let mut all = outer;
        all.extend(hole);
        assert_eq!(tris.len(), 8);
        assert_relative_eq!(area_of(&tris, &all), 84.0, epsilon = 1e-9);
    }

    #[test]
    fn two_holes_like_a_b() {
        let outer = rect(0.0, 0.0, 6.0, 10.0);
        let upper = rect(2.0, 6.0, 4.0, 8.0);
        let lower = rect(2.0, 2.0, 4.0, 4.0);
        let tris = triangulate(&outer, &[upper.clone(), lower.clone()]);
        let mut all = outer;
        all.extend(upper);
        all.extend(lower);
        assert_eq!(tris.len(), 12 + 2 * 2 - 2);
        assert_relative_eq!(area_of(&tris, &all), 60.0 - 8.0, epsilon = 1e-9);
    }

    #[test]
    fn every_polygon_edge_is_used_once() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let hole = rect(3.0, 3.0, 7.0, 7.0);
        let tris = triangulate(&outer, &[hole]);
        let mut directed: Vec<(usize, usize)> = tris
            .iter()
            .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
            .collect();
        directed.sort_unstable();
        // Outer edges appear CCW, hole edges CW
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0), (4, 7), (7, 6), (6, 5), (5, 4)] {
            assert_eq!(directed.iter().filter(|&&e| e == (a, b)).count(), 1);
        }
    }

    #[test]
    fn degenerate_input() {
        assert!(triangulate(&[Point2::origin(), Point2::new(1.0, 0.0)], &[]).is_empty());
        let tris = triangulate(&rect(0.0, 0.0, 1.0, 1.0), &[vec![Point2::new(0.5, 0.5)]]);
        assert_eq!(tris.len(), 2);
    }
}
