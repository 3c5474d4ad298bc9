//! Property-based tests for Douglas–Peucker simplification.
//!
//! Run with: cargo test -p path-types -- proptest

use nalgebra::{Point2, Point3};
use path_types::{Path, PathPoint, simplify, simplify_closed};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point2() -> impl Strategy<Value = Point2<f64>> {
    (-100.0..100.0f64, -100.0..100.0f64).prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_point3() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-50.0..50.0f64).prop_map(Point3::from)
}

fn arb_polyline(max_len: usize) -> impl Strategy<Value = Vec<Point2<f64>>> {
    prop::collection::vec(arb_point2(), 0..=max_len)
}

/// Indices of `kept` inside `original`, matched in order.
fn kept_indices<P: PartialEq>(original: &[P], kept: &[P]) -> Vec<usize> {
    let mut indices = Vec::with_capacity(kept.len());
    let mut cursor = 0;
    for k in kept {
        while cursor < original.len() && original[cursor] != *k {
            cursor += 1;
        }
        indices.push(cursor);
        cursor += 1;
    }
    indices
}

// =============================================================================
// Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn simplify_is_idempotent(points in arb_polyline(60), tol in 0.0..20.0f64) {
        let once = simplify(&points, tol);
        let twice = simplify(&once, tol);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn simplify_preserves_endpoints(points in arb_polyline(60), tol in 0.0..20.0f64) {
        let reduced = simplify(&points, tol);
        prop_assert_eq!(reduced.first(), points.first());
        prop_assert_eq!(reduced.last(), points.last());
        prop_assert!(reduced.len() <= points.len());
    }

    #[test]
    fn removed_points_lie_within_tolerance(points in arb_polyline(60), tol in 0.0..20.0f64) {
        let reduced = simplify(&points, tol);
        let kept = kept_indices(&points, &reduced);
        prop_assert_eq!(kept.len(), reduced.len());

        for window in kept.windows(2) {
            let (a, b) = (window[0], window[1]);
            prop_assert!(a < b && b < points.len());
            for p in &points[a + 1..b] {
                let d = p.distance_to_chord(&points[a], &points[b]);
                prop_assert!(d <= tol, "removed point {} from chord, tolerance {}", d, tol);
            }
        }
    }

    #[test]
    fn simplify_3d_is_idempotent(
        points in prop::collection::vec(arb_point3(), 0..40),
        tol in 0.0..10.0f64,
    ) {
        let once = simplify(&points, tol);
        prop_assert_eq!(simplify(&once, tol), once.clone());
        prop_assert_eq!(once.first(), points.first());
        prop_assert_eq!(once.last(), points.last());
    }

    #[test]
    fn closed_reduction_keeps_loop_start(points in arb_polyline(40), tol in 0.0..20.0f64) {
        let reduced = simplify_closed(&points, tol);
        prop_assert_eq!(reduced.first(), points.first());
        let path = Path::closed_loop(points.clone()).simplified(tol);
        prop_assert!(path.closed);
        prop_assert!(path.len() <= points.len());
    }
}
