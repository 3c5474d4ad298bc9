//! Property-based tests for revolved solids.
//!
//! Run with: cargo test -p mesh-revolve -- proptest

use mesh_revolve::{
    BulbShape, LatheParams, LedHousingParams, ReflectorParams, lathe_shell, led_housing,
    reflector,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_shape() -> impl Strategy<Value = BulbShape> {
    prop::sample::select(BulbShape::ALL.to_vec())
}

fn arb_lathe() -> impl Strategy<Value = LatheParams> {
    (40.0..160.0f64, 20.0..90.0f64, 0.8..3.0f64, 8usize..64, 4usize..48).prop_map(
        |(height, diameter, wall, segments, rings)| {
            LatheParams::bulb(height, diameter)
                .with_wall_thickness(wall)
                .with_segments(segments)
                .with_height_rings(rings)
        },
    )
}

// =============================================================================
// Watertight, outward-facing output
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lathe_shells_are_closed(shape in arb_shape(), params in arb_lathe()) {
        prop_assume!(params.validate().is_ok());
        let mesh = lathe_shell(&shape, &params);
        prop_assert!(mesh.edge_report().is_closed());
        prop_assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn reflectors_are_closed(
        seat in 1.0..10.0f64,
        depth in 5.0..40.0f64,
        beam in 10.0..150.0f64,
    ) {
        let mesh = reflector(&ReflectorParams::new(seat, depth, beam));
        prop_assert!(mesh.edge_report().is_closed());
        prop_assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn housings_are_closed(board in 5.0..40.0f64, wall in 0.8..4.0f64, hole in any::<bool>()) {
        let params = LedHousingParams::for_board(board, wall)
            .with_cable_hole(hole.then_some(board / 4.0));
        let mesh = led_housing(&params);
        prop_assert!(mesh.edge_report().is_closed());
        prop_assert!(mesh.signed_volume() > 0.0);
    }
}
