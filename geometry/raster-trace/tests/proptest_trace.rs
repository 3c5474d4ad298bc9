//! Property-based tests for thinning and tracing.
//!
//! Run with: cargo test -p raster-trace -- proptest

use hashbrown::HashSet;
use proptest::prelude::*;
use raster_trace::{
    Bitmap, GrayImage, MAX_THINNING_ROUNDS, TraceParams, trace_image, trace_outlines,
    trace_strokes, zhang_suen,
};

// =============================================================================
// Strategies
// =============================================================================

/// Random bitmap up to 24x24, about 40% foreground.
fn arb_bitmap() -> impl Strategy<Value = Bitmap> {
    (1usize..24, 1usize..24).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::bool::weighted(0.4), w * h).prop_map(move |bits| {
            let mut bitmap = Bitmap::new(w, h);
            for (i, bit) in bits.into_iter().enumerate() {
                bitmap.set(i % w, i / w, bit);
            }
            bitmap
        })
    })
}

fn arb_image() -> impl Strategy<Value = GrayImage> {
    (1usize..20, 1usize..20).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<u8>(), w * h)
            .prop_map(move |data| GrayImage::new(w, h, data).unwrap())
    })
}

// =============================================================================
// Thinning
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn thinning_terminates_inside_the_original(bitmap in arb_bitmap()) {
        let mut thinned = bitmap.clone();
        let stats = zhang_suen(&mut thinned, MAX_THINNING_ROUNDS);
        prop_assert!(stats.rounds <= MAX_THINNING_ROUNDS);
        prop_assert_eq!(bitmap.count() - thinned.count(), stats.removed);
        for (x, y) in thinned.foreground() {
            prop_assert!(bitmap.get(x, y));
        }
    }

    #[test]
    fn thinning_is_stable_once_converged(bitmap in arb_bitmap()) {
        let mut thinned = bitmap;
        let stats = zhang_suen(&mut thinned, MAX_THINNING_ROUNDS);
        prop_assume!(stats.converged);
        let again = zhang_suen(&mut thinned, MAX_THINNING_ROUNDS);
        prop_assert_eq!(again.removed, 0);
    }
}

// =============================================================================
// Tracing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn strokes_visit_every_pixel_once(bitmap in arb_bitmap()) {
        let chains = trace_strokes(&bitmap, 1);
        let mut seen = HashSet::new();
        for chain in &chains {
            for &(x, y) in &chain.pixels {
                prop_assert!(bitmap.get(x, y));
                prop_assert!(seen.insert((x, y)));
            }
            for pair in chain.pixels.windows(2) {
                prop_assert!(pair[0].0.abs_diff(pair[1].0) <= 1);
                prop_assert!(pair[0].1.abs_diff(pair[1].1) <= 1);
            }
        }
        prop_assert_eq!(seen.len(), bitmap.count());
    }

    #[test]
    fn one_outline_per_component(bitmap in arb_bitmap()) {
        let outlines = trace_outlines(&bitmap, 1);
        for outline in &outlines {
            prop_assert!(outline.closed);
            for &(x, y) in &outline.pixels {
                prop_assert!(bitmap.get(x, y));
            }
        }
        prop_assert!(outlines.len() <= bitmap.count());
        prop_assert_eq!(outlines.is_empty(), bitmap.count() == 0);
    }

    #[test]
    fn placed_paths_stay_on_the_image(image in arb_image(), threshold in any::<u8>()) {
        let params = TraceParams::default()
            .with_threshold(threshold)
            .with_min_path_points(1)
            .with_pixel_size(0.5);
        #[allow(clippy::cast_precision_loss)]
        let (w, h) = (image.width() as f64 * 0.5, image.height() as f64 * 0.5);
        for path in trace_image(&image, &params) {
            for p in &path.points {
                prop_assert!(p.x >= 0.0 && p.x < w);
                prop_assert!(p.y >= 0.0 && p.y < h);
            }
        }
    }
}
