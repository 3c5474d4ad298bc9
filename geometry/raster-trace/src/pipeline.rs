//! End-to-end raster to path conversion.

use nalgebra::Point2;
use path_types::Path;
use tracing::{debug, info, warn};

use crate::image::{Bitmap, GrayImage};
use crate::params::{TraceMode, TraceParams};
use crate::thin::zhang_suen;
use crate::trace::{PixelPath, trace_outlines, trace_strokes};

/// Binarize, trace and simplify an image.
///
/// In [`TraceMode::Centerline`] the raster is thinned with Zhang–Suen and
/// single-pixel strokes are followed; in [`TraceMode::Outline`] the outer
/// boundary of each connected component is followed instead, and loops
/// are oriented to positive signed area in the output coordinates.
///
/// Simplification runs in pixel units. With `pixel_size` set, points are
/// then scaled to millimetres and flipped so row 0 is at the top.
///
/// Invalid parameters log a warning and give no paths.
///
/// # Example
///
/// ```
/// use raster_trace::{GrayImage, TraceParams, trace_image};
///
/// // A dark 3-pixel-thick horizontal bar on white
/// let (w, h) = (20, 9);
/// let mut data = vec![255u8; w * h];
/// for y in 3..6 {
///     for x in 2..18 {
///         data[y * w + x] = 0;
///     }
/// }
/// let image = GrayImage::new(w, h, data).unwrap();
///
/// let paths = trace_image(&image, &TraceParams::default());
/// assert_eq!(paths.len(), 1);
/// assert_eq!(paths[0].len(), 2);
/// assert!(paths[0].points.iter().all(|p| (p.y - 4.0).abs() < 1e-9));
/// ```
#[must_use]
pub fn trace_image(image: &GrayImage, params: &TraceParams) -> Vec<Path> {
    let bitmap = image.binarize(params.threshold, params.invert);
    trace_bitmap(bitmap, params)
}

/// Same as [`trace_image`] for an already binarized raster.
#[must_use]
pub fn trace_bitmap(mut bitmap: Bitmap, params: &TraceParams) -> Vec<Path> {
    if let Err(err) = params.validate() {
        warn!(%err, "Invalid trace parameters");
        return Vec::new();
    }
    let foreground = bitmap.count();
    if foreground == 0 {
        debug!("Raster has no foreground pixels");
        return Vec::new();
    }

    let chains = match params.mode {
        TraceMode::Centerline => {
            zhang_suen(&mut bitmap, params.max_iterations);
            trace_strokes(&bitmap, params.min_path_points)
        }
        TraceMode::Outline => trace_outlines(&bitmap, params.min_path_points),
    };

    let height = bitmap.height();
    let paths: Vec<Path> = chains
        .iter()
        .map(|chain| {
            let path = to_path(chain).simplified(params.simplify_tolerance);
            let placed = match params.pixel_size {
                Some(size) => place(&path, size, height),
                None => path,
            };
            if params.mode == TraceMode::Outline && placed.signed_area() < 0.0 {
                placed.reversed()
            } else {
                placed
            }
        })
        .collect();

    info!(
        width = bitmap.width(),
        height,
        foreground,
        paths = paths.len(),
        points = paths.iter().map(Path::len).sum::<usize>(),
        "Traced raster"
    );
    paths
}

#[allow(clippy::cast_precision_loss)]
fn to_path(chain: &PixelPath) -> Path {
    // Precision: pixel indices are far below 2^52
    let points = chain
        .pixels
        .iter()
        .map(|&(x, y)| Point2::new(x as f64, y as f64))
        .collect();
    Path::new(points, chain.closed)
}

/// Scale to millimetres and flip so y grows upward.
#[allow(clippy::cast_precision_loss)]
fn place(path: &Path, pixel_size: f64, height: usize) -> Path {
    // Precision: image heights are far below 2^52
    let top = height.saturating_sub(1) as f64;
    path.map_points(|p| Point2::new(p.x * pixel_size, (top - p.y) * pixel_size))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn image(rows: &[&str]) -> GrayImage {
        let width = rows[0].len();
        let data = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| if b == b'#' { 0 } else { 255 }))
            .collect();
        GrayImage::new(width, rows.len(), data).unwrap()
    }

    #[test]
    fn ring_traces_to_closed_square() {
        let img = image(&[
            "........",
            ".######.",
            ".#....#.",
            ".#....#.",
            ".#....#.",
            ".######.",
            "........",
        ]);
        let paths = trace_image(&img, &TraceParams::default());
        assert_eq!(paths.len(), 1);
        assert!(paths[0].closed);
        assert_eq!(paths[0].len(), 4);
        assert_relative_eq!(paths[0].signed_area().abs(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn pixel_size_scales_and_flips() {
        let img = image(&["#####", ".....", "....."]);
        let params = TraceParams::default()
            .with_min_path_points(2)
            .with_pixel_size(0.5);
        let paths = trace_image(&img, &params);
        assert_eq!(paths.len(), 1);
        let p = &paths[0].points;
        assert_relative_eq!(p[0].x, 0.0);
        assert_relative_eq!(p[0].y, 1.0);
        assert_relative_eq!(p[1].x, 2.0);
        assert_relative_eq!(p[1].y, 1.0);
    }

    #[test]
    fn invert_traces_light_ink() {
        let img = image(&["#######", "#.....#", "#######"]);
        let dark = trace_image(&img, &TraceParams::default().with_min_path_points(3));
        let light = trace_image(
            &img,
            &TraceParams::default()
                .with_invert(true)
                .with_min_path_points(3),
        );
        assert_eq!(light.len(), 1);
        assert!(light[0].points.iter().all(|p| (p.y - 1.0).abs() < 1e-9));
        assert_ne!(dark, light);
    }

    #[test]
    fn outline_mode_gives_positive_loops() {
        let img = image(&[
            "..........",
            ".####.....",
            ".####..##.",
            ".####..##.",
            "..........",
        ]);
        let params = TraceParams::outlines().with_min_path_points(4);
        let paths = trace_image(&img, &params);
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert!(path.closed);
            assert!(path.signed_area() > 0.0);
        }
        assert_relative_eq!(paths[0].signed_area(), 6.0, epsilon = 1e-9);

        let placed = trace_image(&img, &params.clone().with_pixel_size(1.0));
        assert!(placed.iter().all(|p| p.signed_area() > 0.0));
    }

    #[test]
    fn blank_image_and_bad_params_give_nothing() {
        let blank = GrayImage::new(4, 4, vec![255; 16]).unwrap();
        assert!(trace_image(&blank, &TraceParams::default()).is_empty());

        let img = image(&["######"]);
        let params = TraceParams::default().with_pixel_size(-1.0);
        assert!(trace_image(&img, &params).is_empty());
    }
}
