//! Single-stroke centerlines from flattened glyph contours.

use nalgebra::Point2;
use path_types::{ContourPair, Path, Rect};
use tracing::{debug, warn};

use crate::outline::{DEFAULT_CURVE_SAMPLES, OutlineCommand, flatten};

/// Tuning for centerline extraction.
///
/// Lengths are in output units (after scaling).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CenterlineParams {
    /// Samples per curve segment when flattening (clamped to 8..=12).
    pub curve_samples: usize,
    /// Samples along a loop when pairing it with its counterpart.
    pub loop_samples: usize,
    /// Scan positions along a solid stroke's long axis.
    pub scan_samples: usize,
    /// Bounding-box aspect ratio above which solid strokes are scanned.
    pub aspect_threshold: f64,
    /// Inward offset of near-square solid strokes, as a fraction of the
    /// smaller bounding-box side.
    pub offset_fraction: f64,
    /// Douglas–Peucker tolerance applied to every centerline.
    pub simplify_tolerance: f64,
}

impl Default for CenterlineParams {
    fn default() -> Self {
        Self {
            curve_samples: DEFAULT_CURVE_SAMPLES,
            loop_samples: 64,
            scan_samples: 24,
            aspect_threshold: 1.5,
            offset_fraction: 0.25,
            simplify_tolerance: 0.5,
        }
    }
}

impl CenterlineParams {
    /// Set the simplification tolerance.
    #[must_use]
    pub const fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    /// Set the loop sample count.
    #[must_use]
    pub const fn with_loop_samples(mut self, samples: usize) -> Self {
        self.loop_samples = samples;
        self
    }
}

/// Closed contours of a glyph grouped into outlines with their counters,
/// plus the open strokes that need no pairing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphContours {
    /// Outer contours with nested counters.
    pub pairs: Vec<ContourPair>,
    /// Open contours, passed through as strokes.
    pub open: Vec<Path>,
}

/// Group contours into outer/inner pairs.
///
/// Closed contours are visited largest first by absolute area. A contour's
/// parent is the smallest already-visited contour whose bounding box
/// contains it (with [`path_types::NESTING_TOLERANCE`]). Contours whose
/// parent is an outer become its inners; everything else (top-level
/// contours, islands inside counters) starts a new pair.
#[must_use]
pub fn pair_contours(contours: Vec<Path>) -> GlyphContours {
    let (closed, open): (Vec<Path>, Vec<Path>) =
        contours.into_iter().partition(|c| c.closed && c.len() >= 3);

    let mut order: Vec<usize> = (0..closed.len()).collect();
    order.sort_by(|&a, &b| {
        closed[b]
            .signed_area()
            .abs()
            .total_cmp(&closed[a].signed_area().abs())
    });

    // Per visited contour: index of its pair when it is an outer
    let mut outer_of: Vec<Option<usize>> = vec![None; closed.len()];
    let mut pairs: Vec<ContourPair> = Vec::new();
    for (rank, &i) in order.iter().enumerate() {
        let Some(bounds) = closed[i].bounds() else {
            continue;
        };
        let parent = order[..rank].iter().rev().copied().find(|&j| {
            closed[j]
                .bounds()
                .is_some_and(|b| b.contains_rect(&bounds, path_types::NESTING_TOLERANCE))
        });
        match parent.and_then(|j| outer_of[j]) {
            Some(pair) => pairs[pair].inners.push(closed[i].clone()),
            None => {
                outer_of[i] = Some(pairs.len());
                pairs.push(ContourPair::solid(closed[i].clone()));
            }
        }
    }

    GlyphContours { pairs, open }
}

/// Midpoints between samples along `along` and their nearest points on
/// `toward`, as a closed loop.
fn midpoint_loop(along: &Path, toward: &Path, samples: usize) -> Path {
    let points = along
        .resample(samples.max(3))
        .into_iter()
        .filter_map(|p| toward.nearest_point(&p).map(|q| nalgebra::center(&p, &q)))
        .collect();
    Path::closed_loop(points)
}

/// Crossings of the line `coord[axis] = value` with a closed contour,
/// returned as the other coordinate.
fn crossings(contour: &Path, axis: usize, value: f64) -> Vec<f64> {
    let other = 1 - axis;
    contour
        .segments()
        .filter_map(|(a, b)| {
            let (a0, b0) = (a[axis], b[axis]);
            if (a0 - value) * (b0 - value) > 0.0 || a0 == b0 {
                return None;
            }
            let t = (value - a0) / (b0 - a0);
            Some(a[other] + (b[other] - a[other]) * t)
        })
        .collect()
}

/// Scan-line midpoints along the longer side of `bounds`.
fn scan_centerline(contour: &Path, bounds: &Rect, samples: usize) -> Path {
    let axis = usize::from(bounds.height() > bounds.width());
    let (start, length) = if axis == 0 {
        (bounds.min.x, bounds.width())
    } else {
        (bounds.min.y, bounds.height())
    };

    let samples = samples.max(2);
    let points = (0..samples)
        .filter_map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let s = start + length * (k as f64 + 0.5) / samples as f64;
            let hits = crossings(contour, axis, s);
            let lo = hits.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = hits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (hits.len() >= 2).then(|| {
                let mid = (lo + hi) / 2.0;
                if axis == 0 {
                    Point2::new(s, mid)
                } else {
                    Point2::new(mid, s)
                }
            })
        })
        .collect();
    Path::open(points)
}

/// Centerline of one paired contour, before simplification.
fn pair_centerlines(pair: &ContourPair, params: &CenterlineParams) -> Vec<Path> {
    match pair.inners.as_slice() {
        [inner] => vec![midpoint_loop(&pair.outer, inner, params.loop_samples)],
        [] => {
            let Some(bounds) = pair.outer.bounds() else {
                return Vec::new();
            };
            if bounds.aspect_ratio() > params.aspect_threshold {
                let scanned = scan_centerline(&pair.outer, &bounds, params.scan_samples);
                if scanned.len() >= 2 {
                    return vec![scanned];
                }
            }
            let inset = params.offset_fraction * bounds.min_dimension();
            vec![pair.outer.offset_inward(inset)]
        }
        inners => inners
            .iter()
            .map(|inner| midpoint_loop(inner, &pair.outer, params.loop_samples))
            .collect(),
    }
}

/// Derive single-stroke centerlines from grouped contours.
///
/// - One counter ("o", "a"): the outline is resampled and each sample is
///   averaged with its nearest point on the counter, giving a closed loop
///   through the middle of the stroke.
/// - Several counters ("B", "8"): one loop per counter, sampled along the
///   counter and projected onto the outline.
/// - No counter: strokes longer than `aspect_threshold` are scanned
///   across their long axis, taking the midpoint of the outermost
///   crossings (open path); near-square blobs are offset inward by
///   `offset_fraction` of their smaller side (closed path).
///
/// Every centerline is simplified; open contours pass through unchanged.
#[must_use]
pub fn centerlines(contours: &GlyphContours, params: &CenterlineParams) -> Vec<Path> {
    let mut out: Vec<Path> = contours
        .pairs
        .iter()
        .flat_map(|pair| pair_centerlines(pair, params))
        .map(|path| path.simplified(params.simplify_tolerance))
        .filter(|path| path.len() >= 2)
        .collect();
    out.extend(contours.open.iter().cloned());
    out
}

/// Flatten, pair and derive centerlines for one glyph.
///
/// An empty or unrecognized outline gives an empty list.
///
/// # Example
///
/// ```
/// use glyph_centerline::{CenterlineParams, OutlineCommand, glyph_centerlines};
///
/// // A thin horizontal bar, 100×10 font units
/// let bar = [
///     OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
///     OutlineCommand::LineTo { x: 100.0, y: 0.0 },
///     OutlineCommand::LineTo { x: 100.0, y: 10.0 },
///     OutlineCommand::LineTo { x: 0.0, y: 10.0 },
///     OutlineCommand::Close,
/// ];
/// let lines = glyph_centerlines(&bar, 1.0, &CenterlineParams::default());
/// assert_eq!(lines.len(), 1);
/// assert!(!lines[0].closed);
/// assert!(lines[0].points.iter().all(|p| (p.y - 5.0).abs() < 1e-9));
/// ```
#[must_use]
pub fn glyph_centerlines(
    commands: &[OutlineCommand],
    scale: f64,
    params: &CenterlineParams,
) -> Vec<Path> {
    let contours = pair_contours(flatten(commands, scale, params.curve_samples));
    if contours.pairs.is_empty() && contours.open.is_empty() {
        if !commands.is_empty() {
            warn!(commands = commands.len(), "Outline produced no contours");
        }
        return Vec::new();
    }
    let lines = centerlines(&contours, params);
    debug!(
        pairs = contours.pairs.len(),
        open = contours.open.len(),
        centerlines = lines.len(),
        "Extracted glyph centerlines"
    );
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        Path::closed_loop(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    #[allow(clippy::cast_precision_loss)]
    fn circle(cx: f64, cy: f64, r: f64, n: usize) -> Path {
        Path::closed_loop(
            (0..n)
                .map(|i| {
                    let a = TAU * i as f64 / n as f64;
                    Point2::new(cx + r * a.cos(), cy + r * a.sin())
                })
                .collect(),
        )
    }

    #[test]
    fn pairs_counter_with_outline() {
        let grouped = pair_contours(vec![
            rect(2.0, 2.0, 8.0, 8.0),
            rect(0.0, 0.0, 10.0, 10.0),
            rect(20.0, 0.0, 25.0, 5.0),
        ]);
        assert_eq!(grouped.pairs.len(), 2);
        assert_eq!(grouped.pairs[0].inners.len(), 1);
        assert!(grouped.pairs[1].is_solid());
    }

    #[test]
    fn island_inside_counter_is_an_outer() {
        let grouped = pair_contours(vec![
            rect(0.0, 0.0, 30.0, 30.0),
            rect(5.0, 5.0, 25.0, 25.0),
            rect(10.0, 10.0, 20.0, 20.0),
        ]);
        assert_eq!(grouped.pairs.len(), 2);
        assert_eq!(grouped.pairs[0].inners.len(), 1);
        assert!(grouped.pairs[1].is_solid());
    }

    #[test]
    fn ring_centerline_runs_mid_stroke() {
        let grouped = pair_contours(vec![circle(0.0, 0.0, 10.0, 90), circle(0.0, 0.0, 6.0, 90)]);
        let params = CenterlineParams::default().with_simplify_tolerance(0.01);
        let lines = centerlines(&grouped, &params);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
        for p in &lines[0].points {
            assert_relative_eq!(p.coords.norm(), 8.0, epsilon = 0.05);
        }
    }

    #[test]
    fn two_counters_give_two_loops() {
        let grouped = pair_contours(vec![
            rect(0.0, 0.0, 20.0, 40.0),
            rect(5.0, 5.0, 15.0, 17.0),
            rect(5.0, 23.0, 15.0, 35.0),
        ]);
        let lines = centerlines(&grouped, &CenterlineParams::default());
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.closed));
    }

    #[test]
    fn tall_stroke_is_scanned_vertically() {
        let grouped = pair_contours(vec![rect(0.0, 0.0, 4.0, 40.0)]);
        let lines = centerlines(&grouped, &CenterlineParams::default());
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(!line.closed);
        // Collinear midpoints collapse to the two ends
        assert_eq!(line.len(), 2);
        assert!(line.points.iter().all(|p| (p.x - 2.0).abs() < 1e-9));
        assert!(line.points[0].y < 1.0 && line.points[1].y > 39.0);
    }

    #[test]
    fn square_blob_is_offset() {
        let grouped = pair_contours(vec![rect(0.0, 0.0, 8.0, 8.0)]);
        let lines = centerlines(&grouped, &CenterlineParams::default());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
        let bounds = lines[0].bounds().unwrap();
        assert!(bounds.min.x > 0.0 && bounds.max.x < 8.0);
    }

    #[test]
    fn open_contours_pass_through() {
        let stroke = Path::open(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ]);
        let grouped = pair_contours(vec![stroke.clone()]);
        assert_eq!(centerlines(&grouped, &CenterlineParams::default()), vec![stroke]);
    }

    #[test]
    fn empty_outline_is_empty() {
        assert!(glyph_centerlines(&[], 1.0, &CenterlineParams::default()).is_empty());
        let lone = [OutlineCommand::MoveTo { x: 1.0, y: 1.0 }, OutlineCommand::Close];
        assert!(glyph_centerlines(&lone, 1.0, &CenterlineParams::default()).is_empty());
    }
}
