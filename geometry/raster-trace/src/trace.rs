//! Following foreground pixels into pixel paths.
//!
//! Coordinates here are pixel indices `(x, y)` with y down; placement into
//! design space happens in [`crate::trace_image`].

use crate::image::{Bitmap, RING, signed};

/// Neighbour offsets in stroke-following order: east, south, west, north,
/// then the diagonals.
const FOLLOW: [(isize, isize); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
];

/// A traced pixel chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelPath {
    /// Pixel coordinates in walking order.
    pub pixels: Vec<(usize, usize)>,
    /// Whether the chain returns to its start.
    pub closed: bool,
}

impl PixelPath {
    /// Number of pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// `true` for an empty chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

fn adjacent(a: (usize, usize), b: (usize, usize)) -> bool {
    a != b && a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

/// Row-major index of `(x + dx, y + dy)` if it is unvisited foreground.
fn step(
    bitmap: &Bitmap,
    visited: &[bool],
    (x, y): (usize, usize),
    (dx, dy): (isize, isize),
) -> Option<(usize, usize)> {
    let nx = usize::try_from(signed(x) + dx).ok()?;
    let ny = usize::try_from(signed(y) + dy).ok()?;
    (bitmap.get(nx, ny) && !visited[ny * bitmap.width() + nx]).then_some((nx, ny))
}

/// Walk from `from`, always taking the first unvisited neighbour.
fn walk(bitmap: &Bitmap, visited: &mut [bool], from: (usize, usize)) -> Vec<(usize, usize)> {
    let mut arm = Vec::new();
    let mut current = from;
    while let Some(next) = FOLLOW
        .iter()
        .find_map(|&d| step(bitmap, visited, current, d))
    {
        visited[next.1 * bitmap.width() + next.0] = true;
        arm.push(next);
        current = next;
    }
    arm
}

/// Trace one-pixel-wide strokes into chains.
///
/// Pixels are scanned row-major. Each unvisited foreground pixel starts a
/// chain that greedily follows unvisited neighbours (orthogonal before
/// diagonal); when the start pixel still has an unvisited neighbour after
/// that, a second arm is walked from it and prepended in reverse, so a
/// stroke found in its middle comes out whole. Branch pixels left over
/// start their own chains later in the scan.
///
/// A chain of at least 4 pixels whose ends touch is marked closed. Chains
/// shorter than `min_pixels` are dropped.
///
/// # Example
///
/// ```
/// use raster_trace::{Bitmap, trace_strokes};
///
/// let bitmap = Bitmap::from_rows(&[
///     ".....",
///     ".###.",
///     ".#.#.",
///     ".###.",
/// ]);
/// let chains = trace_strokes(&bitmap, 2);
/// assert_eq!(chains.len(), 1);
/// assert!(chains[0].closed);
/// assert_eq!(chains[0].len(), 8);
/// ```
#[must_use]
pub fn trace_strokes(bitmap: &Bitmap, min_pixels: usize) -> Vec<PixelPath> {
    let width = bitmap.width();
    let mut visited = vec![false; width * bitmap.height()];
    let mut chains = Vec::new();

    for start in bitmap.foreground() {
        if visited[start.1 * width + start.0] {
            continue;
        }
        visited[start.1 * width + start.0] = true;

        let forward = walk(bitmap, &mut visited, start);
        let backward = walk(bitmap, &mut visited, start);

        let mut pixels: Vec<(usize, usize)> = backward.into_iter().rev().collect();
        pixels.push(start);
        pixels.extend(forward);

        if pixels.len() < min_pixels.max(1) {
            continue;
        }
        let closed = pixels.len() >= 4
            && pixels
                .first()
                .zip(pixels.last())
                .is_some_and(|(&a, &b)| adjacent(a, b));
        chains.push(PixelPath { pixels, closed });
    }
    chains
}

/// Index in [`RING`] of a unit offset.
fn ring_index(offset: (isize, isize)) -> usize {
    RING.iter().position(|&d| d == offset).unwrap_or(0)
}

/// Moore-neighbour boundary of the component whose top-left pixel is
/// `start`. Tracing stops by Jacob's criterion: back on the start pixel
/// and about to leave it the same way as the first step.
fn moore_boundary(bitmap: &Bitmap, start: (usize, usize)) -> Vec<(usize, usize)> {
    // West of the first pixel in row-major order is background
    const WEST: usize = 6;

    let mut boundary = vec![start];
    let (mut cx, mut cy) = (signed(start.0), signed(start.1));
    let mut back = WEST;
    let mut first_dir = None;
    let limit = 4 * bitmap.width() * bitmap.height() + 8;

    for _ in 0..limit {
        let found = (1..=8).map(|k| (back + k) % 8).find(|&dir| {
            let (dx, dy) = RING[dir];
            bitmap.at(cx + dx, cy + dy)
        });
        let Some(dir) = found else {
            // Isolated pixel
            break;
        };
        let at_start = (cx, cy) == (signed(start.0), signed(start.1));
        match first_dir {
            None => first_dir = Some(dir),
            Some(first) if at_start && dir == first => break,
            Some(_) => {}
        }

        let (dx, dy) = RING[dir];
        let (px, py) = RING[(dir + 7) % 8];
        cx += dx;
        cy += dy;
        back = ring_index((px - dx, py - dy));
        boundary.push((
            usize::try_from(cx).unwrap_or(0),
            usize::try_from(cy).unwrap_or(0),
        ));
    }

    // Drop the closing return to the start
    if boundary.len() > 1 && boundary.last() == Some(&start) {
        boundary.pop();
    }
    boundary
}

/// Mark every pixel of the 8-connected component containing `seed`.
fn flood(bitmap: &Bitmap, labels: &mut [bool], seed: (usize, usize)) {
    let width = bitmap.width();
    let mut stack = vec![seed];
    labels[seed.1 * width + seed.0] = true;
    while let Some((x, y)) = stack.pop() {
        for &d in &RING {
            if let Some((nx, ny)) = step(bitmap, labels, (x, y), d) {
                labels[ny * width + nx] = true;
                stack.push((nx, ny));
            }
        }
    }
}

/// Trace the outer boundary of every 8-connected component.
///
/// Components are found in row-major order; each boundary is a closed
/// chain of boundary pixels, clockwise on screen (y down). Holes inside
/// components are not traced. Boundaries shorter than `min_pixels` are
/// dropped, except that a single isolated pixel yields a one-pixel chain
/// when `min_pixels <= 1`.
///
/// # Example
///
/// ```
/// use raster_trace::{Bitmap, trace_outlines};
///
/// let bitmap = Bitmap::from_rows(&["###", "###", "###"]);
/// let outlines = trace_outlines(&bitmap, 3);
/// assert_eq!(outlines.len(), 1);
/// assert_eq!(outlines[0].len(), 8);
/// ```
#[must_use]
pub fn trace_outlines(bitmap: &Bitmap, min_pixels: usize) -> Vec<PixelPath> {
    let mut labels = vec![false; bitmap.width() * bitmap.height()];
    let mut outlines = Vec::new();
    for start in bitmap.foreground() {
        if labels[start.1 * bitmap.width() + start.0] {
            continue;
        }
        flood(bitmap, &mut labels, start);
        let pixels = moore_boundary(bitmap, start);
        if pixels.len() >= min_pixels.max(1) {
            outlines.push(PixelPath {
                pixels,
                closed: true,
            });
        }
    }
    outlines
}
