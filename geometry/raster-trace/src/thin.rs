//! Zhang–Suen skeleton thinning.

use tracing::debug;

use crate::image::Bitmap;

/// Default cap on thinning rounds.
pub const MAX_THINNING_ROUNDS: usize = 100;

/// Outcome of a thinning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThinningStats {
    /// Rounds executed (each round is two sub-passes).
    pub rounds: usize,
    /// Pixels removed in total.
    pub removed: usize,
    /// Whether the last round removed nothing.
    pub converged: bool,
}

/// Number of background-to-foreground steps walking the ring once.
fn transitions(ring: &[bool; 8]) -> usize {
    (0..8).filter(|&i| !ring[i] && ring[(i + 1) % 8]).count()
}

/// Removable in the given sub-pass. `ring` is P2..P9 (N, NE, E, SE, S,
/// SW, W, NW).
fn removable(ring: &[bool; 8], second: bool) -> bool {
    let count = ring.iter().filter(|&&b| b).count();
    if !(2..=6).contains(&count) || transitions(ring) != 1 {
        return false;
    }
    let [n, _, e, _, s, _, w, _] = *ring;
    if second {
        !(n && e && w) && !(n && s && w)
    } else {
        !(n && e && s) && !(e && s && w)
    }
}

/// One sub-pass: mark every removable pixel, then clear them together.
fn sub_pass(bitmap: &mut Bitmap, second: bool) -> usize {
    let marked: Vec<(usize, usize)> = bitmap
        .foreground()
        .filter(|&(x, y)| removable(&bitmap.neighbours(x, y), second))
        .collect();
    for &(x, y) in &marked {
        bitmap.set(x, y, false);
    }
    marked.len()
}

/// Thin foreground regions to one-pixel-wide skeletons in place.
///
/// Rounds repeat until one removes nothing or `max_rounds` ran, so the
/// loop always terminates.
///
/// # Example
///
/// ```
/// use raster_trace::{Bitmap, zhang_suen};
///
/// let mut bar = Bitmap::from_rows(&[
///     "..........",
///     ".########.",
///     ".########.",
///     ".########.",
///     "..........",
/// ]);
/// let stats = zhang_suen(&mut bar, 100);
/// assert!(stats.converged);
/// assert!((0..10).all(|x| (0..5).filter(|&y| bar.get(x, y)).count() <= 1));
/// ```
pub fn zhang_suen(bitmap: &mut Bitmap, max_rounds: usize) -> ThinningStats {
    let mut stats = ThinningStats::default();
    while stats.rounds < max_rounds {
        stats.rounds += 1;
        let removed = sub_pass(bitmap, false) + sub_pass(bitmap, true);
        stats.removed += removed;
        if removed == 0 {
            stats.converged = true;
            break;
        }
    }
    debug!(
        rounds = stats.rounds,
        removed = stats.removed,
        converged = stats.converged,
        "Thinned raster"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(width: usize, height: usize, x0: usize, y0: usize, w: usize, h: usize) -> Bitmap {
        let mut bitmap = Bitmap::new(width, height);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                bitmap.set(x, y, true);
            }
        }
        bitmap
    }

    #[test]
    fn transition_count() {
        assert_eq!(transitions(&[false; 8]), 0);
        assert_eq!(
            transitions(&[true, true, true, false, false, false, true, true]),
            1
        );
        assert_eq!(
            transitions(&[true, false, true, false, true, false, true, false]),
            4
        );
    }

    #[test]
    fn thick_bar_thins_to_center_row() {
        let mut bitmap = bar(30, 15, 5, 5, 20, 5);
        let stats = zhang_suen(&mut bitmap, MAX_THINNING_ROUNDS);
        assert!(stats.converged);
        assert!(stats.rounds <= MAX_THINNING_ROUNDS);
        for x in 8..=21 {
            let column: Vec<usize> = (0..15).filter(|&y| bitmap.get(x, y)).collect();
            assert_eq!(column, vec![7], "column {x}");
        }
        for (x, y) in bitmap.foreground() {
            assert!(bitmap.degree(x, y) <= 2);
        }
    }

    #[test]
    fn thin_lines_are_kept() {
        let ring = Bitmap::from_rows(&[
            ".....",
            ".###.",
            ".#.#.",
            ".###.",
            ".....",
        ]);
        let mut thinned = ring.clone();
        let stats = zhang_suen(&mut thinned, MAX_THINNING_ROUNDS);
        assert_eq!(stats.removed, 0);
        assert_eq!(stats.rounds, 1);
        assert_eq!(thinned, ring);
    }

    #[test]
    fn round_cap_is_respected() {
        let mut bitmap = bar(60, 60, 5, 5, 50, 50);
        let stats = zhang_suen(&mut bitmap, 2);
        assert_eq!(stats.rounds, 2);
        assert!(!stats.converged);
        assert!(bitmap.count() > 0);
    }

    #[test]
    fn isolated_pixels_survive() {
        let mut bitmap = Bitmap::from_rows(&["#...#", ".....", "..#.."]);
        zhang_suen(&mut bitmap, MAX_THINNING_ROUNDS);
        assert_eq!(bitmap.count(), 3);
    }
}
