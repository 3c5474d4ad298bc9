//! Outer contours paired with their holes.

use crate::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bounding boxes may overhang their parent by this much and still nest.
pub const NESTING_TOLERANCE: f64 = 1.0;

/// An outer contour matched with the contours nested inside it.
///
/// Nesting is decided by bounding-box containment with
/// [`NESTING_TOLERANCE`] of slack. The pairing drives centerline
/// derivation only; it is not a fill rule.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContourPair {
    /// The enclosing contour.
    pub outer: Path,
    /// Contours nested inside `outer` (holes, counters).
    pub inners: Vec<Path>,
}

impl ContourPair {
    /// A contour with no holes.
    #[must_use]
    pub const fn solid(outer: Path) -> Self {
        Self {
            outer,
            inners: Vec::new(),
        }
    }

    /// Whether `candidate` nests inside this pair's outer contour.
    #[must_use]
    pub fn encloses(&self, candidate: &Path) -> bool {
        match (self.outer.bounds(), candidate.bounds()) {
            (Some(outer), Some(inner)) => outer.contains_rect(&inner, NESTING_TOLERANCE),
            _ => false,
        }
    }

    /// `true` when the outer contour has no holes.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.inners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        Path::closed_loop(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    #[test]
    fn nesting_allows_one_unit_overhang() {
        let pair = ContourPair::solid(rect(0.0, 0.0, 10.0, 10.0));
        assert!(pair.encloses(&rect(2.0, 2.0, 8.0, 8.0)));
        assert!(pair.encloses(&rect(-0.9, 2.0, 8.0, 10.9)));
        assert!(!pair.encloses(&rect(-1.5, 2.0, 8.0, 8.0)));
        assert!(!pair.encloses(&Path::default()));
        assert!(pair.is_solid());
    }
}
