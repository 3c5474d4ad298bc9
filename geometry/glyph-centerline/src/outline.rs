//! Glyph outline commands and curve flattening.

use nalgebra::Point2;
use path_types::Path;
use serde::{Deserialize, Serialize};

/// Default samples per curve segment.
pub const DEFAULT_CURVE_SAMPLES: usize = 10;

/// Allowed range for samples per curve segment.
pub const CURVE_SAMPLE_RANGE: std::ops::RangeInclusive<usize> = 8..=12;

/// Points closer than this (in output units) are treated as coincident.
const COINCIDENT: f64 = 1e-9;

/// One glyph drawing command, in font units with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OutlineCommand {
    /// Start a new contour.
    MoveTo {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// Straight segment.
    LineTo {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// Quadratic Bézier segment.
    QuadTo {
        /// Control point x.
        x1: f64,
        /// Control point y.
        y1: f64,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// Cubic Bézier segment.
    CubicTo {
        /// First control point x.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x.
        x2: f64,
        /// Second control point y.
        y2: f64,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// Close the current contour.
    Close,
}

/// Receiver for glyph outline commands.
///
/// A font parser drives this trait directly, so nothing here depends on a
/// font library. Coordinates are in font units, y up.
pub trait OutlineSink {
    /// Start a new contour at the given point.
    fn move_to(&mut self, x: f64, y: f64);
    /// Draw a straight line to the given point.
    fn line_to(&mut self, x: f64, y: f64);
    /// Draw a quadratic Bézier curve (TrueType-style).
    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64);
    /// Draw a cubic Bézier curve (CFF/OpenType-style).
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64);
    /// Close the current contour.
    fn close(&mut self);
}

/// Collects sink calls into a command list.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    commands: Vec<OutlineCommand>,
}

impl OutlineBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands.
    #[must_use]
    pub fn finish(self) -> Vec<OutlineCommand> {
        self.commands
    }
}

impl OutlineSink for OutlineBuilder {
    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(OutlineCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(OutlineCommand::LineTo { x, y });
    }

    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        self.commands.push(OutlineCommand::QuadTo { x1, y1, x, y });
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.commands.push(OutlineCommand::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
    }

    fn close(&mut self) {
        self.commands.push(OutlineCommand::Close);
    }
}

/// Replay commands into any sink.
pub fn replay(commands: &[OutlineCommand], sink: &mut impl OutlineSink) {
    for command in commands {
        match *command {
            OutlineCommand::MoveTo { x, y } => sink.move_to(x, y),
            OutlineCommand::LineTo { x, y } => sink.line_to(x, y),
            OutlineCommand::QuadTo { x1, y1, x, y } => sink.quad_to(x1, y1, x, y),
            OutlineCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => sink.curve_to(x1, y1, x2, y2, x, y),
            OutlineCommand::Close => sink.close(),
        }
    }
}

/// Sink that flattens curves into contours as commands arrive.
struct Flattener {
    scale: f64,
    samples: usize,
    current: Vec<Point2<f64>>,
    contours: Vec<Path>,
}

impl Flattener {
    fn point(&self, x: f64, y: f64) -> Point2<f64> {
        Point2::new(x * self.scale, y * self.scale)
    }

    fn last(&self) -> Point2<f64> {
        self.current.last().copied().unwrap_or_else(Point2::origin)
    }

    fn push(&mut self, p: Point2<f64>) {
        if self
            .current
            .last()
            .is_none_or(|last| nalgebra::distance(last, &p) > COINCIDENT)
        {
            self.current.push(p);
        }
    }

    /// Finish the current contour. A contour that returns to its start
    /// counts as closed even without an explicit close.
    fn flush(&mut self, closed: bool) {
        let points = std::mem::take(&mut self.current);
        if points.len() < 2 {
            return;
        }
        let returns = points.len() > 2
            && points
                .first()
                .zip(points.last())
                .is_some_and(|(a, b)| nalgebra::distance(a, b) <= COINCIDENT);
        let path = if closed || returns {
            Path::closed_loop(points)
        } else {
            Path::open(points)
        };
        self.contours.push(path);
    }
}

impl OutlineSink for Flattener {
    fn move_to(&mut self, x: f64, y: f64) {
        self.flush(false);
        let p = self.point(x, y);
        self.current.push(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.point(x, y);
        self.push(p);
    }

    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        let p0 = self.last();
        let c = self.point(x1, y1);
        let p1 = self.point(x, y);
        for i in 1..=self.samples {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / self.samples as f64;
            let u = 1.0 - t;
            let p = Point2::from(
                p0.coords * (u * u) + c.coords * (2.0 * u * t) + p1.coords * (t * t),
            );
            self.push(p);
        }
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        let p0 = self.last();
        let c1 = self.point(x1, y1);
        let c2 = self.point(x2, y2);
        let p1 = self.point(x, y);
        for i in 1..=self.samples {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / self.samples as f64;
            let u = 1.0 - t;
            let p = Point2::from(
                p0.coords * (u * u * u)
                    + c1.coords * (3.0 * u * u * t)
                    + c2.coords * (3.0 * u * t * t)
                    + p1.coords * (t * t * t),
            );
            self.push(p);
        }
    }

    fn close(&mut self) {
        self.flush(true);
    }
}

/// Flatten outline commands into contours scaled by `scale`.
///
/// Curves are sampled at `curve_samples` evenly spaced parameters
/// (clamped to [`CURVE_SAMPLE_RANGE`]). Every move or close starts a new
/// contour; contours with fewer than 2 distinct points are dropped.
///
/// # Example
///
/// ```
/// use glyph_centerline::{OutlineCommand, flatten};
///
/// let commands = [
///     OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
///     OutlineCommand::QuadTo { x1: 50.0, y1: 100.0, x: 100.0, y: 0.0 },
///     OutlineCommand::Close,
/// ];
/// let contours = flatten(&commands, 0.1, 10);
/// assert_eq!(contours.len(), 1);
/// assert!(contours[0].closed);
/// assert_eq!(contours[0].len(), 11);
/// ```
#[must_use]
pub fn flatten(commands: &[OutlineCommand], scale: f64, curve_samples: usize) -> Vec<Path> {
    let mut flattener = Flattener {
        scale,
        samples: curve_samples.clamp(*CURVE_SAMPLE_RANGE.start(), *CURVE_SAMPLE_RANGE.end()),
        current: Vec::new(),
        contours: Vec::new(),
    };
    replay(commands, &mut flattener);
    flattener.flush(false);
    flattener.contours
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Vec<OutlineCommand> {
        vec![
            OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
            OutlineCommand::LineTo { x: size, y: 0.0 },
            OutlineCommand::LineTo { x: size, y: size },
            OutlineCommand::LineTo { x: 0.0, y: size },
            OutlineCommand::Close,
        ]
    }

    #[test]
    fn builder_records_sink_calls() {
        let mut builder = OutlineBuilder::new();
        builder.move_to(0.0, 0.0);
        builder.curve_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        builder.close();
        let commands = builder.finish();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[2], OutlineCommand::Close);

        let mut copy = OutlineBuilder::new();
        replay(&commands, &mut copy);
        assert_eq!(copy.finish(), commands);
    }

    #[test]
    fn square_is_closed_and_scaled() {
        let contours = flatten(&square(100.0), 0.5, 10);
        assert_eq!(contours.len(), 1);
        let c = &contours[0];
        assert!(c.closed);
        assert_eq!(c.len(), 4);
        assert_relative_eq!(c.signed_area(), 2500.0, epsilon = 1e-9);
    }

    #[test]
    fn return_to_start_counts_as_closed() {
        let mut commands = square(10.0);
        commands[4] = OutlineCommand::LineTo { x: 0.0, y: 0.0 };
        let contours = flatten(&commands, 1.0, 10);
        assert!(contours[0].closed);
        assert_eq!(contours[0].len(), 4);
    }

    #[test]
    fn open_stroke_and_sample_clamp() {
        let commands = [
            OutlineCommand::MoveTo { x: 0.0, y: 0.0 },
            OutlineCommand::CubicTo {
                x1: 0.0,
                y1: 10.0,
                x2: 10.0,
                y2: 10.0,
                x: 10.0,
                y: 0.0,
            },
        ];
        let few = flatten(&commands, 1.0, 2);
        assert!(!few[0].closed);
        assert_eq!(few[0].len(), 1 + 8);
        let many = flatten(&commands, 1.0, 50);
        assert_eq!(many[0].len(), 1 + 12);
        // Curve midpoint of this symmetric cubic
        assert_relative_eq!(many[0].points[6].x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(many[0].points[6].y, 7.5, epsilon = 1e-12);
    }

    #[test]
    fn move_splits_contours() {
        let mut commands = square(10.0);
        commands.extend(square(4.0));
        commands.push(OutlineCommand::MoveTo { x: 20.0, y: 20.0 });
        let contours = flatten(&commands, 1.0, 10);
        // The trailing lone move is dropped
        assert_eq!(contours.len(), 2);
        assert!(flatten(&[], 1.0, 10).is_empty());
    }

    #[test]
    fn commands_round_trip_through_json() {
        let json = r#"[{"op":"move_to","x":0,"y":0},{"op":"quad_to","x1":1,"y1":2,"x":3,"y":4},{"op":"close"}]"#;
        let commands: Vec<OutlineCommand> = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[1],
            OutlineCommand::QuadTo {
                x1: 1.0,
                y1: 2.0,
                x: 3.0,
                y: 4.0
            }
        );
    }
}
