//! Radius profiles for lathed surfaces.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::RevolveError;

/// Radius as a function of normalized position `t ∈ [0, 1]`.
///
/// Values are fractions of the part's maximum radius. Inputs outside
/// `[0, 1]` are clamped.
pub trait Profile {
    /// Radius fraction at `t`.
    fn radius_at(&self, t: f64) -> f64;

    /// Short tag for logs.
    fn name(&self) -> &'static str;
}

/// Classic light-bulb silhouettes, bottom (`t = 0`, the neck) to top.
///
/// Every shape reaches radius 0 at `t = 1` so the lathe closes at the tip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BulbShape {
    /// Straight cylinder with a rounded quarter-ellipse tip above `t = 0.85`.
    Tube,
    /// Narrow neck (0.35) that opens into a sphere centred at `t = 0.55`.
    #[default]
    Globe,
    /// Candle flame: sine swell to full width at `t = 0.3`, then a
    /// `cos^0.8` taper to a point.
    Flame,
    /// Edison style: neck 0.45 eased to full width at `t = 0.35`, then an
    /// elliptical crown.
    Vintage,
    /// A-shape: neck 0.35 held to `t = 0.1`, eased to full width at
    /// `t = 0.45`, then an elliptical crown.
    Pear,
    /// Quarter ellipse `sqrt(1 - t²)`; used for diffuser caps.
    Dome,
}

impl BulbShape {
    /// All shapes, in tag order.
    pub const ALL: [Self; 6] = [
        Self::Tube,
        Self::Globe,
        Self::Flame,
        Self::Vintage,
        Self::Pear,
        Self::Dome,
    ];

    /// The shape's tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Tube => "tube",
            Self::Globe => "globe",
            Self::Flame => "flame",
            Self::Vintage => "vintage",
            Self::Pear => "pear",
            Self::Dome => "dome",
        }
    }
}

impl Profile for BulbShape {
    fn radius_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Tube => {
                if t <= 0.85 {
                    1.0
                } else {
                    ellipse((t - 0.85) / 0.15)
                }
            }
            Self::Globe => {
                let sphere = ellipse((t - 0.55) / 0.45);
                if t < 0.55 { sphere.max(0.35) } else { sphere }
            }
            Self::Flame => {
                if t < 0.3 {
                    0.4 + 0.6 * (FRAC_PI_2 * t / 0.3).sin()
                } else {
                    (FRAC_PI_2 * (t - 0.3) / 0.7).cos().max(0.0).powf(0.8)
                }
            }
            Self::Vintage => {
                if t < 0.35 {
                    lerp(0.45, 1.0, smoothstep(t / 0.35))
                } else {
                    ellipse((t - 0.35) / 0.65)
                }
            }
            Self::Pear => {
                if t < 0.1 {
                    0.35
                } else if t < 0.45 {
                    lerp(0.35, 1.0, smoothstep((t - 0.1) / 0.35))
                } else {
                    ellipse((t - 0.45) / 0.55)
                }
            }
            Self::Dome => ellipse(t),
        }
    }

    fn name(&self) -> &'static str {
        self.tag()
    }
}

impl fmt::Display for BulbShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BulbShape {
    type Err = RevolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|shape| shape.tag() == tag)
            .ok_or_else(|| RevolveError::UnknownShape(s.to_string()))
    }
}

/// Power-law flare `start + (1 - start)·t^exponent`.
///
/// The reflector's wall follows this curve from the LED seat (`start`, as
/// a fraction of the mouth radius) to the mouth.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerFlare {
    /// Radius fraction at `t = 0`.
    pub start: f64,
    /// Curve exponent; below 1 the wall opens quickly then straightens.
    pub exponent: f64,
}

impl PowerFlare {
    /// Exponent used for reflectors.
    pub const REFLECTOR_EXPONENT: f64 = 0.7;

    /// Reflector flare from `start` fraction.
    #[must_use]
    pub const fn reflector(start: f64) -> Self {
        Self {
            start,
            exponent: Self::REFLECTOR_EXPONENT,
        }
    }
}

impl Profile for PowerFlare {
    fn radius_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        self.start + (1.0 - self.start) * t.powf(self.exponent)
    }

    fn name(&self) -> &'static str {
        "flare"
    }
}

/// Screw-thread cross-section over one pitch.
///
/// `t` is the phase within the pitch. The crest (radius 1, the major
/// radius) occupies the middle third; the groove (`minor_ratio`) the rest.
/// The flanks are the facets between crest and groove samples.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThreadPhase {
    /// Minor radius over major radius.
    pub minor_ratio: f64,
}

impl Profile for ThreadPhase {
    fn radius_at(&self, t: f64) -> f64 {
        let u = t.rem_euclid(1.0);
        if (1.0 / 3.0..2.0 / 3.0).contains(&u) {
            1.0
        } else {
            self.minor_ratio
        }
    }

    fn name(&self) -> &'static str {
        "thread"
    }
}

/// Upper half of a unit ellipse; 0 outside `[-1, 1]`.
fn ellipse(x: f64) -> f64 {
    (1.0 - x * x).max(0.0).sqrt()
}

fn smoothstep(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

fn lerp(a: f64, b: f64, s: f64) -> f64 {
    a + (b - a) * s
}
