//! Unit-carrying wrappers for the quantities that cross module boundaries.
//!
//! Public results are reported in degrees and kilometers; trigonometry runs in
//! radians. Converting between them is always an explicit call.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Radians(pub f64);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilometers(pub f64);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl Degrees {
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }

    /// Wraps into [0, 360).
    pub fn wrapped(self) -> Self {
        let wrapped = self.0.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360.0
        if wrapped >= 360.0 {
            Degrees(0.0)
        } else {
            Degrees(wrapped)
        }
    }
}

impl Radians {
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }
}

impl Meters {
    pub fn to_kilometers(self) -> Kilometers {
        Kilometers(self.0 / 1000.0)
    }
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_into_half_open_range() {
        assert_eq!(Degrees(-90.0).wrapped(), Degrees(270.0));
        assert_eq!(Degrees(360.0).wrapped(), Degrees(0.0));
        assert_eq!(Degrees(-1e-15).wrapped(), Degrees(0.0));
        assert_eq!(Degrees(725.5).wrapped(), Degrees(5.5));
    }

    #[test]
    fn conversions() {
        assert!((Degrees(180.0).to_radians().0 - std::f64::consts::PI).abs() < 1e-15);
        assert_eq!(Meters(1250.0).to_kilometers(), Kilometers(1.25));
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(12.345_678, 2), 12.35);
        assert_eq!(round_to(-0.123_45, 3), -0.123);
        assert_eq!(round_to(599.999_999_9, 2), 600.0);
    }
}
