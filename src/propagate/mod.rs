mod error;
mod parsing;
mod sgp4_backend;

pub use error::PropagationError;
pub use parsing::parse_tle_lines;
pub use sgp4_backend::{Sgp4Mode, Sgp4Propagator};

use crate::timescale::JulianDate;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinutesSinceEpoch(pub f64);

/// Inertial (TEME) state in km and km/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Anything that can place a satellite in the inertial frame at a time offset
/// from its reference epoch.
pub trait Propagator {
    fn epoch(&self) -> JulianDate;

    fn propagate(&self, t: MinutesSinceEpoch) -> Result<StateVector, PropagationError>;

    fn minutes_since_epoch(&self, at: JulianDate) -> MinutesSinceEpoch {
        MinutesSinceEpoch(at.minutes_since(self.epoch()))
    }
}
