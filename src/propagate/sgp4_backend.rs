use serde::Deserialize;
use sgp4::{Constants, Elements};

use super::error::PropagationError;
use super::parsing::parse_tle_lines;
use super::{MinutesSinceEpoch, Propagator, StateVector};
use crate::timescale::JulianDate;

/// How the SGP4 constants are derived from the mean elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sgp4Mode {
    #[default]
    Standard,
    AfspcCompatibility,
}

pub struct Sgp4Propagator {
    elements: Elements,
    constants: Constants,
    epoch: JulianDate,
}

impl Sgp4Propagator {
    pub fn from_tle<S: AsRef<str>>(lines: &[S], mode: Sgp4Mode) -> Result<Self, PropagationError> {
        let (name, line1, line2) = parse_tle_lines(lines)?;
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        Self::from_elements(elements, mode)
    }

    pub fn from_elements(elements: Elements, mode: Sgp4Mode) -> Result<Self, PropagationError> {
        let constants = match mode {
            Sgp4Mode::Standard => Constants::from_elements(&elements)?,
            Sgp4Mode::AfspcCompatibility => {
                Constants::from_elements_afspc_compatibility_mode(&elements)?
            }
        };
        let epoch = JulianDate::from_naive(&elements.datetime);
        Ok(Self {
            elements,
            constants,
            epoch,
        })
    }

    pub fn name(&self) -> String {
        self.elements
            .object_name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", self.elements.norad_id))
    }
}

impl Propagator for Sgp4Propagator {
    fn epoch(&self) -> JulianDate {
        self.epoch
    }

    fn propagate(&self, t: MinutesSinceEpoch) -> Result<StateVector, PropagationError> {
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(t.0))
            .map_err(|e| PropagationError::Propagation {
                minutes: t,
                message: e.to_string(),
            })?;
        Ok(StateVector {
            position_km: prediction.position,
            velocity_km_s: prediction.velocity,
        })
    }
}
