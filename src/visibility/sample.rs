use serde::Serialize;

use crate::geometry::Observation;
use crate::timescale::CalendarTime;
use crate::units::{round_to, Degrees};

/// One evaluated instant, rounded to reporting precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub time: CalendarTime,
    #[serde(rename = "azimuth")]
    pub azimuth_deg: f64,
    #[serde(rename = "elevation")]
    pub elevation_deg: f64,
    #[serde(rename = "range")]
    pub range_km: f64,
    #[serde(rename = "rangeRate")]
    pub range_rate_km_s: f64,
    #[serde(rename = "altitude")]
    pub altitude_km: f64,
}

impl Sample {
    pub fn rounded(
        time: CalendarTime,
        observation: &Observation,
        range_rate_km_s: f64,
        altitude_km: f64,
    ) -> Self {
        Self {
            time,
            azimuth_deg: Degrees(round2(observation.azimuth.0)).wrapped().0,
            elevation_deg: round2(observation.elevation.0),
            range_km: round2(observation.range.0),
            range_rate_km_s: round_to(range_rate_km_s, 3),
            altitude_km: round2(altitude_km),
        }
    }
}

fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Kilometers;

    #[test]
    fn rounds_each_field_to_its_precision() {
        let time: CalendarTime = "2024-01-01T00:00:00Z".parse().unwrap();
        let observation = Observation {
            azimuth: Degrees(359.996),
            elevation: Degrees(12.3456),
            range: Kilometers(1234.5678),
        };
        let sample = Sample::rounded(time, &observation, -6.543_21, 412.349);
        assert_eq!(sample.azimuth_deg, 0.0);
        assert_eq!(sample.elevation_deg, 12.35);
        assert_eq!(sample.range_km, 1234.57);
        assert_eq!(sample.range_rate_km_s, -6.543);
        assert_eq!(sample.altitude_km, 412.35);
    }

    #[test]
    fn serialized_field_names() {
        let time: CalendarTime = "2024-01-01T00:00:00Z".parse().unwrap();
        let observation = Observation {
            azimuth: Degrees(10.0),
            elevation: Degrees(20.0),
            range: Kilometers(30.0),
        };
        let json = serde_json::to_value(Sample::rounded(time, &observation, 0.5, 400.0)).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        for key in ["time", "azimuth", "elevation", "range", "rangeRate", "altitude"] {
            assert!(keys.contains(&key.to_string()), "missing {}", key);
        }
        assert_eq!(json["time"], "2024-01-01T00:00:00Z");
    }
}
