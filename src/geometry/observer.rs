use crate::units::{Degrees, Kilometers, Meters, Radians};

/// Mean Earth radius, used for the observer's effective radius and for the
/// sub-satellite altitude.
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;
pub const EARTH_ECCENTRICITY_SQ: f64 = 0.006_694_379_99;

/// A fixed ground observer. Angles are held in radians, altitude in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverLocation {
    latitude: Radians,
    longitude: Radians,
    altitude: Kilometers,
}

impl ObserverLocation {
    pub fn new(latitude: Radians, longitude: Radians, altitude: Kilometers) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    pub fn from_degrees(latitude: Degrees, longitude: Degrees, altitude: Meters) -> Self {
        Self::new(
            latitude.to_radians(),
            longitude.to_radians(),
            altitude.to_kilometers(),
        )
    }

    pub fn latitude(&self) -> Radians {
        self.latitude
    }

    pub fn longitude(&self) -> Radians {
        self.longitude
    }

    pub fn altitude(&self) -> Kilometers {
        self.altitude
    }

    /// Earth-fixed position in km, with the oblate-Earth radius correction.
    pub fn position_ecef_km(&self) -> [f64; 3] {
        let lat = self.latitude.0;
        let lon = self.longitude.0;
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let c = 1.0 / (1.0 - EARTH_ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();
        let s = c * (1.0 - EARTH_ECCENTRICITY_SQ);
        let alt_km = self.altitude.0;
        let x = (MEAN_EARTH_RADIUS_KM * c + alt_km) * cos_lat * lon.cos();
        let y = (MEAN_EARTH_RADIUS_KM * c + alt_km) * cos_lat * lon.sin();
        let z = (MEAN_EARTH_RADIUS_KM * s + alt_km) * sin_lat;
        [x, y, z]
    }
}
