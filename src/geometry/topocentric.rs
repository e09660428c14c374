use super::error::GeometryError;
use super::norm;
use super::observer::ObserverLocation;
use crate::timescale::{earth_rotation_angle, JulianDate};
use crate::units::{Degrees, Kilometers, Radians};

/// Look angles of a satellite from an observer. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub azimuth: Degrees,
    pub elevation: Degrees,
    pub range: Kilometers,
}

/// Topocentric azimuth/elevation/range of an inertial position (km) at `at`.
pub fn observe(
    position_eci_km: [f64; 3],
    at: JulianDate,
    observer: &ObserverLocation,
) -> Result<Observation, GeometryError> {
    let sat_ecef = eci_to_ecef(position_eci_km, earth_rotation_angle(at));
    let sta_ecef = observer.position_ecef_km();

    let dr = [
        sat_ecef[0] - sta_ecef[0],
        sat_ecef[1] - sta_ecef[1],
        sat_ecef[2] - sta_ecef[2],
    ];
    look_angles(dr, observer.latitude(), observer.longitude())
}

/// Look angles of an Earth-fixed observer-to-satellite vector.
fn look_angles(dr: [f64; 3], lat: Radians, lon: Radians) -> Result<Observation, GeometryError> {
    let (south, east, zenith) = ecef_to_sez(dr, lat, lon);

    let range_km = norm([south, east, zenith]);
    if !range_km.is_finite() {
        return Err(GeometryError::NonFinite { range_km });
    }
    if range_km <= 0.0 {
        return Err(GeometryError::DegenerateRange { range_km });
    }

    let elevation = Radians((zenith / range_km).clamp(-1.0, 1.0).asin()).to_degrees();
    let azimuth = Radians(east.atan2(-south)).to_degrees().wrapped();

    Ok(Observation {
        azimuth,
        elevation,
        range: Kilometers(range_km),
    })
}

/// Rotates an inertial vector into the Earth-fixed frame by `-gmst` about the pole.
pub fn eci_to_ecef(pos_eci: [f64; 3], gmst: Radians) -> [f64; 3] {
    let cos_gmst = gmst.0.cos();
    let sin_gmst = gmst.0.sin();
    [
        pos_eci[0] * cos_gmst + pos_eci[1] * sin_gmst,
        -pos_eci[0] * sin_gmst + pos_eci[1] * cos_gmst,
        pos_eci[2],
    ]
}

fn ecef_to_sez(dr: [f64; 3], lat: Radians, lon: Radians) -> (f64, f64, f64) {
    let sin_lat = lat.0.sin();
    let cos_lat = lat.0.cos();
    let sin_lon = lon.0.sin();
    let cos_lon = lon.0.cos();

    let south = sin_lat * cos_lon * dr[0] + sin_lat * sin_lon * dr[1] - cos_lat * dr[2];
    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let zenith = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (south, east, zenith)
}
