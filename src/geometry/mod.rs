mod error;
mod observer;
mod topocentric;

pub use error::GeometryError;
pub use observer::{ObserverLocation, EARTH_ECCENTRICITY_SQ, MEAN_EARTH_RADIUS_KM};
pub use topocentric::{eci_to_ecef, observe, Observation};

pub fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
