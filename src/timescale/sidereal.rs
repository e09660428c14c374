use super::julian::JulianDate;
use crate::units::Radians;

const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const GMST_AT_J2000_DEG: f64 = 280.460_618_37;
const GMST_RATE_DEG_PER_DAY: f64 = 360.985_647_366_29;
const GMST_T2_DEG: f64 = 0.000_387_933;
const GMST_T3_DIVISOR: f64 = 38_710_000.0;

/// Greenwich mean sidereal angle, normalized to [0, 2pi).
pub fn earth_rotation_angle(jd: JulianDate) -> Radians {
    let days = jd.days_since_j2000();
    let t = days / DAYS_PER_JULIAN_CENTURY;
    let degrees = GMST_AT_J2000_DEG + GMST_RATE_DEG_PER_DAY * days + GMST_T2_DEG * t * t
        - t * t * t / GMST_T3_DIVISOR;
    let mut normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 {
        normalized = 0.0;
    }
    Radians(normalized.to_radians())
}
