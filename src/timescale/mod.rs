mod calendar;
mod error;
mod julian;
mod sidereal;

pub use calendar::CalendarTime;
pub use error::ParseError;
pub use julian::{JulianDate, MINUTES_PER_DAY, SECONDS_PER_DAY};
pub use sidereal::earth_rotation_angle;

/// Parse a `YYYY-MM-DDThh:mm:ssZ` timestamp straight into a Julian date.
pub fn to_time_point(s: &str) -> Result<JulianDate, ParseError> {
    let calendar: CalendarTime = s.parse()?;
    Ok(JulianDate::from_calendar(&calendar))
}

/// Format a Julian date as `YYYY-MM-DDThh:mm:ssZ`, truncating sub-second remainders.
pub fn to_calendar_string(jd: JulianDate) -> String {
    jd.to_calendar().to_string()
}
