use chrono::{Datelike, NaiveDateTime, Timelike};

use super::calendar::CalendarTime;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Julian day number of 1582-10-15, the first day of the Gregorian calendar.
const GREGORIAN_REFORM_JDN: i64 = 2_299_161;

/// Day fractions within this many seconds below a whole second count as that second.
/// Covers f64 resolution of a Julian date (~40 us around the year 2000).
const TRUNCATION_TOLERANCE_S: f64 = 1e-3;

/// Continuous time as a fractional Julian day count (UTC).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDate(pub f64);

impl JulianDate {
    pub const J2000: JulianDate = JulianDate(2_451_545.0);

    pub fn from_calendar(t: &CalendarTime) -> Self {
        let midnight = day_number(t.year, t.month, t.day);
        Self(midnight + f64::from(t.seconds_of_day()) / SECONDS_PER_DAY)
    }

    /// Converts a chrono timestamp, keeping its sub-second part.
    pub fn from_naive(dt: &NaiveDateTime) -> Self {
        let midnight = day_number(dt.year(), dt.month(), dt.day());
        let seconds = f64::from(dt.num_seconds_from_midnight())
            + f64::from(dt.nanosecond()) / 1e9;
        Self(midnight + seconds / SECONDS_PER_DAY)
    }

    /// Inverse of [`JulianDate::from_calendar`]. Sub-second remainders are truncated.
    pub fn to_calendar(self) -> CalendarTime {
        let shifted = self.0 + 0.5;
        let mut z = shifted.floor() as i64;
        let fraction = shifted - z as f64;

        let mut seconds = (fraction * SECONDS_PER_DAY + TRUNCATION_TOLERANCE_S).floor() as i64;
        if seconds >= SECONDS_PER_DAY as i64 {
            z += 1;
            seconds -= SECONDS_PER_DAY as i64;
        }

        let a = if z >= GREGORIAN_REFORM_JDN {
            let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
            z + 1 + alpha - alpha / 4
        } else {
            z
        };
        let b = a + 1524;
        let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
        let d = (365.25 * c as f64).floor() as i64;
        let e = ((b - d) as f64 / 30.6001).floor() as i64;

        let day = b - d - (30.6001 * e as f64).floor() as i64;
        let month = if e < 14 { e - 1 } else { e - 13 };
        let year = if month > 2 { c - 4716 } else { c - 4715 };

        CalendarTime {
            year: year as i32,
            month: month as u32,
            day: day as u32,
            hour: (seconds / 3600) as u32,
            minute: (seconds % 3600 / 60) as u32,
            second: (seconds % 60) as u32,
        }
    }

    pub fn plus_seconds(self, seconds: f64) -> Self {
        Self(self.0 + seconds / SECONDS_PER_DAY)
    }

    pub fn seconds_since(self, earlier: JulianDate) -> f64 {
        (self.0 - earlier.0) * SECONDS_PER_DAY
    }

    pub fn minutes_since(self, earlier: JulianDate) -> f64 {
        (self.0 - earlier.0) * MINUTES_PER_DAY
    }

    pub fn days_since_j2000(self) -> f64 {
        self.0 - Self::J2000.0
    }
}

/// Julian date at 00:00 UTC of the given calendar day. The Gregorian century
/// correction only applies from the calendar reform onwards.
fn day_number(year: i32, month: u32, day: u32) -> f64 {
    let (mut y, mut m) = (i64::from(year), i64::from(month));
    if m <= 2 {
        y -= 1;
        m += 12;
    }

    let b = if (year, month, day) >= (1582, 10, 15) {
        let a = y / 100;
        2 - a + a / 4
    } else {
        0
    };

    (365.25 * (y + 4716) as f64).floor() + (30.6001 * (m + 1) as f64).floor()
        + f64::from(day)
        + b as f64
        - 1524.5
}
