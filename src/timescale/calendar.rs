use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ParseError;

/// A UTC instant with whole-second resolution, written as `YYYY-MM-DDThh:mm:ssZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

const PATTERN_LEN: usize = "YYYY-MM-DDThh:mm:ssZ".len();

impl CalendarTime {
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?;
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    pub fn seconds_of_day(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }
}

impl FromStr for CalendarTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if !s.is_ascii() || bytes.len() != PATTERN_LEN {
            return Err(ParseError::new(s, "expected YYYY-MM-DDThh:mm:ssZ"));
        }

        for (idx, expected) in [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':'), (19, b'Z')]
        {
            if bytes[idx] != expected {
                return Err(ParseError::new(
                    s,
                    format!("expected '{}' at position {}", expected as char, idx),
                ));
            }
        }

        let field = |range: std::ops::Range<usize>, name: &str| -> Result<u32, ParseError> {
            let digits = &s[range];
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::new(s, format!("{} is not numeric", name)));
            }
            digits
                .parse()
                .map_err(|_| ParseError::new(s, format!("{} is not numeric", name)))
        };

        let year = field(0..4, "year")? as i32;
        let month = field(5..7, "month")?;
        let day = field(8..10, "day")?;
        let hour = field(11..13, "hour")?;
        let minute = field(14..16, "minute")?;
        let second = field(17..19, "second")?;

        if !(1..=12).contains(&month) {
            return Err(ParseError::new(s, format!("month {} out of range", month)));
        }
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(ParseError::new(s, format!("day {} out of range", day)));
        }
        if hour > 23 {
            return Err(ParseError::new(s, format!("hour {} out of range", hour)));
        }
        if minute > 59 {
            return Err(ParseError::new(s, format!("minute {} out of range", minute)));
        }
        if second > 59 {
            return Err(ParseError::new(s, format!("second {} out of range", second)));
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl Serialize for CalendarTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
