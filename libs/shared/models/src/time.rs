use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Format used for every timestamp sent to the Scheduling Service.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M";

// Tried in order after RFC 3339. `%.f` also matches an absent fraction.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognised appointment time '{0}'")]
pub struct TimeParseError(pub String);

/// A minute-precision instant in local clinic time.
///
/// Appointment times arrive as loosely formatted strings; comparing them as
/// text would make `2024-05-01T09:00` and `2024-05-01T09:00:00` different
/// slots. Every string is parsed into a `ClinicTime` first, and equality is
/// equality of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClinicTime(NaiveDateTime);

impl ClinicTime {
    pub fn new(datetime: NaiveDateTime) -> Self {
        let truncated = datetime
            .with_second(0)
            .and_then(|dt| dt.with_nanosecond(0))
            .unwrap_or(datetime);
        Self(truncated)
    }

    pub fn parse(raw: &str) -> Result<Self, TimeParseError> {
        let trimmed = raw.trim();

        if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::new(with_offset.with_timezone(&Local).naive_local()));
        }

        LOCAL_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(Self::new)
            .ok_or_else(|| TimeParseError(raw.to_string()))
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn is_before(&self, instant: NaiveDateTime) -> bool {
        self.0 < instant
    }

    pub fn shifted(&self, by: Duration) -> Self {
        Self::new(self.0 + by)
    }

    pub fn to_wire(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }

    /// Front-desk listing format, e.g. `May 1, 2:30 PM`. The year is omitted.
    pub fn display(&self) -> String {
        self.0.format("%b %-d, %-I:%M %p").to_string()
    }
}

impl From<NaiveDateTime> for ClinicTime {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::new(datetime)
    }
}

impl FromStr for ClinicTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ClinicTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

impl Serialize for ClinicTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for ClinicTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
