//! Instants parsed from document date strings.
//!
//! Dates arrive as strings and leave as the same strings, so a
//! [`Timestamp`] keeps the raw text next to the parsed epoch milliseconds.
//!
//! # Accepted formats
//! - RFC 3339 with offset (`2024-06-03T09:00:00.000Z`, `...+02:00`)
//! - Naive date-time (`2024-06-03T09:00:00`, `2024-06-03 09:00`), read as
//!   local time
//! - Plain date (`2024-06-03`), read as UTC midnight

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{Result, TimetableError};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A point in time, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    millis: i64,
}

impl Timestamp {
    /// Parses a document date string.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let millis = parse_millis(&raw)?;
        Ok(Self { raw, millis })
    }

    /// Creates a timestamp from epoch milliseconds, rendered as RFC 3339 UTC.
    pub fn from_millis(millis: i64) -> Result<Self> {
        let dt = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            TimetableError::InvalidTimestamp {
                value: millis.to_string(),
                reason: "out of range".into(),
            }
        })?;
        Ok(Self {
            raw: dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            millis,
        })
    }

    /// Epoch milliseconds.
    #[inline]
    pub fn millis(&self) -> i64 {
        self.millis
    }

    /// The text as it appeared in the document.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_millis(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp_millis());
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.timestamp_millis())
                .ok_or_else(|| TimetableError::InvalidTimestamp {
                    value: raw.to_string(),
                    reason: "does not exist in the local time zone".into(),
                });
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp_millis());
        }
    }
    Err(TimetableError::InvalidTimestamp {
        value: raw.to_string(),
        reason: "unrecognised date format".into(),
    })
}

impl TryFrom<String> for Timestamp {
    type Error = TimetableError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(raw)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

/// Reads an optional timestamp where an empty string means absent.
pub(crate) fn deserialize_blank_as_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => Timestamp::parse(raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Time zone used to decide whether two instants share a calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// The machine's local time zone.
    #[default]
    Local,
    /// UTC.
    Utc,
}

impl DayBoundary {
    /// Calendar date of an instant in this zone.
    pub fn calendar_day(self, ts: &Timestamp) -> Option<NaiveDate> {
        let utc = DateTime::<Utc>::from_timestamp_millis(ts.millis)?;
        Some(match self {
            DayBoundary::Local => utc.with_timezone(&Local).date_naive(),
            DayBoundary::Utc => utc.date_naive(),
        })
    }

    /// Whether both instants fall on the same calendar day.
    pub fn same_day(self, a: &Timestamp, b: &Timestamp) -> bool {
        match (self.calendar_day(a), self.calendar_day(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let ts = Timestamp::parse("2024-06-03T09:00:00.000Z").unwrap();
        assert_eq!(ts.millis(), 1_717_405_200_000);
        assert_eq!(ts.as_str(), "2024-06-03T09:00:00.000Z");

        let offset = Timestamp::parse("2024-06-03T11:00:00+02:00").unwrap();
        assert_eq!(offset.millis(), ts.millis());
    }

    #[test]
    fn test_parse_plain_date_is_utc_midnight() {
        let ts = Timestamp::parse("2024-06-03").unwrap();
        assert_eq!(ts.millis(), 1_717_372_800_000);
    }

    #[test]
    fn test_parse_naive_formats() {
        let a = Timestamp::parse("2024-06-03T09:00:00").unwrap();
        let b = Timestamp::parse("2024-06-03 09:00").unwrap();
        assert_eq!(a.millis(), b.millis());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Timestamp::parse("next tuesday").unwrap_err();
        assert!(matches!(err, TimetableError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_from_millis_renders_utc() {
        let ts = Timestamp::from_millis(1_717_405_200_000).unwrap();
        assert_eq!(ts.as_str(), "2024-06-03T09:00:00.000Z");
    }

    #[test]
    fn test_serde_keeps_raw_text() {
        let ts: Timestamp = serde_json::from_str("\"2024-06-03T09:00:00+02:00\"").unwrap();
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2024-06-03T09:00:00+02:00\""
        );
        assert!(serde_json::from_str::<Timestamp>("\"not a date\"").is_err());
    }

    #[test]
    fn test_same_day_utc() {
        let morning = Timestamp::parse("2024-06-03T08:00:00Z").unwrap();
        let evening = Timestamp::parse("2024-06-03T23:30:00Z").unwrap();
        let next = Timestamp::parse("2024-06-04T00:30:00Z").unwrap();
        assert!(DayBoundary::Utc.same_day(&morning, &evening));
        assert!(!DayBoundary::Utc.same_day(&morning, &next));
    }
}
