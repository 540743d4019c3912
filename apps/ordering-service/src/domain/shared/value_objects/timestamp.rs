//! Timestamp value object for order lifecycle stamps.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp. Serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a new Timestamp from a DateTime<Utc>.
    #[must_use]
    pub const fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the current timestamp.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse from an RFC 3339 string.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(s)?;
        Ok(Self(dt.with_timezone(&Utc)))
    }

    /// Build from Unix seconds. Out-of-range values clamp to the epoch.
    #[must_use]
    pub fn from_unix_seconds(secs: i64) -> Self {
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Get the inner DateTime<Utc>.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Format as RFC 3339.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Unix timestamp in seconds.
    #[must_use]
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Unix timestamp in milliseconds.
    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The UTC calendar day this instant falls on.
    #[must_use]
    pub fn utc_date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Shift forward by a duration.
    #[must_use]
    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_parse() {
        let ts = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-01-19T12:00:00+00:00");
    }

    #[test]
    fn timestamp_parse_invalid() {
        assert!(Timestamp::parse("not-a-date").is_err());
    }

    #[test]
    fn timestamp_ordering() {
        let ts1 = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        let ts2 = Timestamp::parse("2026-01-19T13:00:00Z").unwrap();
        assert!(ts1 < ts2);
    }

    #[test]
    fn unix_seconds_round_trip() {
        let ts = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        assert_eq!(ts.unix_seconds(), 1_768_824_000);
        assert_eq!(Timestamp::from_unix_seconds(1_768_824_000), ts);
    }

    #[test]
    fn plus_shifts_forward() {
        let ts = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        let later = ts.plus(Duration::hours(24));
        assert_eq!(later.to_rfc3339(), "2026-01-20T12:00:00+00:00");
    }

    #[test]
    fn utc_date_ignores_time_of_day() {
        let morning = Timestamp::parse("2026-01-19T00:05:00Z").unwrap();
        let night = Timestamp::parse("2026-01-19T23:55:00Z").unwrap();
        assert_eq!(morning.utc_date(), night.utc_date());
    }
}
