//! Timezone-aware timestamps.
//!
//! A [`Timestamp`] pairs an instant with the zone label it was written in, so
//! a record read as `... UTC 2020` renders back as `UTC` rather than `+0000`.
//! Comparisons only look at the instant.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::error::SourceError;

const FIELD: &str = "timestamp";

/// A point in time with timezone awareness.
#[derive(Debug, Clone)]
pub struct Timestamp {
    instant: DateTime<FixedOffset>,
    zone: String,
}

impl Timestamp {
    /// Creates a timestamp with an explicit zone label.
    pub fn new(instant: DateTime<FixedOffset>, zone: impl Into<String>) -> Self {
        Timestamp {
            instant,
            zone: zone.into(),
        }
    }

    /// Parses the Unix `date` layout, e.g. `Sun Apr 12 22:10:38 UTC 2020`.
    ///
    /// The day may be space padded. The zone token is either a numeric
    /// `+hhmm` / `-hhmm` offset, or an abbreviation which is kept as the
    /// label at a zero offset.
    pub fn parse_unix_date(s: &str) -> Result<Self, SourceError> {
        let invalid = |reason: &str| SourceError::invalid_field(FIELD, s, reason);

        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [weekday, month, day, clock, zone, year] = tokens[..] else {
            return Err(invalid("expected layout 'Mon Jan 2 15:04:05 MST 2006'"));
        };

        let naive = NaiveDateTime::parse_from_str(
            &format!("{weekday} {month} {day} {clock} {year}"),
            "%a %b %d %H:%M:%S %Y",
        )
        .map_err(|e| SourceError::invalid_field(FIELD, s, e))?;

        let (offset, label) = parse_zone(zone).ok_or_else(|| invalid("unrecognized zone"))?;
        let instant = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| invalid("ambiguous local time"))?;

        Ok(Timestamp::new(instant, label))
    }

    /// Parses an RFC 3339 timestamp, e.g. `2020-04-15T00:00:00Z`.
    pub fn parse_rfc3339(s: &str) -> Result<Self, SourceError> {
        DateTime::parse_from_rfc3339(s)
            .map(Timestamp::from)
            .map_err(|e| SourceError::invalid_field(FIELD, s, e))
    }

    /// Returns the instant with its offset.
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    /// Returns the zone label used when rendering.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Returns `true` if this timestamp is strictly before `other`.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self < other
    }

    /// Returns `true` if this timestamp is strictly after `other`.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self > other
    }
}

fn parse_zone(token: &str) -> Option<(FixedOffset, String)> {
    let bytes = token.as_bytes();
    match bytes.first() {
        Some(b'+' | b'-') => {
            if bytes.len() != 5 || !bytes[1..].iter().all(u8::is_ascii_digit) {
                return None;
            }
            let hours: i32 = token[1..3].parse().ok()?;
            let minutes: i32 = token[3..5].parse().ok()?;
            let secs = (hours * 3600 + minutes * 60) * if bytes[0] == b'-' { -1 } else { 1 };
            Some((FixedOffset::east_opt(secs)?, token.to_string()))
        }
        Some(_) if bytes.iter().all(u8::is_ascii_alphabetic) => {
            Some((FixedOffset::east_opt(0)?, token.to_string()))
        }
        _ => None,
    }
}

fn offset_label(offset: &FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return "UTC".to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("{sign}{:02}{:02}", secs / 3600, (secs % 3600) / 60)
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::new(dt.fixed_offset(), "UTC")
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        let zone = offset_label(dt.offset());
        Timestamp::new(dt, zone)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.instant.format("%a %b %e %H:%M:%S"),
            self.zone,
            self.instant.format("%Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap().into()
    }

    #[test]
    fn parses_unix_date() {
        let ts = Timestamp::parse_unix_date("Sun Apr 12 22:10:38 UTC 2020").unwrap();
        assert_eq!(ts, utc(2020, 4, 12, 22, 10, 38));
        assert_eq!(ts.zone(), "UTC");
    }

    #[test]
    fn parses_space_padded_day() {
        let ts = Timestamp::parse_unix_date("Sun Apr  5 01:02:03 UTC 2020").unwrap();
        assert_eq!(ts, utc(2020, 4, 5, 1, 2, 3));
    }

    #[test]
    fn parses_numeric_zone() {
        let ts = Timestamp::parse_unix_date("Sun Apr 12 22:10:38 +0200 2020").unwrap();
        assert_eq!(ts, utc(2020, 4, 12, 20, 10, 38));
        assert_eq!(ts.to_string(), "Sun Apr 12 22:10:38 +0200 2020");
    }

    #[test]
    fn keeps_unknown_abbreviation_at_zero_offset() {
        let ts = Timestamp::parse_unix_date("Sun Apr 12 22:10:38 PST 2020").unwrap();
        assert_eq!(ts, utc(2020, 4, 12, 22, 10, 38));
        assert_eq!(ts.zone(), "PST");
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(Timestamp::parse_unix_date("2022-01-01T00:00:00.000Z").is_err());
        assert!(Timestamp::parse_unix_date("").is_err());
        assert!(Timestamp::parse_unix_date("Sun Apr 12 22:10:38 U7C 2020").is_err());
    }

    #[test]
    fn rejects_wrong_weekday() {
        let err = Timestamp::parse_unix_date("Mon Apr 12 22:10:38 UTC 2020").unwrap_err();
        assert!(matches!(err, SourceError::InvalidField { field: "timestamp", .. }));
    }

    #[test]
    fn parses_rfc3339() {
        let ts = Timestamp::parse_rfc3339("2020-04-15T00:00:00Z").unwrap();
        assert_eq!(ts, utc(2020, 4, 15, 0, 0, 0));
        assert_eq!(ts.zone(), "UTC");

        let ts = Timestamp::parse_rfc3339("2020-04-15T00:00:00-05:30").unwrap();
        assert_eq!(ts.zone(), "-0530");
        assert!(Timestamp::parse_rfc3339("yesterday").is_err());
    }

    #[test]
    fn display_matches_unix_date_layout() {
        assert_eq!(
            utc(2020, 3, 12, 22, 10, 38).to_string(),
            "Thu Mar 12 22:10:38 UTC 2020"
        );
        assert_eq!(
            utc(2020, 4, 5, 1, 2, 3).to_string(),
            "Sun Apr  5 01:02:03 UTC 2020"
        );
    }

    #[test]
    fn ordering_ignores_zone_label() {
        let a = Timestamp::parse_unix_date("Sun Apr 12 22:10:38 +0200 2020").unwrap();
        let b = utc(2020, 4, 12, 20, 10, 38);
        assert_eq!(a, b);
        assert!(a.is_before(&utc(2020, 4, 12, 20, 10, 39)));
        assert!(a.is_after(&utc(2020, 4, 12, 20, 10, 37)));
    }
}
