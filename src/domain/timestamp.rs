// Second-precision timestamps from the telemetry wire
use chrono::{NaiveDateTime, Timelike};
use std::fmt;

/// An instant truncated to whole seconds.
///
/// The telemetry backend sends ISO-8601 strings with fractional seconds and
/// a UTC marker; everything downstream (filtering, joining) works at second
/// granularity, so the fraction is dropped at parse time. Ordering is the
/// plain temporal ordering of the truncated instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

const FULL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fallback patterns for `registered_at` values that are not valid RFC 3339.
const FALLBACK_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl Timestamp {
    /// Parse a wire timestamp, truncating to whole seconds.
    ///
    /// Tries RFC 3339 first (the expected shape), then the generic fallback
    /// patterns. Returns `None` when nothing matches; the caller keeps the
    /// raw string as a degraded label in that case.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return dt.naive_utc().with_nanosecond(0).map(Self);
        }

        for format in FALLBACK_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return dt.with_nanosecond(0).map(Self);
            }
        }

        None
    }

    /// Full truncated form, `YYYY-MM-DDTHH:MM:SS`.
    pub fn full(&self) -> String {
        self.0.format(FULL_FORMAT).to_string()
    }

    /// `HH:MM` label for dense charts.
    pub fn hour_minute(&self) -> String {
        self.0.format("%H:%M").to_string()
    }

    /// `HH:MM:SS` label for medium-density charts.
    pub fn hour_minute_second(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }

    /// Whole seconds from `earlier` to `self` (negative when `self` is earlier).
    pub fn seconds_since(&self, earlier: &Timestamp) -> i64 {
        (self.0 - earlier.0).num_seconds()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FULL_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_fraction() {
        let ts = Timestamp::parse("2025-01-15T08:00:00.123456Z").unwrap();
        assert_eq!(ts.full(), "2025-01-15T08:00:00");
    }

    #[test]
    fn test_parse_truncated_form() {
        let ts = Timestamp::parse("2025-01-15T08:00:00").unwrap();
        assert_eq!(ts.full(), "2025-01-15T08:00:00");
    }

    #[test]
    fn test_parse_fallback_space_separated() {
        let ts = Timestamp::parse("2025-01-15 08:00:00.5").unwrap();
        assert_eq!(ts.full(), "2025-01-15T08:00:00");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Timestamp::parse("not a timestamp").is_none());
    }

    #[test]
    fn test_ordering_matches_lexicographic_form() {
        let a = Timestamp::parse("2025-01-15T08:00:00Z").unwrap();
        let b = Timestamp::parse("2025-01-15T08:00:01Z").unwrap();
        assert!(a < b);
        assert!(a.full() < b.full());
    }

    #[test]
    fn test_fraction_truncation_makes_instants_equal() {
        let a = Timestamp::parse("2025-01-15T08:00:00.100Z").unwrap();
        let b = Timestamp::parse("2025-01-15T08:00:00.900Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_labels() {
        let ts = Timestamp::parse("2025-01-15T08:05:42Z").unwrap();
        assert_eq!(ts.hour_minute(), "08:05");
        assert_eq!(ts.hour_minute_second(), "08:05:42");
    }

    #[test]
    fn test_seconds_since() {
        let a = Timestamp::parse("2025-01-15T08:00:00Z").unwrap();
        let b = Timestamp::parse("2025-01-15T08:00:30Z").unwrap();
        assert_eq!(b.seconds_since(&a), 30);
        assert_eq!(a.seconds_since(&b), -30);
    }
}
