//! Parsing of the `since` query parameter.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use shared::{Error, Result};

/// Format the upstream `changed_since` parameter expects.
const UPSTREAM_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A validated "changed since" bound.
///
/// Both the upstream `changed_since` parameter and the client-side filter
/// use the same UTC rendering of the parsed instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinceFilter {
    instant: DateTime<Utc>,
}

impl SinceFilter {
    /// Parse an ISO-8601 timestamp.
    ///
    /// Accepts full date-times with `Z` or an offset, naive date-times (taken
    /// as UTC) and bare dates (midnight UTC).
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();

        let instant = DateTime::parse_from_rfc3339(trimmed)
            .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
            })
            .or_else(|_| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            })
            .map_err(|_| {
                Error::Validation(format!("since must be an ISO-8601 timestamp, got {:?}", raw))
            })?;

        Ok(Self { instant })
    }

    /// The bound as `YYYY-MM-DDTHH:MM:SSZ` in UTC.
    pub fn upstream_value(&self) -> String {
        self.instant.format(UPSTREAM_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utc() {
        let since = SinceFilter::parse(" 2024-02-01T00:00:00Z ").unwrap();
        assert_eq!(since.upstream_value(), "2024-02-01T00:00:00Z");
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let since = SinceFilter::parse("2024-02-01T02:30:00+02:00").unwrap();
        assert_eq!(since.upstream_value(), "2024-02-01T00:30:00Z");

        let since = SinceFilter::parse("2024-02-01T02:30:00+0200").unwrap();
        assert_eq!(since.upstream_value(), "2024-02-01T00:30:00Z");
    }

    #[test]
    fn test_naive_and_date_only() {
        let since = SinceFilter::parse("2024-02-01T10:11:12.345").unwrap();
        assert_eq!(since.upstream_value(), "2024-02-01T10:11:12Z");

        let since = SinceFilter::parse("2024-02-01").unwrap();
        assert_eq!(since.upstream_value(), "2024-02-01T00:00:00Z");
    }

    #[test]
    fn test_malformed() {
        for raw in ["yesterday", "2024-13-01", "01/02/2024", "2024-02-01T25:00:00Z"] {
            assert!(
                matches!(SinceFilter::parse(raw), Err(Error::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }
}
