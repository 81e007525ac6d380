//! ISO-8601 timestamp conversion helpers

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Parse an ISO-8601 date or datetime into a unix timestamp.
///
/// Accepts both full RFC 3339 datetimes ("2020-01-01T00:08:20Z") and
/// bare dates ("2020-01-01"), which are taken as midnight UTC.
/// Returns `None` for anything else; callers log and skip the field.
pub(crate) fn parse_iso8601(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
    }
    None
}

/// Format a unix timestamp as an ISO-8601 datetime in UTC.
///
/// Returns `None` if the timestamp is outside the representable range.
pub(crate) fn format_iso8601(timestamp: u64) -> Option<String> {
    let dt = DateTime::<Utc>::from_timestamp(i64::try_from(timestamp).ok()?, 0)?;
    Some(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_date() {
        assert_eq!(parse_iso8601("2020-01-01"), Some(1577836800));
    }

    #[test]
    fn test_parse_full_datetime() {
        assert_eq!(parse_iso8601("2020-01-01T00:08:20Z"), Some(1577837300));
        assert_eq!(parse_iso8601("2020-01-01T01:08:20+01:00"), Some(1577837300));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_iso8601("yesterday"), None);
        assert_eq!(parse_iso8601("2020-13-45"), None);
        assert_eq!(parse_iso8601(""), None);
    }

    #[test]
    fn test_format_roundtrip() {
        let formatted = format_iso8601(1577837300).unwrap();
        assert_eq!(formatted, "2020-01-01T00:08:20Z");
        assert_eq!(parse_iso8601(&formatted), Some(1577837300));
    }
}
