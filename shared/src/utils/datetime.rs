//! Timestamp parsing and formatting helpers for the reporting surface

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Parse an ISO-8601 instant or a bare `YYYY-MM-DD` date (read as midnight UTC)
pub fn parse_report_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Millisecond precision with an explicit `+00:00` offset
pub fn format_measurement_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_report_datetime("2024-03-01T10:00:00+01:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_date() {
        let parsed = parse_report_datetime("2024-03-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_report_datetime("yesterday").is_none());
        assert!(parse_report_datetime("2024-13-45").is_none());
    }

    #[test]
    fn test_measurement_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(format_measurement_timestamp(at), "2024-03-01T09:05:07.000+00:00");
    }
}
