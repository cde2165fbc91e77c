use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Accepts RFC 3339, a few naive date-time layouts, or a bare date (midnight).
/// Offsets are normalised to UTC.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.and_utc().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_into_utc() {
        let dt = parse_datetime("2025-06-30T10:00:00+07:00").unwrap();
        assert_eq!(dt.to_string(), "2025-06-30 03:00:00");
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_datetime("2025-06-30").unwrap();
        assert_eq!(dt.to_string(), "2025-06-30 00:00:00");
    }

    #[test]
    fn parses_html_datetime_local() {
        let dt = parse_datetime("2025-06-30T18:45").unwrap();
        assert_eq!(dt.to_string(), "2025-06-30 18:45:00");
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("tomorrow").is_none());
    }

    #[test]
    fn formats_as_rfc3339() {
        let dt = parse_datetime("2025-01-02 03:04:05").unwrap();
        assert_eq!(format_datetime(&dt), "2025-01-02T03:04:05+00:00");
    }
}
