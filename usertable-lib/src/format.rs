//! Display formatting for registration timestamps.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Display format: `12:30 21.04.2014`.
const DISPLAY_FORMAT: &str = "%H:%M %d.%m.%Y";

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-ish timestamp. Naive values are taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format `raw` as `HH:MM DD.MM.YYYY` in `tz`. Unparsable input is returned as is.
pub fn format_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_date(raw) {
        Some(dt) => dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Format `raw` as `HH:MM DD.MM.YYYY` in local time.
pub fn format_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}
