//! Time utilities: map persisted timestamps onto calendar days in a time zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Time zone used when nothing else is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Parse an IANA zone name like "America/Sao_Paulo".
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse().ok()
}

/// Calendar day of a persisted timestamp, as seen in `tz`.
///
/// Accepts RFC 3339 timestamps (converted into `tz`), naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps (already local) and plain
/// `YYYY-MM-DD` dates.
pub fn local_date(raw: &str, tz: Tz) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&tz).date_naive());
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt.date());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Format a UTC time the way the mobile app stored it (`2023-01-05T12:00:00.000Z`).
pub fn to_rfc3339_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
