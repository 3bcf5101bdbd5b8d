//! Date reformatting for DTP and DMG segments.

use chrono::NaiveDate;

/// Reformat an ISO `YYYY-MM-DD` date to compact `YYYYMMDD`.
///
/// Empty input stays empty and anything unparseable passes through
/// unmodified; the encoder never fails on a date field.
pub fn compact_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%Y%m%d").to_string(),
        Err(_) => raw.to_string(),
    }
}
