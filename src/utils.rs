use std::cmp::Ordering;

use chrono::NaiveDate;

/// Case-insensitive substring check used by roster search.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive ordering for name columns.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Parse a calendar date from user or stored input.
///
/// Accepts `YYYY-MM-DD`, tolerating a trailing time component (ISO datetime
/// strings are truncated to their date part). Returns `None` for anything
/// else rather than an error; callers decide whether that is a validation
/// failure or an "Unknown" classification.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // Tolerate a trailing time component: retry on the first ten bytes.
    // `get` returns None when byte 10 is not a character boundary, so
    // arbitrary multi-byte input falls through instead of panicking.
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}
