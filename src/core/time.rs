//! Calendar-date handling for close approach timestamps
//!
//! JPL's close approach data publishes times in a calendar-date format like
//! `2029-Apr-13 21:46` (UTC, abbreviated month name, minute precision). This
//! module converts between that format and `chrono::NaiveDateTime`.

use chrono::NaiveDateTime;

/// Input format used by the close approach dataset (`cd` column)
pub const CD_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Output format for human-readable and serialized timestamps
///
/// Minute precision only; the source data carries no seconds.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a calendar-date string from the dataset.
///
/// Returns `None` for empty or unparsable input rather than an error; an
/// approach with an unreadable timestamp is kept, just with no time.
pub fn parse_cd(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, CD_FORMAT).ok()
}

/// Format a timestamp for display and serialization.
pub fn format_time(time: &NaiveDateTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}
