use chrono::{DateTime, NaiveDateTime, Utc};

/// Airtable's static date format: always UTC, always zero sub-second
/// precision, always this exact shape. Destination semantics depend on
/// records carrying it byte-for-byte.
pub const DEST_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Renders a UTC instant in the destination format. Sub-second precision
/// is truncated by the literal `.000Z` suffix.
pub fn format_utc(ts: &DateTime<Utc>) -> String {
    ts.format(DEST_TIME_FORMAT).to_string()
}

/// Parses a destination-format string back into a UTC instant. Returns
/// `None` for anything that does not match the format exactly.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, DEST_TIME_FORMAT)
        .ok()
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}
