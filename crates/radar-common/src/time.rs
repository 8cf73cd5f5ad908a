//! Timestamp-token handling for MRMS filenames.
//!
//! MRMS files embed their valid time as a fixed-width `YYYYMMDD-HHMMSS`
//! token. Live snapshots carry that token verbatim; fallback snapshots
//! carry the current time formatted the same way so clients cannot
//! distinguish the two by format.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Format of the date-time token embedded in MRMS filenames.
const TOKEN_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Extract the `YYYYMMDD-HHMMSS` token from a filename, if present.
///
/// Scans for a 15-character window of 8 digits, a dash, and 6 digits.
pub fn extract_timestamp_token(filename: &str) -> Option<String> {
    let bytes = filename.as_bytes();
    if bytes.len() < 15 {
        return None;
    }
    for start in 0..=bytes.len() - 15 {
        let window = &bytes[start..start + 15];
        let date_ok = window[..8].iter().all(u8::is_ascii_digit);
        let time_ok = window[9..].iter().all(u8::is_ascii_digit);
        if date_ok && window[8] == b'-' && time_ok {
            return Some(filename[start..start + 15].to_string());
        }
    }
    None
}

/// Format a UTC instant as a filename-style token.
pub fn format_timestamp_token(dt: DateTime<Utc>) -> String {
    dt.format(TOKEN_FORMAT).to_string()
}

/// Parse a filename-style token back into a UTC instant.
pub fn parse_timestamp_token(token: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(token, TOKEN_FORMAT)
        .ok()
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}
