use chrono::NaiveDateTime;
use tracing::debug;

/// Naive date-time layouts accepted in the trip logs, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a trip-log timestamp such as `"2017-01-01 09:07:57"`.
///
/// The logs carry local wall-clock times without a zone, so the result is a
/// [`NaiveDateTime`]. Returns `None` for empty or unrecognised text.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let parsed = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok());

    if parsed.is_none() {
        debug!("could not parse timestamp \"{}\"", s);
    }
    parsed
}
