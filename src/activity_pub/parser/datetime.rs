//! Datetime parsing for AS2 `xsd:dateTime` values.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use tracing::debug;

/// Lenient ISO-8601 parse. Accepts a missing offset (assumed UTC), which
/// some servers send despite the AS2 profile requiring one.
pub(crate) fn parse_timestamp(value: &str) -> Option<Timestamp> {
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Some(timestamp);
    }
    let datetime = value.parse::<DateTime>().ok()?;
    datetime
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Like [`parse_timestamp`], additionally rejecting years outside
/// [0, 9999]. Dates far outside that range have been used to overflow
/// datetime handling downstream.
pub(crate) fn parse_bounded_timestamp(value: &str) -> Option<Timestamp> {
    let timestamp = parse_timestamp(value)?;
    let year = timestamp.to_zoned(TimeZone::UTC).year();
    if !(0..=9999).contains(&year) {
        debug!(target: "apub", year, "rejected out-of-range datetime");
        return None;
    }
    Some(timestamp)
}
