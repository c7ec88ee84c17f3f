//! Query-window timespan helper.
//!
//! Log queries are executed against a `"start/end"` ISO-8601 timespan. This
//! helper only parses and reassembles; the query builder itself never sees
//! time, which keeps it deterministic.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not an ISO-8601 timestamp")]
pub struct InvalidTimestamp(pub String);

/// Combine a start timestamp and an optional end timestamp into a
/// `"start/end"` timespan. The end defaults to now when omitted; unparsable
/// timestamps are rejected, never defaulted.
pub fn format_timespan(start: &str, end: Option<&str>) -> Result<String, InvalidTimestamp> {
    let start = parse_timestamp(start)?;
    let end = match end {
        Some(end) => parse_timestamp(end)?,
        None => Utc::now(),
    };
    Ok(format!(
        "{}/{}",
        start.to_rfc3339_opts(SecondsFormat::Secs, true),
        end.to_rfc3339_opts(SecondsFormat::Secs, true)
    ))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, InvalidTimestamp> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| InvalidTimestamp(value.to_string()))
}
