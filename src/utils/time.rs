use chrono::{SecondsFormat, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before Unix epoch")
        .as_secs() as i64
}

pub fn current_timestamp_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before Unix epoch")
        .as_millis() as i64
}

/// RFC3339 timestamp with millisecond precision, e.g. 2026-08-30T12:00:00.000Z
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Strict comparison: a timestamp exactly `timeout` seconds old is not
/// expired yet.
pub fn is_expired(timestamp: i64, timeout: i64, current_time: i64) -> bool {
    current_time - timestamp > timeout
}
