pub mod history;
pub mod push;
pub mod status;

use chrono::{DateTime, Local};

/// Render an ISO-8601 stamp in local time, falling back to the raw text when
/// a device sends something unparseable.
pub(crate) fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(instant) => instant.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
