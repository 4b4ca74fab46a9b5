//! The persisted status record.

use crate::error::{LinkmonError, Result};
use serde_json::Value;

/// One telemetry snapshot from a device at a point in time.
///
/// The payload is the full document exactly as the device sent it. The store
/// never decomposes it beyond `timestamp` and `device_id`, so fields it has
/// never heard of survive a round-trip untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRecord {
    /// ISO-8601 instant, caller-supplied. The sole ordering key.
    pub timestamp: String,

    /// Opaque device identifier (MAC address or serial in practice).
    pub device_id: String,

    /// Full snapshot document, stored verbatim.
    pub payload: Value,
}

impl StatusRecord {
    /// Build a record from an incoming snapshot document.
    ///
    /// Pulls `timestamp` and `deviceId` out of the document and keeps the
    /// document itself as the payload. Missing or empty key fields fail
    /// validation; payload structure beyond that is the caller's concern.
    pub fn from_document(doc: Value) -> Result<Self> {
        let timestamp =
            doc.get("timestamp").and_then(Value::as_str).unwrap_or_default().to_string();
        let device_id =
            doc.get("deviceId").and_then(Value::as_str).unwrap_or_default().to_string();

        let record = Self { timestamp, device_id, payload: doc };
        record.validate()?;
        Ok(record)
    }

    /// Check the fields the store owns.
    pub fn validate(&self) -> Result<()> {
        if self.timestamp.is_empty() {
            return Err(LinkmonError::Validation { field: "timestamp" });
        }
        if self.device_id.is_empty() {
            return Err(LinkmonError::Validation { field: "deviceId" });
        }
        Ok(())
    }
}
