//! Domain types for device telemetry.

pub mod record;
pub mod snapshot;

pub use record::StatusRecord;
pub use snapshot::{
    AirMaxInfo, ArpEntry, GpsInfo, NetworkInterface, StatusSnapshot, SystemInfo,
    WirelessInterface, WirelessScan, WirelessStation,
};
