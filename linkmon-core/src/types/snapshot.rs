//! Typed snapshot model.
//!
//! The store treats payloads as opaque documents; these types exist for the
//! consumers that need to look inside one (dashboard, CLI). Wire names are
//! camelCase to match what the devices send. Decoding happens only at the
//! presentation edge, never on the storage path.

use serde::{Deserialize, Serialize};

/// Full status snapshot as pushed by a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// ISO-8601 report time, stamped by the device.
    pub timestamp: String,

    /// MAC address or serial of the reporting device.
    pub device_id: String,

    /// System health section. Required on ingest.
    pub system: SystemInfo,

    /// Radio interfaces (ath0, wlan0, ...).
    #[serde(default)]
    pub wireless: Vec<WirelessInterface>,

    /// Stations associated to this device.
    #[serde(default)]
    pub stations: Vec<WirelessStation>,

    /// Wired/bridge interface counters.
    #[serde(default)]
    pub networks: Vec<NetworkInterface>,

    /// Site survey results, when the device ran one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wireless_scan: Option<Vec<WirelessScan>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airmax: Option<AirMaxInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsInfo>,

    /// Raw routing table lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arp: Option<Vec<ArpEntry>>,
}

/// System health: identity, uptime, load, memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub hostname: String,
    pub model: String,
    pub firmware_version: String,
    /// Seconds since boot.
    pub uptime: u64,
    pub load_average: String,
    /// Percent.
    pub cpu_usage: f64,
    /// KB.
    pub memory_total: u64,
    /// KB.
    pub memory_free: u64,
    /// Percent.
    pub memory_usage: f64,
}

/// One radio interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirelessInterface {
    /// e.g. ath0, wlan0
    pub interface_name: String,
    pub ssid: String,
    /// Station, Access Point, ...
    pub mode: String,
    /// MHz.
    pub frequency: u32,
    pub channel: u32,
    /// MHz (20, 40, 80, ...).
    pub channel_width: u32,
    /// dBm.
    pub tx_power: i32,
    /// dBm.
    pub rssi: i32,
    /// dBm.
    pub noise: i32,
    /// dBm.
    pub signal: i32,
    /// Client connection quality, percent.
    pub ccq: f64,
    pub mac_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_stations: Option<u32>,
}

/// A station associated to one of our radios.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirelessStation {
    pub mac_address: String,
    /// dBm.
    pub signal: i32,
    /// dBm.
    pub noise: i32,
    /// dBm.
    pub rssi: i32,
    /// Percent.
    pub ccq: f64,
    /// Mbps.
    pub tx_rate: f64,
    /// Mbps.
    pub rx_rate: f64,
    /// Seconds associated.
    pub uptime: u64,
    /// Meters, when the radio reports it.
    #[serde(default)]
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ip: Option<String>,
}

/// Wired/bridge interface counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    /// eth0, eth1, br0, ...
    pub name: String,
    pub mac_address: String,
    pub ip_address: String,
    pub netmask: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<String>,
    pub mtu: u32,
    /// up/down.
    pub status: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
}

/// One neighbor seen during a site survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirelessScan {
    pub ssid: String,
    pub mac_address: String,
    pub channel: u32,
    /// MHz.
    pub frequency: u32,
    /// dBm.
    pub signal: i32,
    pub quality: f64,
    pub encryption: String,
    pub mode: String,
}

/// AirMax TDMA state, on devices that run it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirMaxInfo {
    pub enabled: bool,
    pub quality: f64,
    pub capacity: f64,
    pub priority: u32,
}

/// GPS fix, on devices with a receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellites: Option<u32>,
}

/// ARP table entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArpEntry {
    pub ip: String,
    pub mac: String,
    pub device: String,
}
