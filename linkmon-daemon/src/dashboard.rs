//! Server-rendered dashboard.
//!
//! One HTML page showing the most recent snapshot. The formatting helpers
//! mirror what the device's own UI shows: binary byte units, d/h/m uptime,
//! RSSI quality buckets.

use linkmon_core::types::{StatusRecord, StatusSnapshot};

/// Render the dashboard for the newest record, or a waiting page when the
/// store is empty.
pub fn render(latest: Option<&StatusRecord>) -> String {
    match latest {
        None => page(
            "<div class=\"notice\">Waiting for data. No device has reported yet.</div>".to_string(),
        ),
        Some(record) => {
            match serde_json::from_value::<StatusSnapshot>(record.payload.clone()) {
                Ok(snapshot) => page(render_snapshot(&snapshot)),
                // A payload the typed model can't read still gets shown raw;
                // the store's contract is verbatim, not well-formed.
                Err(_) => page(format!(
                    "<div class=\"notice\">Device {} reported at {}</div><pre>{}</pre>",
                    escape(&record.device_id),
                    escape(&record.timestamp),
                    escape(&serde_json::to_string_pretty(&record.payload).unwrap_or_default()),
                )),
            }
        }
    }
}

/// Error page for when the store itself fails.
pub fn render_error() -> String {
    page("<div class=\"notice\">Failed to load status data.</div>".to_string())
}

fn render_snapshot(snapshot: &StatusSnapshot) -> String {
    let mut body = String::new();

    let sys = &snapshot.system;
    body.push_str(&format!(
        r#"<section>
<h2>{hostname} <small>{model} · {firmware}</small></h2>
<table>
<tr><th>Device</th><td>{device}</td></tr>
<tr><th>Reported</th><td>{timestamp}</td></tr>
<tr><th>Uptime</th><td>{uptime}</td></tr>
<tr><th>Load</th><td>{load}</td></tr>
<tr><th>CPU</th><td>{cpu:.1}%</td></tr>
<tr><th>Memory</th><td>{mem_used:.1}% of {mem_total}</td></tr>
</table>
</section>
"#,
        hostname = escape(&sys.hostname),
        model = escape(&sys.model),
        firmware = escape(&sys.firmware_version),
        device = escape(&snapshot.device_id),
        timestamp = escape(&snapshot.timestamp),
        uptime = format_uptime(sys.uptime),
        load = escape(&sys.load_average),
        cpu = sys.cpu_usage,
        mem_used = sys.memory_usage,
        mem_total = format_bytes(sys.memory_total * 1024),
    ));

    if !snapshot.wireless.is_empty() {
        body.push_str("<section><h2>Radios</h2><table>\n");
        body.push_str("<tr><th>Interface</th><th>SSID</th><th>Mode</th><th>Freq</th><th>Signal</th><th>CCQ</th><th>Quality</th></tr>\n");
        for radio in &snapshot.wireless {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{} MHz (ch {})</td><td class=\"{}\">{} dBm</td><td>{:.0}%</td><td>{}</td></tr>\n",
                escape(&radio.interface_name),
                escape(&radio.ssid),
                escape(&radio.mode),
                radio.frequency,
                radio.channel,
                signal_class(radio.rssi),
                radio.signal,
                radio.ccq,
                signal_quality(radio.rssi),
            ));
        }
        body.push_str("</table></section>\n");
    }

    if !snapshot.stations.is_empty() {
        body.push_str("<section><h2>Stations</h2><table>\n");
        body.push_str("<tr><th>MAC</th><th>Signal</th><th>TX/RX</th><th>Uptime</th><th>Quality</th></tr>\n");
        for station in &snapshot.stations {
            body.push_str(&format!(
                "<tr><td>{}</td><td class=\"{}\">{} dBm</td><td>{:.1}/{:.1} Mbps</td><td>{}</td><td>{}</td></tr>\n",
                escape(&station.mac_address),
                signal_class(station.rssi),
                station.signal,
                station.tx_rate,
                station.rx_rate,
                format_uptime(station.uptime),
                signal_quality(station.rssi),
            ));
        }
        body.push_str("</table></section>\n");
    }

    if !snapshot.networks.is_empty() {
        body.push_str("<section><h2>Interfaces</h2><table>\n");
        body.push_str("<tr><th>Name</th><th>Address</th><th>Status</th><th>RX</th><th>TX</th><th>Errors</th></tr>\n");
        for iface in &snapshot.networks {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}/{}</td></tr>\n",
                escape(&iface.name),
                escape(&iface.ip_address),
                escape(&iface.status),
                format_bytes(iface.rx_bytes),
                format_bytes(iface.tx_bytes),
                iface.rx_errors,
                iface.tx_errors,
            ));
        }
        body.push_str("</table></section>\n");
    }

    body
}

fn page(body: String) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Linkmon</title>
<style>
body {{ font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; color: #222; }}
h2 small {{ color: #888; font-weight: normal; }}
table {{ border-collapse: collapse; margin-bottom: 1.5rem; }}
th, td {{ text-align: left; padding: 0.25rem 0.75rem; border-bottom: 1px solid #ddd; }}
.notice {{ padding: 1rem; background: #f4f4f4; border-radius: 4px; }}
.excellent, .very-good {{ color: #1a7f37; }}
.good {{ color: #9a6700; }}
.fair, .poor {{ color: #cf222e; }}
</style>
</head>
<body>
<h1>Linkmon</h1>
{body}
</body>
</html>
"#
    )
}

/// Minimal HTML escaping for device-supplied strings.
fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 1536 bytes -> "1.5 KB". Values are rounded to two decimals and trailing
/// zeros dropped.
pub(crate) fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = (bytes as f64 / 1024f64.powi(exp as i32) * 100.0).round() / 100.0;
    format!("{} {}", value, UNITS[exp])
}

/// Seconds -> "Xd Yh Zm".
pub(crate) fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}d {}h {}m", days, hours, minutes)
}

/// RSSI quality bucket shown to the operator.
pub(crate) fn signal_quality(rssi: i32) -> &'static str {
    match rssi {
        r if r >= -50 => "Excellent",
        r if r >= -60 => "Very good",
        r if r >= -70 => "Good",
        r if r >= -80 => "Fair",
        _ => "Poor",
    }
}

/// CSS class for the same buckets.
pub(crate) fn signal_class(rssi: i32) -> &'static str {
    match rssi {
        r if r >= -50 => "excellent",
        r if r >= -60 => "very-good",
        r if r >= -70 => "good",
        r if r >= -80 => "fair",
        _ => "poor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkmon_core::types::StatusRecord;
    use serde_json::json;

    #[test]
    fn bytes_use_binary_units() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn uptime_breaks_into_days_hours_minutes() {
        assert_eq!(format_uptime(0), "0d 0h 0m");
        assert_eq!(format_uptime(59), "0d 0h 0m");
        assert_eq!(format_uptime(3660), "0d 1h 1m");
        assert_eq!(format_uptime(2 * 86400 + 120), "2d 0h 2m");
    }

    #[test]
    fn signal_buckets_match_thresholds() {
        assert_eq!(signal_quality(-45), "Excellent");
        assert_eq!(signal_quality(-50), "Excellent");
        assert_eq!(signal_quality(-51), "Very good");
        assert_eq!(signal_quality(-60), "Very good");
        assert_eq!(signal_quality(-70), "Good");
        assert_eq!(signal_quality(-80), "Fair");
        assert_eq!(signal_quality(-81), "Poor");

        assert_eq!(signal_class(-45), "excellent");
        assert_eq!(signal_class(-81), "poor");
    }

    #[test]
    fn unreadable_payload_falls_back_to_raw_view() {
        let record = StatusRecord {
            timestamp: "2026-08-06T10:00:00Z".to_string(),
            device_id: "AA:BB".to_string(),
            payload: json!({ "unexpected": true }),
        };
        let html = render(Some(&record));
        assert!(html.contains("AA:BB"));
        assert!(html.contains("unexpected"));
    }

    #[test]
    fn device_strings_are_escaped() {
        let record = StatusRecord {
            timestamp: "2026-08-06T10:00:00Z".to_string(),
            device_id: "<script>".to_string(),
            payload: json!({ "x": 1 }),
        };
        let html = render(Some(&record));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
