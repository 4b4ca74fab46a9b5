use crate::client::ApiClient;
use crate::commands::format_timestamp;
use anyhow::Result;
use linkmon_core::types::StatusSnapshot;
use serde_json::Value;

pub async fn run(client: &ApiClient, limit: Option<i64>, device: Option<&str>) -> Result<()> {
    let history = client.history(limit, device).await?;

    if history.is_empty() {
        println!("No snapshots recorded.");
        return Ok(());
    }

    println!(
        "{:<21} {:<19} {:<16} {:>8} {:>9}",
        "TIMESTAMP", "DEVICE", "HOSTNAME", "SIGNAL", "STATIONS"
    );
    for doc in &history {
        println!("{}", row(doc));
    }
    Ok(())
}

fn row(doc: &Value) -> String {
    match serde_json::from_value::<StatusSnapshot>(doc.clone()) {
        Ok(snapshot) => {
            let signal = snapshot
                .wireless
                .first()
                .map(|radio| format!("{} dBm", radio.signal))
                .unwrap_or_else(|| "-".to_string());
            format!(
                "{:<21} {:<19} {:<16} {:>8} {:>9}",
                format_timestamp(&snapshot.timestamp),
                snapshot.device_id,
                snapshot.system.hostname,
                signal,
                snapshot.stations.len(),
            )
        }
        Err(_) => {
            // Unmodeled payload: show what the envelope still guarantees
            let timestamp = doc["timestamp"].as_str().unwrap_or("?");
            let device = doc["deviceId"].as_str().unwrap_or("?");
            format!("{:<21} {:<19} {:<16} {:>8} {:>9}", format_timestamp(timestamp), device, "-", "-", "-")
        }
    }
}
