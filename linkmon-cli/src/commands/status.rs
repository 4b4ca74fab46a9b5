use crate::client::ApiClient;
use crate::commands::format_timestamp;
use anyhow::Result;
use linkmon_core::types::StatusSnapshot;

pub async fn run(client: &ApiClient) -> Result<()> {
    let doc = client.latest_status().await?;

    match serde_json::from_value::<StatusSnapshot>(doc.clone()) {
        Ok(snapshot) => print_summary(&snapshot),
        // Devices can ship payload shapes we don't model yet
        Err(_) => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(())
}

fn print_summary(snapshot: &StatusSnapshot) {
    let sys = &snapshot.system;

    println!("Device:    {}", snapshot.device_id);
    println!("Reported:  {}", format_timestamp(&snapshot.timestamp));
    println!("Host:      {} ({}, {})", sys.hostname, sys.model, sys.firmware_version);
    println!("Uptime:    {}s  load {}", sys.uptime, sys.load_average);
    println!(
        "CPU:       {:.1}%   Memory: {:.1}% of {} KB",
        sys.cpu_usage, sys.memory_usage, sys.memory_total
    );

    for radio in &snapshot.wireless {
        println!(
            "Radio:     {} \"{}\" {} ch {} ({} MHz)  signal {} dBm  ccq {:.0}%",
            radio.interface_name,
            radio.ssid,
            radio.mode,
            radio.channel,
            radio.frequency,
            radio.signal,
            radio.ccq,
        );
    }

    if !snapshot.stations.is_empty() {
        println!("Stations:  {}", snapshot.stations.len());
        for station in &snapshot.stations {
            println!(
                "  {}  {} dBm  {:.1}/{:.1} Mbps",
                station.mac_address, station.signal, station.tx_rate, station.rx_rate
            );
        }
    }
}
