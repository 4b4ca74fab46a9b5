use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod client;
mod commands;

#[derive(Parser)]
#[command(name = "linkmon")]
#[command(about = "Linkmon telemetry collector CLI", long_about = None)]
struct Cli {
    /// Collector base URL
    #[arg(long, global = true, default_value = "http://127.0.0.1:5000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest status snapshot
    Status,

    /// List recent snapshots
    History {
        /// Maximum number of snapshots
        #[arg(short, long)]
        limit: Option<i64>,

        /// Restrict to one device id (MAC or serial)
        #[arg(short, long)]
        device: Option<String>,
    },

    /// Push a snapshot document from a JSON file to the collector
    Push {
        /// Path to the snapshot file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = client::ApiClient::new(cli.server);

    match cli.command {
        Commands::Status => commands::status::run(&client).await,
        Commands::History { limit, device } => {
            commands::history::run(&client, limit, device.as_deref()).await
        }
        Commands::Push { file } => commands::push::run(&client, &file).await,
    }
}
