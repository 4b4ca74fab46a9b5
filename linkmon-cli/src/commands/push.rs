use crate::client::ApiClient;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

pub async fn run(client: &ApiClient, file: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let doc: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    client.push(&doc).await?;

    println!("Pushed snapshot from {}", file.display());
    Ok(())
}
