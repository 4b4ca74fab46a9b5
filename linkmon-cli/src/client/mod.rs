//! HTTP client for the collector API.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

/// Thin wrapper over reqwest speaking the collector's envelope format.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// GET /api/status
    pub async fn latest_status(&self) -> Result<Value> {
        let body = self.get(format!("{}/api/status", self.base_url)).await?;
        Ok(body["data"].clone())
    }

    /// GET /api/history or /api/devices/{id}/history
    pub async fn history(&self, limit: Option<i64>, device: Option<&str>) -> Result<Vec<Value>> {
        let mut url = match device {
            Some(device) => format!("{}/api/devices/{}/history", self.base_url, device),
            None => format!("{}/api/history", self.base_url),
        };
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={}", limit));
        }

        let body = self.get(url).await?;
        Ok(body["data"].as_array().cloned().unwrap_or_default())
    }

    /// POST /api/info
    pub async fn push(&self, doc: &Value) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/api/info", self.base_url))
            .json(doc)
            .send()
            .await
            .context("Failed to reach collector")?;

        let status = response.status();
        let body: Value =
            response.json().await.context("Invalid response from collector")?;

        if !status.is_success() || body["success"].as_bool() != Some(true) {
            return Err(anyhow!(
                "Collector rejected snapshot: {}",
                body["error"].as_str().unwrap_or("unknown error")
            ));
        }
        Ok(())
    }

    async fn get(&self, url: String) -> Result<Value> {
        let response = self.http.get(url).send().await.context("Failed to reach collector")?;
        let body: Value =
            response.json().await.context("Invalid response from collector")?;

        if body["success"].as_bool() != Some(true) {
            return Err(anyhow!(
                "{}",
                body["error"].as_str().unwrap_or("Collector reported failure")
            ));
        }
        Ok(body)
    }
}
