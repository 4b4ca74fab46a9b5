//! Health reporting for the daemon's `/health` endpoint.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Overall system health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: HealthStatus,
    pub version: &'static str,
    pub subsystems: Vec<SubsystemHealth>,
}

/// Subsystem health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsystemHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
}

/// Health checker that tracks subsystem status.
#[derive(Clone, Default)]
pub struct HealthChecker {
    subsystems: Arc<RwLock<Vec<SubsystemHealth>>>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subsystem for health tracking. New subsystems start healthy.
    pub async fn register_subsystem(&self, name: String) {
        let mut subsystems = self.subsystems.write().await;
        subsystems.push(SubsystemHealth { name, status: HealthStatus::Healthy, message: None });
    }

    /// Update subsystem health status.
    pub async fn update_subsystem(
        &self,
        name: &str,
        status: HealthStatus,
        message: Option<String>,
    ) {
        let mut subsystems = self.subsystems.write().await;
        if let Some(subsystem) = subsystems.iter_mut().find(|s| s.name == name) {
            subsystem.status = status;
            subsystem.message = message;
        }
    }

    /// Get overall health: unhealthy if any subsystem is unhealthy, degraded
    /// if any is degraded, healthy otherwise.
    pub async fn get_health(&self) -> HealthCheck {
        let subsystems = self.subsystems.read().await.clone();

        let status = if subsystems.iter().any(|s| s.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else if subsystems.iter().any(|s| s.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        HealthCheck { status, version: env!("CARGO_PKG_VERSION"), subsystems }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rollup_takes_the_worst_status() {
        let checker = HealthChecker::new();
        checker.register_subsystem("daemon".to_string()).await;
        checker.register_subsystem("database".to_string()).await;

        let health = checker.get_health().await;
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.subsystems.len(), 2);

        checker
            .update_subsystem("database", HealthStatus::Degraded, Some("slow writes".to_string()))
            .await;
        assert_eq!(checker.get_health().await.status, HealthStatus::Degraded);

        checker
            .update_subsystem("database", HealthStatus::Unhealthy, Some("pool closed".to_string()))
            .await;
        assert_eq!(checker.get_health().await.status, HealthStatus::Unhealthy);
    }
}
