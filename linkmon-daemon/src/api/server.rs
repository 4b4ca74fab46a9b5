//! HTTP server implementation.
//!
//! The surface does shape validation only: a pushed document must carry
//! `timestamp`, `deviceId`, and a `system` section; everything else is the
//! store's (or the device's) business. Responses use the
//! `{success, data/error}` envelope the push clients expect.

use crate::dashboard;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use linkmon_core::types::StatusRecord;
use linkmon_core::{HealthChecker, LinkmonError, StatusStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Snapshots with full scan results can get big; match the original 10 MB cap.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<StatusStore>,
    health: HealthChecker,
}

/// Build the router. Split out from [`serve`] so tests can drive it directly.
pub fn router(store: Arc<StatusStore>, health: HealthChecker) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/info", post(ingest))
        .route("/api/status", get(latest_status))
        .route("/api/history", get(history))
        .route("/api/devices/:device_id/history", get(device_history))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(AppState { store, health })
}

/// Bind and serve until the task is aborted.
pub async fn serve(listen_addr: String, store: Arc<StatusStore>, health: HealthChecker) {
    let app = router(store, health);

    let listener = match tokio::net::TcpListener::bind(&listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", listen_addr, e);
            return;
        }
    };

    info!("API listening on http://{}", listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("API server error: {}", e);
    }
}

async fn ingest(State(state): State<AppState>, Json(doc): Json<Value>) -> Response {
    // The store owns timestamp/deviceId validation; the surface owns the
    // system-section check.
    if doc.get("system").is_none() {
        return reject(StatusCode::BAD_REQUEST, "Incomplete status data");
    }

    let record = match StatusRecord::from_document(doc) {
        Ok(record) => record,
        Err(e) => return reject(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match state.store.save(&record).await {
        Ok(()) => {
            info!("Status received from device {} at {}", record.device_id, record.timestamp);
            (StatusCode::OK, Json(json!({ "success": true, "message": "Status stored" })))
                .into_response()
        }
        Err(e @ LinkmonError::Validation { .. }) => {
            reject(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            error!("Failed to store status from {}: {}", record.device_id, e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store status")
        }
    }
}

async fn latest_status(State(state): State<AppState>) -> Response {
    match state.store.latest().await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": record.payload })))
                .into_response()
        }
        Ok(None) => reject(StatusCode::NOT_FOUND, "No status data available"),
        Err(e) => {
            error!("Failed to load latest status: {}", e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load status")
        }
    }
}

async fn history(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match state.store.recent(parse_limit(&params)).await {
        Ok(records) => history_response(records),
        Err(e) => {
            error!("Failed to load history: {}", e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load history")
        }
    }
}

async fn device_history(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match state.store.recent_for_device(&device_id, parse_limit(&params)).await {
        Ok(records) => history_response(records),
        Err(e) => {
            error!("Failed to load history for {}: {}", device_id, e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load history")
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Response {
    Json(state.health.get_health().await).into_response()
}

async fn dashboard_page(State(state): State<AppState>) -> Response {
    match state.store.latest().await {
        Ok(latest) => Html(dashboard::render(latest.as_ref())).into_response(),
        Err(e) => {
            error!("Failed to load dashboard data: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(dashboard::render_error())).into_response()
        }
    }
}

/// Limits arrive as free-form query text. Anything unusable becomes 0 and the
/// store applies its own default.
fn parse_limit(params: &HashMap<String, String>) -> i64 {
    params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn history_response(records: Vec<StatusRecord>) -> Response {
    let data: Vec<Value> = records.into_iter().map(|r| r.payload).collect();
    (StatusCode::OK, Json(json!({ "success": true, "count": data.len(), "data": data })))
        .into_response()
}

fn reject(code: StatusCode, message: &str) -> Response {
    (code, Json(json!({ "success": false, "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let store = Arc::new(StatusStore::open_in_memory().await.unwrap());
        let health = HealthChecker::new();
        health.register_subsystem("daemon".to_string()).await;
        router(store, health)
    }

    fn snapshot_doc(device_id: &str, timestamp: &str) -> Value {
        json!({
            "timestamp": timestamp,
            "deviceId": device_id,
            "system": {
                "hostname": "bridge-01",
                "model": "NanoStation M5",
                "firmwareVersion": "XM.6.3.6",
                "uptime": 86400,
                "loadAverage": "0.10 0.15 0.20",
                "cpuUsage": 12.5,
                "memoryTotal": 62464,
                "memoryFree": 18432,
                "memoryUsage": 70.5
            },
            "wireless": [],
            "stations": [],
            "networks": []
        })
    }

    async fn post_json(app: &Router, uri: &str, body: &Value) -> StatusCode {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn ingest_then_latest_round_trips() {
        let app = test_router().await;
        let doc = snapshot_doc("AA:BB:CC:DD:EE:FF", "2026-08-06T10:00:00Z");

        assert_eq!(post_json(&app, "/api/info", &doc).await, StatusCode::OK);

        let (status, body) = get_json(&app, "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], doc);
    }

    #[tokio::test]
    async fn ingest_rejects_incomplete_documents() {
        let app = test_router().await;

        let mut missing_system = snapshot_doc("AA:BB", "2026-08-06T10:00:00Z");
        missing_system.as_object_mut().unwrap().remove("system");
        assert_eq!(post_json(&app, "/api/info", &missing_system).await, StatusCode::BAD_REQUEST);

        let mut missing_timestamp = snapshot_doc("AA:BB", "2026-08-06T10:00:00Z");
        missing_timestamp.as_object_mut().unwrap().remove("timestamp");
        assert_eq!(post_json(&app, "/api/info", &missing_timestamp).await, StatusCode::BAD_REQUEST);

        let mut missing_device = snapshot_doc("AA:BB", "2026-08-06T10:00:00Z");
        missing_device.as_object_mut().unwrap().remove("deviceId");
        assert_eq!(post_json(&app, "/api/info", &missing_device).await, StatusCode::BAD_REQUEST);

        // Nothing was persisted
        let (status, _) = get_json(&app, "/api/status").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn latest_on_empty_store_is_not_found() {
        let app = test_router().await;
        let (status, body) = get_json(&app, "/api/status").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn history_respects_limit_and_order() {
        let app = test_router().await;
        for stamp in ["2026-08-06T09:00:00Z", "2026-08-06T10:00:00Z", "2026-08-06T11:00:00Z"] {
            let doc = snapshot_doc("AA:BB", stamp);
            assert_eq!(post_json(&app, "/api/info", &doc).await, StatusCode::OK);
        }

        let (status, body) = get_json(&app, "/api/history?limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["timestamp"], "2026-08-06T11:00:00Z");
        assert_eq!(body["data"][1]["timestamp"], "2026-08-06T10:00:00Z");

        // Unusable limit falls back to the store default, returning everything here
        let (_, body) = get_json(&app, "/api/history?limit=bogus").await;
        assert_eq!(body["count"], 3);
    }

    #[tokio::test]
    async fn device_history_is_scoped() {
        let app = test_router().await;
        post_json(&app, "/api/info", &snapshot_doc("AA:BB", "2026-08-06T10:00:00Z")).await;
        post_json(&app, "/api/info", &snapshot_doc("CC:DD", "2026-08-06T11:00:00Z")).await;

        let (status, body) = get_json(&app, "/api/devices/AA:BB/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["deviceId"], "AA:BB");

        let (_, body) = get_json(&app, "/api/devices/unknown/history").await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn health_endpoint_reports_subsystems() {
        let app = test_router().await;
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn dashboard_renders_waiting_page_when_empty() {
        let app = test_router().await;
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Waiting for data"));
    }
}
