//! Health and system endpoints.

use axum::response::IntoResponse;
use axum::Json;

/// `GET /health` — liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
