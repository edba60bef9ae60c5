//! HTTP request handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::error;

use warden_core::pipeline::orchestrator::OrchestrationError;
use warden_types::OrchestrationResult;

use super::ApiState;

/// Build all API routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/orchestrate", post(orchestrate))
        .route("/health", get(health_check))
}

/// Body of `POST /orchestrate`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestrateRequest {
    pub user_id: String,
    pub request_text: String,
}

/// Pipeline failure mapped to an HTTP response.
///
/// Dispatch failures are upstream problems (502); audit failures are local
/// (500). Both carry `{"error": ..., "kind": ...}`.
#[derive(Debug)]
pub struct ApiError(OrchestrationError);

impl From<OrchestrationError> for ApiError {
    fn from(err: OrchestrationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            OrchestrationError::Dispatch(_) => (StatusCode::BAD_GATEWAY, "dispatch"),
            OrchestrationError::Audit(_) => (StatusCode::INTERNAL_SERVER_ERROR, "audit"),
        };
        let body = serde_json::json!({
            "error": self.0.to_string(),
            "kind": kind,
        });
        (status, Json(body)).into_response()
    }
}

async fn orchestrate(
    State(state): State<ApiState>,
    Json(payload): Json<OrchestrateRequest>,
) -> Result<Json<OrchestrationResult>, ApiError> {
    let result = state
        .orchestrator
        .orchestrate(&payload.user_id, &payload.request_text)
        .await
        .inspect_err(|e| error!(user_id = %payload.user_id, error = %e, "orchestration failed"))?;
    Ok(Json(result))
}

/// Server start time, set once at process start.
static START_TIME: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();

/// Records the server start time; called once when the server binds.
pub fn mark_started() {
    START_TIME.get_or_init(std::time::Instant::now);
}

/// Returns basic health status, version, and uptime.
async fn health_check() -> Json<serde_json::Value> {
    let start = START_TIME.get_or_init(std::time::Instant::now);
    let uptime_secs = start.elapsed().as_secs();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime_secs
    }))
}
