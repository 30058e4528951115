use axum::response::Json;
use chrono::Utc;
use tracing::instrument;

use crate::schemas::HealthResponse;

/// Direct dependencies reported by the health check.
const DEPENDENCIES: &[&str] = &[
    "anyhow",
    "argon2",
    "axum",
    "chrono",
    "clap",
    "config",
    "serde",
    "tokio",
    "tower-http",
    "tracing",
    "utoipa",
];

/// Health check endpoint
///
/// Independent of billing state; answers as long as the server is up.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dependencies: DEPENDENCIES.iter().map(|name| name.to_string()).collect(),
    })
}
