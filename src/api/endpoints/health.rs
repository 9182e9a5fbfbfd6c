//! Root and health endpoints.

use axum::Json;
use serde::Serialize;

use crate::config;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// `GET /` — welcome message.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the ML and LLM prediction service",
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health` — liveness check.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
    })
}
