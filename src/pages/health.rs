//! `GET /api/health`

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::ApiClient;
use crate::http::server::AppState;

/// Backend status as seen from the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendHealth {
    /// `GET /` answered 200.
    Healthy,
    /// `GET /` answered with any other status.
    Unhealthy,
    /// No response at all.
    Unreachable,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub frontend: &'static str,
    pub backend: BackendHealth,
    pub api_url: String,
}

/// Probe the backend once.
pub async fn probe_backend(api: &ApiClient) -> BackendHealth {
    match api.ping().await {
        Ok(response) if response.is(StatusCode::OK) => BackendHealth::Healthy,
        Ok(response) => {
            tracing::warn!(status = %response.status, "Backend health probe failed");
            BackendHealth::Unhealthy
        }
        Err(_) => BackendHealth::Unreachable,
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        frontend: "healthy",
        backend: probe_backend(&state.api).await,
        api_url: state.config.backend.api_base_url.clone(),
    })
}
