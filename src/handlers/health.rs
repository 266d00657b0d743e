//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Upstream API base URL
    pub upstream: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Number of results shown since startup
    pub display_updates: u64,
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(build_response("healthy", &state, true))
}

/// Liveness check
///
/// GET /health/live
/// Only confirms the process is running, no upstream information
pub async fn liveness_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing liveness check");

    Json(build_response("alive", &state, false))
}

fn build_response(status: &str, state: &AppState, with_upstream: bool) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            upstream: if with_upstream {
                state.settings.green_api.base_url.clone()
            } else {
                "not_checked".to_string()
            },
            uptime_seconds: state.started_at.elapsed().as_secs(),
            display_updates: state.display.update_count(),
        }),
    }
}
