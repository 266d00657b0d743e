//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod console;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{ConsoleActions, Dispatcher, DisplaySurface};
use anyhow::Result;
use axum::{http::HeaderValue, middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub actions: ConsoleActions,
    pub display: Arc<DisplaySurface>,
    /// When the state was built; uptime is measured from here
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let display = Arc::new(DisplaySurface::new());
        let dispatcher = Dispatcher::new(&settings.green_api, display.clone())?;
        let actions = ConsoleActions::new(dispatcher, settings.green_api.chat_id_suffix.clone());

        Ok(Self {
            settings,
            actions,
            display,
            started_at: Instant::now(),
        })
    }
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let app_state = Arc::new(AppState::new(settings.clone())?);

    let router = Router::new()
        .route("/", get(console::index))
        .route("/api/getSettings", post(console::get_settings))
        .route("/api/getStateInstance", post(console::get_state_instance))
        .route("/api/sendMessage", post(console::send_message))
        .route("/api/sendFileByUrl", post(console::send_file_by_url))
        .route("/api/response", get(console::current_response))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if settings.security.cors_enabled {
        Ok(router.layer(create_cors_layer(&settings.security.allowed_origins)))
    } else {
        Ok(router)
    }
}

fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
