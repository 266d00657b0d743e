//! Logging utilities
//!
//! Logging setup and helpers that keep request logs short and free of secrets

use crate::config::settings::LoggingConfig;
use crate::models::green_api::{mask_secret, ApiRequest, Credentials};
use anyhow::{Context, Result};

/// Longest message text written to debug logs
const MAX_LOGGED_TEXT: usize = 200;

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    tracing::info!("Logging system initialized");
    Ok(())
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    let total = s.chars().count();
    if total > max_len {
        let head: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", head, total - max_len)
    } else {
        s.to_string()
    }
}

/// Endpoint URL with the token masked
pub fn redact_endpoint(url: &str, credentials: &Credentials) -> String {
    if credentials.api_token.is_empty() {
        return url.to_string();
    }
    url.replace(&credentials.api_token, &mask_secret(&credentials.api_token))
}

/// Create a filtered summary of a request for logging
pub fn create_request_log_summary(request: &ApiRequest) -> serde_json::Value {
    match request {
        ApiRequest::GetSettings | ApiRequest::GetStateInstance => serde_json::json!({
            "method": request.method().as_str(),
        }),
        ApiRequest::SendMessage(body) => serde_json::json!({
            "method": request.method().as_str(),
            "chatId": body.chat_id,
            "message": truncate_content(&body.message, MAX_LOGGED_TEXT),
        }),
        ApiRequest::SendFileByUrl(body) => serde_json::json!({
            "method": request.method().as_str(),
            "chatId": body.chat_id,
            "urlFile": truncate_content(&body.url_file, MAX_LOGGED_TEXT),
            "fileName": body.file_name,
        }),
    }
}
