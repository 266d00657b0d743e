//! Request dispatcher
//!
//! Builds the Green-API endpoint, picks the verb, sends one request and turns
//! whatever comes back into a displayable [`ApiResult`].

use crate::config::GreenApiConfig;
use crate::models::{ApiMethod, ApiRequest, ApiResult, Credentials, HttpVerb};
use crate::services::display::ResponseDisplay;
use crate::utils::error::helpers::{transport_error, validation_error};
use crate::utils::error::{AppError, AppResult, MISSING_CREDENTIALS_MESSAGE};
use crate::utils::logging::{create_request_log_summary, redact_endpoint};
use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Shown as details when an error body is not JSON and the status has no reason phrase
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Green-API request dispatcher
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    base_url: String,
    display: Arc<dyn ResponseDisplay>,
}

impl Dispatcher {
    /// Create a dispatcher writing its results to `display`
    pub fn new(config: &GreenApiConfig, display: Arc<dyn ResponseDisplay>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            display,
        })
    }

    /// The display this dispatcher writes to
    pub fn display(&self) -> &Arc<dyn ResponseDisplay> {
        &self.display
    }

    /// `{base}/waInstance{id}/{method}/{token}`
    pub fn endpoint_url(&self, credentials: &Credentials, method: ApiMethod) -> String {
        format!(
            "{}/waInstance{}/{}/{}",
            self.base_url, credentials.instance_id, method, credentials.api_token
        )
    }

    /// Perform the call and show the outcome on the display.
    ///
    /// The same value is returned so HTTP callers can echo it back.
    pub async fn dispatch(&self, credentials: &Credentials, request: ApiRequest) -> ApiResult {
        let result = self.call(credentials, &request).await;
        self.display.show(&result);
        result
    }

    /// Perform the call without touching the display
    pub async fn call(&self, credentials: &Credentials, request: &ApiRequest) -> ApiResult {
        match self.send(credentials, request).await {
            Ok(body) => {
                debug!("{} completed successfully", request.method());
                ApiResult::Success(body)
            }
            Err(e) => {
                self.log_failure(credentials, request.method(), &e);
                ApiResult::Error(e.to_error_record())
            }
        }
    }

    async fn send(&self, credentials: &Credentials, request: &ApiRequest) -> AppResult<serde_json::Value> {
        if !credentials.is_complete() {
            return Err(validation_error(MISSING_CREDENTIALS_MESSAGE));
        }

        let method = request.method();
        let url = self.endpoint_url(credentials, method);

        if let Ok(summary) = serde_json::to_string(&create_request_log_summary(request)) {
            debug!("📤 {} {} - {}", method, redact_endpoint(&url, credentials), summary);
        }

        let builder = match method.verb() {
            HttpVerb::Get => self.client.get(&url),
            HttpVerb::Post => {
                let body = request.body().unwrap_or_else(|| serde_json::json!({}));
                self.client
                    .post(&url)
                    .header(CONTENT_TYPE, "application/json")
                    .json(&body)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(describe_transport_error(e)))?;

        let status = response.status();

        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            let details = match response.bytes().await {
                Ok(bytes) => serde_json::from_slice::<serde_json::Value>(&bytes).ok(),
                Err(_) => None,
            }
            .unwrap_or_else(|| {
                let message = if status_text.is_empty() {
                    UNKNOWN_ERROR_MESSAGE
                } else {
                    status_text.as_str()
                };
                serde_json::json!({ "message": message })
            });

            return Err(AppError::RemoteApi {
                status: status.as_u16(),
                status_text,
                details,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(describe_transport_error(e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| transport_error(format!("Failed to parse response body: {}", e)))
    }

    fn log_failure(&self, credentials: &Credentials, method: ApiMethod, error: &AppError) {
        if !error.should_log_details() {
            warn!("{} rejected before sending: {}", method, error);
            return;
        }

        match error {
            AppError::RemoteApi { status, details, .. } => {
                error!("API call error - response not OK: {} {} - {}", method, status, details);
            }
            _ => {
                let url = self.endpoint_url(credentials, method);
                error!(
                    "API call error: {} {} - {}",
                    method,
                    redact_endpoint(&url, credentials),
                    error
                );
            }
        }
    }
}

/// Error description with its source chain, never including the request URL
fn describe_transport_error(error: reqwest::Error) -> String {
    let error = error.without_url();
    let mut description = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    description
}
