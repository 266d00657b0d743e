//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::models::ErrorRecord;
use thiserror::Error;

/// Label shown for transport-level failures
pub const TRANSPORT_ERROR_LABEL: &str = "Failed to call the API";

/// Shown when a transport error carries no description of its own
pub const TRANSPORT_FALLBACK_DETAILS: &str =
    "Check your internet connection and the request URL.";

/// Label shown when credentials are missing
pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Please enter idInstance and apiTokenInstance to make a request.";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Required input missing, detected before any I/O
    #[error("{0}")]
    Validation(String),

    /// Upstream answered with a non-2xx status
    #[error("API Error: {status}")]
    RemoteApi {
        status: u16,
        status_text: String,
        details: serde_json::Value,
    },

    /// Network, URL or decode failure
    #[error("Failed to call the API: {0}")]
    Transport(String),
}

impl AppError {
    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        !matches!(self, AppError::Validation(_))
    }

    /// Convert into the record shown on the display surface
    pub fn to_error_record(&self) -> ErrorRecord {
        match self {
            AppError::Validation(message) => ErrorRecord::message(message.clone()),
            AppError::RemoteApi {
                status,
                status_text,
                details,
            } => ErrorRecord {
                status: Some(*status),
                status_text: Some(status_text.clone()),
                error: self.to_string(),
                details: Some(details.clone()),
            },
            AppError::Transport(description) => {
                let description = if description.trim().is_empty() {
                    TRANSPORT_FALLBACK_DETAILS.to_string()
                } else {
                    description.clone()
                };
                ErrorRecord {
                    status: None,
                    status_text: None,
                    error: TRANSPORT_ERROR_LABEL.to_string(),
                    details: Some(serde_json::Value::String(description)),
                }
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    /// Create validation error
    pub fn validation_error(message: impl Into<String>) -> AppError {
        AppError::Validation(message.into())
    }

    /// Create transport error
    pub fn transport_error(description: impl Into<String>) -> AppError {
        AppError::Transport(description.into())
    }
}
