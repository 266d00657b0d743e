//! Console actions
//!
//! The four user-triggered actions. Each one checks its own fields, builds the
//! request body and hands it to the dispatcher.

use crate::models::{ApiRequest, ApiResult, Credentials};
use crate::services::dispatcher::Dispatcher;
use crate::utils::error::helpers::validation_error;
use tracing::{info, warn};

pub const SEND_MESSAGE_FIELDS_MESSAGE: &str =
    "A recipient number and message text are required to send a message.";

pub const INVALID_FORM_MESSAGE: &str = "The form could not be read";

pub const SEND_FILE_FIELDS_MESSAGE: &str =
    "A recipient number and file URL are required to send a file.";

/// Action handlers bound to one dispatcher
#[derive(Debug, Clone)]
pub struct ConsoleActions {
    dispatcher: Dispatcher,
    chat_id_suffix: String,
}

impl ConsoleActions {
    pub fn new(dispatcher: Dispatcher, chat_id_suffix: impl Into<String>) -> Self {
        Self {
            dispatcher,
            chat_id_suffix: chat_id_suffix.into(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Instance settings
    pub async fn get_settings(&self, credentials: &Credentials) -> ApiResult {
        info!("Action: getSettings");
        self.dispatcher.dispatch(credentials, ApiRequest::GetSettings).await
    }

    /// Instance authorization state
    pub async fn get_state_instance(&self, credentials: &Credentials) -> ApiResult {
        info!("Action: getStateInstance");
        self.dispatcher
            .dispatch(credentials, ApiRequest::GetStateInstance)
            .await
    }

    /// Send a text message to a raw phone number
    pub async fn send_message(&self, credentials: &Credentials, chat_id: &str, message: &str) -> ApiResult {
        info!("Action: sendMessage");
        if is_blank(chat_id) || is_blank(message) {
            return self.reject(SEND_MESSAGE_FIELDS_MESSAGE);
        }

        let request = ApiRequest::send_message(chat_id, message, &self.chat_id_suffix);
        self.dispatcher.dispatch(credentials, request).await
    }

    /// Send a file by its public URL; the file name is the last path segment
    pub async fn send_file_by_url(&self, credentials: &Credentials, chat_id: &str, file_url: &str) -> ApiResult {
        info!("Action: sendFileByUrl");
        if is_blank(chat_id) || is_blank(file_url) {
            return self.reject(SEND_FILE_FIELDS_MESSAGE);
        }

        let request = ApiRequest::send_file_by_url(chat_id, file_url.trim(), &self.chat_id_suffix);
        self.dispatcher.dispatch(credentials, request).await
    }

    /// Show a form that could not be decoded as a validation error
    pub fn reject_form(&self, reason: &str) -> ApiResult {
        self.reject(&format!("{}: {}", INVALID_FORM_MESSAGE, reason))
    }

    fn reject(&self, message: &str) -> ApiResult {
        warn!("Action rejected: {}", message);
        let result = ApiResult::Error(validation_error(message).to_error_record());
        self.dispatcher.display().show(&result);
        result
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GreenApiConfig;
    use crate::services::display::DisplaySurface;
    use std::sync::Arc;

    fn create_actions() -> (ConsoleActions, Arc<DisplaySurface>) {
        let display = Arc::new(DisplaySurface::new());
        let config = GreenApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let dispatcher = Dispatcher::new(&config, display.clone()).unwrap();
        (ConsoleActions::new(dispatcher, config.chat_id_suffix), display)
    }

    #[tokio::test]
    async fn test_send_message_requires_fields() {
        let (actions, display) = create_actions();
        let creds = Credentials::new("1101", "token");

        let result = actions.send_message(&creds, "79991234567", "").await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({ "error": SEND_MESSAGE_FIELDS_MESSAGE })
        );
        assert_eq!(display.update_count(), 1);
    }

    #[tokio::test]
    async fn test_send_file_requires_fields() {
        let (actions, display) = create_actions();
        let creds = Credentials::new("1101", "token");

        let result = actions.send_file_by_url(&creds, "  ", "https://host/a.png").await;

        assert!(result.is_error());
        assert!(display.current().unwrap().contains(SEND_FILE_FIELDS_MESSAGE));
    }
}
