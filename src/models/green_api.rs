//! Green-API request models
//!
//! Credentials, method names and the typed request bodies sent to the provider

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Domain tag for personal chats
pub const PERSONAL_CHAT_SUFFIX: &str = "@c.us";

/// Instance credentials, supplied with every call
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Provider-assigned instance id
    #[serde(rename = "idInstance", default, deserialize_with = "string_or_number")]
    pub instance_id: String,
    /// Instance API token
    #[serde(rename = "apiTokenInstance", default)]
    pub api_token: String,
}

impl Credentials {
    pub fn new(instance_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            api_token: api_token.into(),
        }
    }

    /// Both fields present (whitespace-only counts as missing)
    pub fn is_complete(&self) -> bool {
        !self.instance_id.trim().is_empty() && !self.api_token.trim().is_empty()
    }

    /// Token with everything but the last four characters hidden, for logs
    pub fn masked_token(&self) -> String {
        mask_secret(&self.api_token)
    }
}

// The token never goes into Debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("instance_id", &self.instance_id)
            .field("api_token", &self.masked_token())
            .finish()
    }
}

/// Accept a form field posted either as a JSON string or a bare number
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Field::deserialize(deserializer)? {
        Field::Text(text) => text,
        Field::Number(number) => number.to_string(),
    })
}

/// Hide a secret, keeping the last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// HTTP verb used for a method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

/// Remote operations supported by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiMethod {
    #[serde(rename = "getSettings")]
    GetSettings,
    #[serde(rename = "getStateInstance")]
    GetStateInstance,
    #[serde(rename = "sendMessage")]
    SendMessage,
    #[serde(rename = "sendFileByUrl")]
    SendFileByUrl,
}

impl ApiMethod {
    pub const ALL: [ApiMethod; 4] = [
        ApiMethod::GetSettings,
        ApiMethod::GetStateInstance,
        ApiMethod::SendMessage,
        ApiMethod::SendFileByUrl,
    ];

    /// Method name as it appears in the endpoint path
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMethod::GetSettings => "getSettings",
            ApiMethod::GetStateInstance => "getStateInstance",
            ApiMethod::SendMessage => "sendMessage",
            ApiMethod::SendFileByUrl => "sendFileByUrl",
        }
    }

    /// Read-only methods go out as GET, everything else as POST
    pub fn verb(&self) -> HttpVerb {
        match self {
            ApiMethod::GetSettings | ApiMethod::GetStateInstance => HttpVerb::Get,
            ApiMethod::SendMessage | ApiMethod::SendFileByUrl => HttpVerb::Post,
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `sendMessage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    pub chat_id: String,
    pub message: String,
}

/// Body of `sendFileByUrl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFileByUrlBody {
    pub chat_id: String,
    pub url_file: String,
    pub file_name: String,
}

/// A request ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    GetSettings,
    GetStateInstance,
    SendMessage(SendMessageBody),
    SendFileByUrl(SendFileByUrlBody),
}

impl ApiRequest {
    pub fn method(&self) -> ApiMethod {
        match self {
            ApiRequest::GetSettings => ApiMethod::GetSettings,
            ApiRequest::GetStateInstance => ApiMethod::GetStateInstance,
            ApiRequest::SendMessage(_) => ApiMethod::SendMessage,
            ApiRequest::SendFileByUrl(_) => ApiMethod::SendFileByUrl,
        }
    }

    /// JSON body for POST methods; `None` for the read-only ones
    pub fn body(&self) -> Option<serde_json::Value> {
        match self {
            ApiRequest::GetSettings | ApiRequest::GetStateInstance => None,
            ApiRequest::SendMessage(body) => serde_json::to_value(body).ok(),
            ApiRequest::SendFileByUrl(body) => serde_json::to_value(body).ok(),
        }
    }

    /// Build a `sendMessage` request from raw form input
    pub fn send_message(chat_id: &str, message: &str, suffix: &str) -> Self {
        ApiRequest::SendMessage(SendMessageBody {
            chat_id: format_chat_id(chat_id, suffix),
            message: message.to_string(),
        })
    }

    /// Build a `sendFileByUrl` request from raw form input
    pub fn send_file_by_url(chat_id: &str, file_url: &str, suffix: &str) -> Self {
        ApiRequest::SendFileByUrl(SendFileByUrlBody {
            chat_id: format_chat_id(chat_id, suffix),
            url_file: file_url.to_string(),
            file_name: file_name_from_url(file_url).to_string(),
        })
    }
}

/// Turn a raw phone number into a chat id.
///
/// Input that already carries a domain tag (`...@g.us`, `...@c.us`) is kept as is.
pub fn format_chat_id(raw: &str, suffix: &str) -> String {
    let raw = raw.trim();
    if raw.contains('@') {
        raw.to_string()
    } else {
        format!("{}{}", raw, suffix)
    }
}

/// Everything after the last `/` of the URL
pub fn file_name_from_url(url: &str) -> &str {
    match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}
