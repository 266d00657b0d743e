//! Form input models
//!
//! Raw field values posted by the console page. Missing fields arrive as empty strings;
//! ids and phone numbers may be posted as bare numbers.

use crate::models::green_api::{string_or_number, Credentials};
use serde::{Deserialize, Serialize};

/// Form for actions that only need credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceForm {
    #[serde(flatten)]
    pub credentials: Credentials,
}

/// Form for `sendMessage`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageForm {
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(default, deserialize_with = "string_or_number")]
    pub chat_id: String,
    #[serde(default)]
    pub message: String,
}

/// Form for `sendFileByUrl`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFileForm {
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(default, deserialize_with = "string_or_number")]
    pub chat_id: String,
    #[serde(default)]
    pub file_url: String,
}
