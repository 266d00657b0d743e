//! Data models module
//!
//! Defines Green-API request shapes, console form input and display results

pub mod form;
pub mod green_api;
pub mod result;

pub use form::{InstanceForm, SendFileForm, SendMessageForm};
pub use green_api::{
    file_name_from_url, format_chat_id, ApiMethod, ApiRequest, Credentials, HttpVerb,
    SendFileByUrlBody, SendMessageBody,
};
pub use result::{ApiResult, ErrorRecord};
