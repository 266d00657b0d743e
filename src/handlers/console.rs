//! Console action handlers
//!
//! One route per action. Every route answers 200 with whatever was put on the
//! display, errors included.

use crate::handlers::AppState;
use crate::models::{ApiMethod, ApiResult, InstanceForm, SendFileForm, SendMessageForm};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Posted form, or whatever axum refused to decode
type FormPayload<T> = Result<Json<T>, JsonRejection>;

/// Unwrap the form; an undecodable one is shown and answered as a validation error
fn read_form<T>(state: &AppState, payload: FormPayload<T>) -> Result<T, ApiResult> {
    match payload {
        Ok(Json(form)) => Ok(form),
        Err(rejection) => {
            warn!("Form rejected ({}): {}", rejection.status(), rejection.body_text());
            Err(state.actions.reject_form(&rejection.body_text()))
        }
    }
}

/// Service information returned from `/`
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub upstream: String,
    pub actions: Vec<String>,
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        upstream: state.settings.green_api.base_url.clone(),
        actions: ApiMethod::ALL
            .iter()
            .map(|method| format!("POST /api/{}", method))
            .collect(),
    })
}

/// POST /api/getSettings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    payload: FormPayload<InstanceForm>,
) -> Json<ApiResult> {
    match read_form(&state, payload) {
        Ok(form) => Json(state.actions.get_settings(&form.credentials).await),
        Err(rejected) => Json(rejected),
    }
}

/// POST /api/getStateInstance
pub async fn get_state_instance(
    State(state): State<Arc<AppState>>,
    payload: FormPayload<InstanceForm>,
) -> Json<ApiResult> {
    match read_form(&state, payload) {
        Ok(form) => Json(state.actions.get_state_instance(&form.credentials).await),
        Err(rejected) => Json(rejected),
    }
}

/// POST /api/sendMessage
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: FormPayload<SendMessageForm>,
) -> Json<ApiResult> {
    let form = match read_form(&state, payload) {
        Ok(form) => form,
        Err(rejected) => return Json(rejected),
    };

    Json(
        state
            .actions
            .send_message(&form.credentials, &form.chat_id, &form.message)
            .await,
    )
}

/// POST /api/sendFileByUrl
pub async fn send_file_by_url(
    State(state): State<Arc<AppState>>,
    payload: FormPayload<SendFileForm>,
) -> Json<ApiResult> {
    let form = match read_form(&state, payload) {
        Ok(form) => form,
        Err(rejected) => return Json(rejected),
    };

    Json(
        state
            .actions
            .send_file_by_url(&form.credentials, &form.chat_id, &form.file_url)
            .await,
    )
}

/// GET /api/response
///
/// Current display text, 204 before the first action
pub async fn current_response(State(state): State<Arc<AppState>>) -> Response {
    debug!("Reading display surface");
    match state.display.current() {
        Some(text) => ([(header::CONTENT_TYPE, "application/json")], text).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
