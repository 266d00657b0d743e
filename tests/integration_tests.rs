//! Integration tests
//!
//! Drive the router end to end with a mocked Green-API upstream

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use greenapi_console::config::{GreenApiConfig, LoggingConfig, SecurityConfig, ServerConfig, Settings};
use greenapi_console::create_router;
use greenapi_console::middleware::logging::REQUEST_ID_HEADER;
use greenapi_console::services::actions::{INVALID_FORM_MESSAGE, SEND_FILE_FIELDS_MESSAGE};
use greenapi_console::utils::error::MISSING_CREDENTIALS_MESSAGE;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Create test settings pointing at `base_url`
fn create_test_settings(base_url: &str) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8083,
        },
        green_api: GreenApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        },
        security: SecurityConfig {
            allowed_origins: vec!["*".to_string()],
            cors_enabled: true,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "text".to_string(),
        },
    }
}

async fn create_app(base_url: &str) -> Router {
    create_router(create_test_settings(base_url))
        .await
        .expect("Failed to create router")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_app("https://api.green-api.com").await;

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let health = read_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "greenapi-console");
    assert!(health["timestamp"].is_string());
    assert_eq!(health["details"]["upstream"], "https://api.green-api.com");
}

#[tokio::test]
async fn test_liveness_check_endpoint() {
    let app = create_app("https://api.green-api.com").await;

    let request = Request::builder().uri("/health/live").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health = read_json(response).await;
    assert_eq!(health["status"], "alive");
    assert!(health["details"]["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_root_endpoint_lists_actions() {
    let app = create_app("https://api.green-api.com").await;

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let info = read_json(response).await;
    let actions = info["actions"].as_array().unwrap();
    assert_eq!(actions.len(), 4);
    assert!(actions.contains(&json!("POST /api/sendFileByUrl")));
}

#[tokio::test]
async fn test_display_is_empty_before_first_action() {
    let app = create_app("https://api.green-api.com").await;

    let request = Request::builder().uri("/api/response").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_get_settings_round_trip_through_display() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/waInstance1101/getSettings/secret-token");
            then.status(200).json_body(json!({"wid": "123@c.us"}));
        })
        .await;

    let app = create_app(&server.base_url()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/getSettings",
            json!({"idInstance": "1101", "apiTokenInstance": "secret-token"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"wid": "123@c.us"}));
    mock.assert_async().await;

    let request = Request::builder().uri("/api/response").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "{\n  \"wid\": \"123@c.us\"\n}"
    );
}

#[tokio::test]
async fn test_send_message_route() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/waInstance1101/sendMessage/secret-token")
                .json_body(json!({"chatId": "79991234567@c.us", "message": "Hi there"}));
            then.status(200).json_body(json!({"idMessage": "BAE5F4886F6F2D05"}));
        })
        .await;

    let app = create_app(&server.base_url()).await;
    let response = app
        .oneshot(post_json(
            "/api/sendMessage",
            json!({
                "idInstance": "1101",
                "apiTokenInstance": "secret-token",
                "chatId": "79991234567",
                "message": "Hi there"
            }),
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(read_json(response).await, json!({"idMessage": "BAE5F4886F6F2D05"}));
}

#[tokio::test]
async fn test_remote_error_is_answered_with_ok_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/waInstance1101/getStateInstance/bad-token");
            then.status(401).json_body(json!({"message": "invalid token"}));
        })
        .await;

    let app = create_app(&server.base_url()).await;
    let response = app
        .oneshot(post_json(
            "/api/getStateInstance",
            json!({"idInstance": "1101", "apiTokenInstance": "bad-token"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({
            "status": 401,
            "statusText": "Unauthorized",
            "error": "API Error: 401",
            "details": {"message": "invalid token"}
        })
    );
}

#[tokio::test]
async fn test_missing_form_fields_become_validation_errors() {
    let app = create_app("http://127.0.0.1:1").await;

    let response = app
        .clone()
        .oneshot(post_json("/api/getSettings", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"error": MISSING_CREDENTIALS_MESSAGE}));

    let response = app
        .oneshot(post_json(
            "/api/sendFileByUrl",
            json!({"idInstance": "1101", "apiTokenInstance": "token", "chatId": "79991234567"}),
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await, json!({"error": SEND_FILE_FIELDS_MESSAGE}));
}

#[tokio::test]
async fn test_numeric_form_fields_are_accepted() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/waInstance1101000001/sendMessage/secret-token")
                .json_body(json!({"chatId": "79991234567@c.us", "message": "Hi"}));
            then.status(200).json_body(json!({"idMessage": "BAE5F4886F6F2D06"}));
        })
        .await;

    let app = create_app(&server.base_url()).await;
    let response = app
        .oneshot(post_json(
            "/api/sendMessage",
            json!({
                "idInstance": 1101000001u64,
                "apiTokenInstance": "secret-token",
                "chatId": 79991234567u64,
                "message": "Hi"
            }),
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(read_json(response).await, json!({"idMessage": "BAE5F4886F6F2D06"}));
}

#[tokio::test]
async fn test_undecodable_forms_are_shown_as_validation_errors() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path_contains("waInstance");
            then.status(200).json_body(json!({}));
        })
        .await;

    let app = create_app(&server.base_url()).await;

    let wrong_type = post_json(
        "/api/getSettings",
        json!({"idInstance": ["1101"], "apiTokenInstance": "token"}),
    );
    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/getStateInstance")
        .body(Body::from(r#"{"idInstance":"1101","apiTokenInstance":"token"}"#))
        .unwrap();
    let empty_body = Request::builder()
        .method("POST")
        .uri("/api/sendFileByUrl")
        .header("content-type", "application/json")
        .body(Body::empty())
        .unwrap();

    for request in [wrong_type, no_content_type, empty_body] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result = read_json(response).await;
        let error = result["error"].as_str().expect("error record expected");
        assert!(error.starts_with(INVALID_FORM_MESSAGE));
        assert!(result.get("status").is_none());

        let request = Request::builder().uri("/api/response").body(Body::empty()).unwrap();
        let shown = app.clone().oneshot(request).await.unwrap();
        assert_eq!(shown.status(), StatusCode::OK);
        assert_eq!(read_json(shown).await, result);
    }

    mock.assert_hits_async(0).await;
}
