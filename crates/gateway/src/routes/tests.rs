//! Router tests for the paths that never reach the provider: auth flows,
//! token handling, empty-ownership short-circuits and ownership denials.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use database::Database;
use vapi_client::{VapiClient, VapiConfig};

use crate::auth::issue_token;
use crate::routes;
use crate::state::AppState;

async fn test_state() -> AppState {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();

    let vapi = VapiClient::new(VapiConfig::builder().api_key("test-key").build()).unwrap();

    AppState::new(db, vapi, "test-secret", 15)
}

fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}

fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, path: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(state: &AppState, email: &str, password: &str) -> String {
    let response = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/register",
            json!({
                "email": email,
                "username": email.split('@').next().unwrap(),
                "password": password,
                "confirm_password": password,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_then_login() {
    let state = test_state().await;
    register(&state, "a@x.com", "p1").await;

    let response = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "a@x.com", "password": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let state = test_state().await;
    register(&state, "a@x.com", "p1").await;

    let response = app(state)
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "a@x.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let state = test_state().await;

    let response = app(state)
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "ghost@x.com", "password": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "Invalid email or password");
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let state = test_state().await;

    let response = app(state)
        .oneshot(json_request(
            "POST",
            "/register",
            json!({
                "email": "a@x.com",
                "username": "a",
                "password": "p1",
                "confirm_password": "p2",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "Passwords do not match");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let state = test_state().await;

    let response = app(state)
        .oneshot(json_request(
            "POST",
            "/register",
            json!({"email": "a@x.com", "password": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "All fields are required");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let state = test_state().await;
    register(&state, "a@x.com", "p1").await;

    let response = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/register",
            json!({
                "email": "a@x.com",
                "username": "other",
                "password": "p2",
                "confirm_password": "p2",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "User with this email already exists");

    // Original credentials still log in
    let response = app(state)
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "a@x.com", "password": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let state = test_state().await;

    let response = app(state)
        .oneshot(Request::builder().uri("/assistants").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let state = test_state().await;

    let response = app(state)
        .oneshot(authed_request("GET", "/assistants", "not-a-jwt", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "Invalid token");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let state = test_state().await;
    register(&state, "a@x.com", "p1").await;

    let expired = issue_token("a@x.com", &state.jwt_encoding_key, -60).unwrap();
    let response = app(state)
        .oneshot(authed_request("GET", "/assistants", &expired, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "Token has expired");
}

#[tokio::test]
async fn test_token_for_missing_user_rejected() {
    let state = test_state().await;

    // Valid signature, but no such user row
    let token = issue_token("ghost@x.com", &state.jwt_encoding_key, 15).unwrap();
    let response = app(state)
        .oneshot(authed_request("GET", "/assistants", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn test_list_assistants_empty_without_provider() {
    let state = test_state().await;
    let token = register(&state, "a@x.com", "p1").await;

    // No ownership rows: short-circuits to [] without any provider call
    let response = app(state)
        .oneshot(authed_request("GET", "/assistants", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!([]));
}

#[tokio::test]
async fn test_messages_empty_without_provider() {
    let state = test_state().await;
    let token = register(&state, "a@x.com", "p1").await;

    let response = app(state)
        .oneshot(authed_request("GET", "/messages", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({}));
}

#[tokio::test]
async fn test_unowned_assistant_is_merged_404() {
    let state = test_state().await;
    let token = register(&state, "a@x.com", "p1").await;

    for request in [
        authed_request("GET", "/assistants/asst-unknown", &token, None),
        authed_request(
            "PATCH",
            "/assistants/asst-unknown",
            &token,
            Some(json!({"name": "New"})),
        ),
        authed_request("DELETE", "/assistants/asst-unknown", &token, None),
    ] {
        let response = app(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response_json(response).await;
        assert_eq!(body["detail"], "Assistant not found or access denied");
    }
}

#[tokio::test]
async fn test_other_users_assistant_is_merged_404() {
    let state = test_state().await;
    register(&state, "a@x.com", "p1").await;
    let token_b = register(&state, "b@x.com", "p2").await;

    let alice = database::user::get_user_by_email(state.db.pool(), "a@x.com")
        .await
        .unwrap()
        .unwrap();
    database::user_assistant::insert(state.db.pool(), &alice.id, "asst-123", "Alice's Bot")
        .await
        .unwrap();

    // B probing A's assistant id learns nothing beyond "not found"
    let response = app(state)
        .oneshot(authed_request("GET", "/assistants/asst-123", &token_b, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "Assistant not found or access denied");
}

#[tokio::test]
async fn test_create_phone_number_requires_owned_assistant() {
    let state = test_state().await;
    let token = register(&state, "a@x.com", "p1").await;

    // Ownership is checked before any provider call
    let response = app(state)
        .oneshot(authed_request(
            "POST",
            "/phone-numbers",
            &token,
            Some(json!({"number": "+15555550123", "assistant_id": "asst-unknown"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["detail"], "Assistant not found or access denied");
}

#[tokio::test]
async fn test_health() {
    let state = test_state().await;

    let response = app(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"status": "ok"}));
}
