//! Integration tests for API endpoints.
//!
//! These tests drive the real router with a stub auth service, so no
//! database connection is required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use accounts_api::api::{create_router, AppState};
use accounts_api::domain::{PasswordPolicy, User};
use accounts_api::errors::{AppError, AppResult};
use accounts_api::infra::Database;
use accounts_api::services::AuthService;

// =============================================================================
// Stub service and test helpers
// =============================================================================

fn sample_user(name: String, email: String) -> User {
    User {
        id: Uuid::new_v4(),
        name,
        email,
        password_hash: "$argon2id$stub".to_string(),
        created_at: Utc::now(),
    }
}

/// Stub auth service mirroring the service contract
struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User> {
        if email == "taken@example.com" {
            return Err(AppError::EmailTaken);
        }
        PasswordPolicy::validate(&password)?;
        Ok(sample_user(name, email))
    }

    async fn login(&self, email: String, password: String) -> AppResult<User> {
        if email == "jo@example.com" && password == "pass1234" {
            Ok(sample_user("Jo".to_string(), email))
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

fn test_app() -> Router {
    let database = Database::from_connection(DatabaseConnection::default());
    let state = AppState::new(Arc::new(StubAuthService), Arc::new(database));
    create_router(state)
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Register endpoint
// =============================================================================

#[tokio::test]
async fn test_register_returns_created_user() {
    let response = test_app()
        .oneshot(json_request(
            "/register",
            json!({"name": "Jo", "email": "jo@example.com", "password": "pass1234"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Jo");
    assert_eq!(body["email"], "jo@example.com");
    // The digest never crosses the HTTP boundary
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflict() {
    let response = test_app()
        .oneshot(json_request(
            "/register",
            json!({"name": "Jo", "email": "taken@example.com", "password": "pass1234"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "email already in use");
}

#[tokio::test]
async fn test_register_short_password_bad_request() {
    let response = test_app()
        .oneshot(json_request(
            "/register",
            json!({"name": "Jo", "email": "jo@example.com", "password": "short1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "password must be at least 8 characters");
}

#[tokio::test]
async fn test_register_invalid_email_bad_request() {
    let response = test_app()
        .oneshot(json_request(
            "/register",
            json!({"name": "Jo", "email": "not-an-email", "password": "pass1234"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_malformed_body_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Login endpoint
// =============================================================================

#[tokio::test]
async fn test_login_success_returns_user() {
    let response = test_app()
        .oneshot(json_request(
            "/login",
            json!({"email": "jo@example.com", "password": "pass1234"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["email"], "jo@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let response = test_app()
        .oneshot(json_request(
            "/login",
            json!({"email": "jo@example.com", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_same_response() {
    let wrong_password = test_app()
        .oneshot(json_request(
            "/login",
            json!({"email": "jo@example.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    let unknown_email = test_app()
        .oneshot(json_request(
            "/login",
            json!({"email": "nobody@example.com", "password": "pass1234"}),
        ))
        .await
        .unwrap();

    // Identical status and identical body for both failure modes
    assert_eq!(wrong_password.status(), unknown_email.status());
    assert_eq!(
        body_json(wrong_password).await,
        body_json(unknown_email).await
    );
}

// =============================================================================
// Misc routes and error mapping
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let request = Request::builder()
        .method("GET")
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"].get("/register").is_some());
    assert!(body["paths"].get("/login").is_some());
}

#[tokio::test]
async fn test_app_error_status_codes() {
    let cases = [
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (AppError::EmailTaken, StatusCode::CONFLICT),
        (AppError::validation("bad field"), StatusCode::BAD_REQUEST),
        (AppError::bad_request("bad body"), StatusCode::BAD_REQUEST),
        (
            AppError::internal("boom"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let response = AppError::internal("secret connection string").into_response();
    let body = body_json(response).await;

    assert_eq!(body["error"]["message"], "An internal error occurred");
}
