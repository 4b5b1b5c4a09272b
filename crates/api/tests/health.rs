//! HTTP-level tests for routing, health, auth rejection, and error
//! envelopes.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.
//! The pool is lazily connected to an unreachable address, so these tests
//! run without a live database: they cover everything that happens before a
//! query, plus the sanitized 500 envelope when a query is attempted.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_auth, post_json, unreachable_pool};

use formbox_api::auth::jwt::generate_access_token;

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let app = build_test_app(unreachable_pool());

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(
        json["version"].as_str().is_some_and(|v| !v.is_empty()),
        "version must be present"
    );
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/api/v1/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forms_requires_bearer_token() {
    let app = build_test_app(unreachable_pool());

    let response = get(app, "/api/v1/forms").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn test_forms_rejects_invalid_token() {
    let app = build_test_app(unreachable_pool());

    let response = get_auth(app, "/api/v1/forms", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_valid_token_reaches_handler_and_db_failure_is_sanitized() {
    let config = common::test_config();
    let token =
        generate_access_token(1, "tester", &config.jwt).expect("token generation should succeed");
    let app = build_test_app(unreachable_pool());

    // Auth passes; the handler's query then fails against the unreachable
    // pool and must surface as a sanitized 500, never a raw driver error.
    let response = get_auth(app, "/api/v1/forms", &token).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn test_malformed_login_body_is_rejected_before_any_query() {
    let app = build_test_app(unreachable_pool());

    // Missing the password field entirely.
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "ada" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
