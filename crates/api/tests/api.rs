//! Router-level tests over the in-memory store.
//!
//! Each test builds a fresh application with [`AppState::in_memory`] and
//! drives it with `tower::ServiceExt::oneshot`; no database or socket is
//! needed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use warung_core::{AccountId, Role, Username};

use warung_api::config::{PasswordHashConfig, TokenConfig};
use warung_api::models::Account;
use warung_api::routes;
use warung_api::services::auth::{CredentialManager, TokenService};
use warung_api::state::AppState;

const SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";

fn tokens() -> TokenService {
    TokenService::new(&TokenConfig {
        secret: SecretString::from(SECRET),
        ttl_secs: 3600,
    })
}

fn app() -> Router {
    let credentials = CredentialManager::new(PasswordHashConfig {
        memory_kib: 1024,
        iterations: 1,
    })
    .unwrap();
    routes::app(AppState::in_memory(credentials, tokens()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

async fn register(app: &Router, path: &str, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        path,
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token in body").to_owned()
}

/// Registers an admin and a user, seeds product `AB1`, returns both tokens.
async fn seeded() -> (Router, String, String) {
    let app = app();
    register(&app, "/auth/register-admin", "boss", "rahasia1").await;
    register(&app, "/auth/register", "kasir", "rahasia2").await;
    let admin = login(&app, "boss", "rahasia1").await;
    let user = login(&app, "kasir", "rahasia2").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/produk",
        Some(&user),
        Some(json!({
            "kd_produk": "ab1",
            "nm_brg": "Gula 1kg",
            "hrg": 15000,
            "ket_stok": "ada"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (app, admin, user)
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn register_returns_created_account() {
    let app = app();
    let (status, body) = register(&app, "/auth/register", "Alice", "secret1").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1, "username": "alice" }));
}

#[tokio::test]
async fn register_twice_conflicts() {
    let app = app();
    register(&app, "/auth/register", "Alice", "secret1").await;

    let (status, body) = register(&app, "/auth/register", "Alice", "secret1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict on username");

    let (status, _) = register(&app, "/auth/register-admin", "alice", "secret1").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let app = app();

    let (status, _) = register(&app, "/auth/register", "bob", "12345").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = app();
    register(&app, "/auth/register", "Alice", "secret1").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");

    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "nobody", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_long_unknown_username_is_unauthorized() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "x".repeat(65), "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn login_token_carries_role() {
    let app = app();
    register(&app, "/auth/register", "Alice", "secret1").await;

    let token = login(&app, "alice", "secret1").await;
    let claims = tokens().verify(&token).unwrap();

    assert_eq!(claims.user.username.as_str(), "alice");
    assert_eq!(claims.user.role.as_str(), "user");
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn create_product_requires_token() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/produk",
        None,
        Some(json!({ "kd_produk": "x1", "nm_brg": "Teh", "hrg": 3000, "ket_stok": "ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_code_is_upper_cased() {
    let (app, _, _) = seeded().await;

    let (status, body) = send(&app, Method::GET, "/produk/ab1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kd_produk"], "AB1");
    assert_eq!(body["hrg"], "15000");

    let (status, list) = send(&app, Method::GET, "/produk", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_product_code_conflicts() {
    let (app, _, user) = seeded().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/produk",
        Some(&user),
        Some(json!({ "kd_produk": "AB1", "nm_brg": "Kopi", "hrg": 2000, "ket_stok": "habis" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict on code");
}

#[tokio::test]
async fn admin_updates_only_supplied_fields() {
    let (app, admin, _) = seeded().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/produk/AB1",
        Some(&admin),
        Some(json!({ "hrg": 500 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hrg"], "500");
    assert_eq!(body["nm_brg"], "Gula 1kg");
    assert_eq!(body["ket_stok"], "ada");
}

#[tokio::test]
async fn update_with_user_token_is_forbidden() {
    let (app, _, user) = seeded().await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/produk/AB1",
        Some(&user),
        Some(json!({ "hrg": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn update_without_token_is_unauthorized_not_forbidden() {
    let (app, _, _) = seeded().await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/produk/AB1",
        None,
        Some(json!({ "hrg": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/produk/AB1",
        Some("garbage"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_admin_token_is_unauthorized() {
    let (app, _, _) = seeded().await;
    let expired = tokens()
        .issue_at(
            &Account {
                id: AccountId::new(1),
                username: Username::parse("boss").unwrap(),
                role: Role::Admin,
            },
            Utc::now() - Duration::hours(2),
        )
        .unwrap();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/produk/AB1",
        Some(&expired),
        Some(json!({ "hrg": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::DELETE, "/produk/AB1", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_product_with_bad_stock_status_is_bad_request() {
    let (app, _, user) = seeded().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/produk",
        Some(&user),
        Some(json!({ "kd_produk": "k2", "nm_brg": "Kopi", "hrg": 2000, "ket_stok": "sedikit" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("ket_stok"));
}

#[tokio::test]
async fn create_product_with_missing_field_is_bad_request() {
    let (app, _, user) = seeded().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/produk",
        Some(&user),
        Some(json!({ "kd_produk": "k2", "nm_brg": "Kopi", "ket_stok": "ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "hrg is required");
}

#[tokio::test]
async fn long_product_codes_are_stored_and_looked_up() {
    let (app, _, user) = seeded().await;

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/produk/{}", "z".repeat(33)),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let code = "k".repeat(40);
    let (status, body) = send(
        &app,
        Method::POST,
        "/produk",
        Some(&user),
        Some(json!({ "kd_produk": code, "nm_brg": "Kopi", "hrg": 2000, "ket_stok": "ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kd_produk"], "K".repeat(40));

    let (status, _) = send(&app, Method::GET, &format!("/produk/{code}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_with_empty_body_is_bad_request() {
    let (app, admin, _) = seeded().await;
    let (status, body) = send(&app, Method::PUT, "/produk/AB1", Some(&admin), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no fields to update");
}

#[tokio::test]
async fn update_with_bad_stock_status_names_field() {
    let (app, admin, _) = seeded().await;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/produk/AB1",
        Some(&admin),
        Some(json!({ "ket_stok": "sedikit" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("ket_stok"));
}

#[tokio::test]
async fn update_unknown_product_is_not_found() {
    let (app, admin, _) = seeded().await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/produk/ZZ9",
        Some(&admin),
        Some(json!({ "hrg": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_product_is_not_found() {
    let (app, admin, _) = seeded().await;
    let (status, _) = send(&app, Method::DELETE, "/produk/ZZ9", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_deletes_product() {
    let (app, admin, user) = seeded().await;

    let (status, _) = send(&app, Method::DELETE, "/produk/AB1", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::DELETE, "/produk/ab1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, "/produk/AB1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Service
// ============================================================================

#[tokio::test]
async fn status_reports_service() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "service": "api-warungklontong" }));
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = app();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}
