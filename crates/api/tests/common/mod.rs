#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use tfe_api::auth::jwt::{generate_access_token, JwtConfig};
use tfe_api::config::{RateLimitConfig, ServerConfig};
use tfe_api::routes;
use tfe_api::state::AppState;
use tfe_core::roles::{ROLE_ADMIN, ROLE_STAFF};
use tfe_core::store::MemoryContentStore;

pub const ADMIN_EMAIL: &str = "owner@tfe.test";

/// Build a test `ServerConfig` with safe defaults and the core rate budgets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        rate_limits: RateLimitConfig::default(),
    }
}

/// Mint a token accepted by [`test_config`].
pub fn token_for(email: &str, role: &str) -> String {
    generate_access_token(email, role, &test_config().jwt).expect("token generation")
}

pub fn admin_token() -> String {
    token_for(ADMIN_EMAIL, ROLE_ADMIN)
}

pub fn staff_token() -> String {
    token_for("cook@tfe.test", ROLE_STAFF)
}

/// Full router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    let state = AppState::new(Arc::new(MemoryContentStore::new()), test_config());
    build_test_app_with_state(state)
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3001".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<(&str, String)>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some((content_type, text)) => {
            builder = builder.header(CONTENT_TYPE, content_type);
            Body::from(text)
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response {
    send(
        app,
        method,
        uri,
        Some(token),
        Some(("application/json", json.to_string())),
    )
    .await
}

pub async fn post_csv(app: Router, uri: &str, token: &str, csv: &str) -> Response {
    send(
        app,
        Method::POST,
        uri,
        Some(token),
        Some(("text/csv", csv.to_string())),
    )
    .await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// A valid draft body for `PUT /admin/menu/drafts`.
pub fn draft_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "category": "Savory Empanadas",
        "prices": { "doordash": 3.5 },
        "orderLinks": { "doordash": "https://x/a" },
        "tags": ["Most-Loved"],
        "isActive": true
    })
}
