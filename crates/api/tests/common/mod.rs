#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use carelink_api::auth::jwt::{generate_access_token, JwtConfig};
use carelink_api::config::ServerConfig;
use carelink_api::router::build_app_router;
use carelink_api::state::AppState;

/// API key used by the test configuration.
pub const TEST_API_KEY: &str = "test-api-key";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        upload_dir: std::env::temp_dir().join("carelink-test-uploads"),
        api_key: TEST_API_KEY.to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The SMS/email/voice integrations
/// are disabled, as in a default development environment.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sms: None,
        mailer: None,
        voice: None,
    };

    build_app_router(state, &config)
}

/// Issue an access token for a user id the way login does.
pub fn test_token(user_id: i64, mobile: &str) -> String {
    generate_access_token(user_id, mobile, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with the test API key.
pub async fn get_api_key(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header("x-api-key", TEST_API_KEY)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON request with the given method.
pub async fn send_json(
    app: Router,
    method: &str,
    path: &str,
    body: serde_json::Value,
    api_key: bool,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if api_key {
        builder = builder.header("x-api-key", TEST_API_KEY);
    }
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body (no auth).
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", path, body, false, None).await
}

/// POST a JSON body with the test API key.
pub async fn post_json_api_key(
    app: Router,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "POST", path, body, true, None).await
}

/// PUT a JSON body with the test API key.
pub async fn put_json_api_key(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", path, body, true, None).await
}

/// POST a JSON body with a Bearer token.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, "POST", path, body, false, Some(token)).await
}

/// DELETE with the test API key.
pub async fn delete_api_key(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header("x-api-key", TEST_API_KEY)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

/// Assert a status and return the JSON body in one step.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "carelink-test-boundary";

/// One part of a multipart form.
pub enum Part<'a> {
    Text {
        name: &'a str,
        value: &'a str,
    },
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Assemble a `multipart/form-data` body from parts.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a multipart request with the test API key.
pub async fn send_multipart_api_key(
    app: Router,
    method: &str,
    path: &str,
    parts: &[Part<'_>],
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("x-api-key", TEST_API_KEY)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
