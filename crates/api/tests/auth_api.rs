//! HTTP-level integration tests for the OTP auth flow: send-otp,
//! register, login, profile, and single-use code semantics.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{expect_json, get_auth, post_json};
use sqlx::PgPool;

use carelink_db::models::user::CreateUser;
use carelink_db::repositories::{OtpRepo, UserRepo};

const MOBILE: &str = "01712345678";

/// Store a known OTP for a mobile number, as `POST /auth/send-otp` would.
async fn seed_otp(pool: &PgPool, mobile: &str, code: &str) {
    let expires_at = Utc::now() + Duration::minutes(5);
    OtpRepo::upsert(pool, mobile, code, expires_at)
        .await
        .expect("OTP upsert should succeed");
}

// ---------------------------------------------------------------------------
// send-otp
// ---------------------------------------------------------------------------

/// With no SMS/email configured, send-otp still stores a code and reports
/// delivered=false.
#[sqlx::test(migrations = "../../db/migrations")]
async fn send_otp_stores_code_without_delivery_channel(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "mobile": MOBILE });
    let response = post_json(app, "/api/v1/auth/send-otp", body).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["delivered"], false);
    assert_eq!(json["expires_in"], 300);

    // A code row must exist for the mobile number.
    let row: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM otp_codes WHERE mobile = $1")
        .bind(MOBILE)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(row, 1);
}

/// A malformed mobile number is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn send_otp_rejects_invalid_mobile(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "mobile": "not-a-number" });
    let response = post_json(app, "/api/v1/auth/send-otp", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Requesting a second code replaces the first; the old code stops working.
#[sqlx::test(migrations = "../../db/migrations")]
async fn send_otp_replaces_previous_code(pool: PgPool) {
    seed_otp(&pool, MOBILE, "111111").await;
    seed_otp(&pool, MOBILE, "222222").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Karim", "mobile": MOBILE, "otp": "111111" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Karim", "mobile": MOBILE, "otp": "222222" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// register
// ---------------------------------------------------------------------------

/// Registration with a valid code creates the user and consumes the code.
#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_user_and_consumes_code(pool: PgPool) {
    seed_otp(&pool, MOBILE, "654321").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Karim", "mobile": MOBILE, "otp": "654321" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    assert_eq!(json["name"], "Karim");
    assert_eq!(json["mobile"], MOBILE);
    assert_eq!(json["is_active"], true);

    // The same code cannot be used again (e.g. for login).
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "mobile": MOBILE, "otp": "654321" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Registering a mobile number that already has an account returns 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_mobile_conflicts(pool: PgPool) {
    UserRepo::create(
        &pool,
        &CreateUser {
            name: "Existing".into(),
            mobile: MOBILE.into(),
            email: None,
        },
    )
    .await
    .unwrap();
    seed_otp(&pool, MOBILE, "654321").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Karim", "mobile": MOBILE, "otp": "654321" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// An expired code is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_expired_code(pool: PgPool) {
    let expired = Utc::now() - Duration::minutes(1);
    OtpRepo::upsert(&pool, MOBILE, "654321", expired).await.unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Karim", "mobile": MOBILE, "otp": "654321" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// login / profile
// ---------------------------------------------------------------------------

/// Login with a valid code returns a token and the user; the token opens
/// the profile endpoint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token_that_opens_profile(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            name: "Karim".into(),
            mobile: MOBILE.into(),
            email: None,
        },
    )
    .await
    .unwrap();
    seed_otp(&pool, MOBILE, "111222").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "mobile": MOBILE, "otp": "111222" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["expires_in"], 7 * 24 * 60 * 60);

    let token = json["access_token"].as_str().unwrap().to_string();
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/profile", &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["mobile"], MOBILE);
}

/// Logging in with a code for an unregistered mobile number returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn login_unknown_user_returns_404(pool: PgPool) {
    seed_otp(&pool, MOBILE, "111222").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "mobile": MOBILE, "otp": "111222" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A wrong code is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_code_is_rejected(pool: PgPool) {
    UserRepo::create(
        &pool,
        &CreateUser {
            name: "Karim".into(),
            mobile: MOBILE.into(),
            email: None,
        },
    )
    .await
    .unwrap();
    seed_otp(&pool, MOBILE, "111222").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "mobile": MOBILE, "otp": "999999" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The profile endpoint rejects requests without a token.
#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/auth/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage token is rejected with 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_rejects_bad_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/profile", "not-a-jwt").await;
    let json = expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].is_string());
}
