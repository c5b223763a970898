//! HTTP-level integration tests for blogs and patients, the two multipart
//! resources with file uploads.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get_api_key, send_multipart_api_key, Part};
use sqlx::PgPool;

// Smallest valid PNG header bytes; enough for an upload body.
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

/// Multipart create stores the translations and the uploaded image path.
#[sqlx::test(migrations = "../../db/migrations")]
async fn create_blog_with_image(pool: PgPool) {
    let translations =
        r#"{"en": {"title": "Heart health", "slug": "heart-health", "body": "..."}}"#;
    let parts = [
        Part::Text {
            name: "translations",
            value: translations,
        },
        Part::File {
            name: "image",
            filename: "cover.png",
            content_type: "image/png",
            data: PNG_BYTES,
        },
    ];

    let app = common::build_test_app(pool.clone());
    let response = send_multipart_api_key(app, "POST", "/api/v1/blogs", &parts).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    assert_eq!(json["translations"]["en"]["title"], "Heart health");
    let image = json["image"].as_str().unwrap();
    assert!(image.starts_with("/uploads/"));
    assert!(image.ends_with("_cover.png"));

    // The stored file is static-served back under /uploads.
    let app = common::build_test_app(pool);
    let response = common::get(app, image).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// The slug lookup matches any language's slug field.
#[sqlx::test(migrations = "../../db/migrations")]
async fn blog_slug_lookup_checks_every_language(pool: PgPool) {
    let translations = r#"{"en": {"slug": "heart-health"}, "bn": {"slug": "hridoy"}}"#;
    let parts = [Part::Text {
        name: "translations",
        value: translations,
    }];
    let app = common::build_test_app(pool.clone());
    send_multipart_api_key(app, "POST", "/api/v1/blogs", &parts).await;

    for slug in ["heart-health", "hridoy"] {
        let app = common::build_test_app(pool.clone());
        let response = get_api_key(app, &format!("/api/v1/blogs/slug/{slug}")).await;
        assert_eq!(response.status(), StatusCode::OK, "slug {slug} should match");
    }

    let app = common::build_test_app(pool);
    let response = get_api_key(app, "/api/v1/blogs/slug/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Uploads with a disallowed extension are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn blog_rejects_non_image_upload(pool: PgPool) {
    let parts = [
        Part::Text {
            name: "translations",
            value: r#"{"en": {"title": "x"}}"#,
        },
        Part::File {
            name: "image",
            filename: "malware.exe",
            content_type: "application/octet-stream",
            data: b"MZ",
        },
    ];

    let app = common::build_test_app(pool);
    let response = send_multipart_api_key(app, "POST", "/api/v1/blogs", &parts).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Update keeps the stored image when no new file is submitted.
#[sqlx::test(migrations = "../../db/migrations")]
async fn blog_update_keeps_image_when_absent(pool: PgPool) {
    let parts = [
        Part::Text {
            name: "translations",
            value: r#"{"en": {"title": "Old title"}}"#,
        },
        Part::File {
            name: "image",
            filename: "cover.png",
            content_type: "image/png",
            data: PNG_BYTES,
        },
    ];
    let app = common::build_test_app(pool.clone());
    let response = send_multipart_api_key(app, "POST", "/api/v1/blogs", &parts).await;
    let created = expect_json(response, StatusCode::CREATED).await;
    let id = created["id"].as_i64().unwrap();
    let image = created["image"].as_str().unwrap().to_string();

    let parts = [Part::Text {
        name: "translations",
        value: r#"{"en": {"title": "New title"}}"#,
    }];
    let app = common::build_test_app(pool);
    let response =
        send_multipart_api_key(app, "PUT", &format!("/api/v1/blogs/{id}"), &parts).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["translations"]["en"]["title"], "New title");
    assert_eq!(json["image"], image);
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

/// Multipart patient creation normalizes the blood group and
/// find-or-creates the owning site user by mobile number.
#[sqlx::test(migrations = "../../db/migrations")]
async fn create_patient_creates_owning_user(pool: PgPool) {
    let parts = [
        Part::Text {
            name: "name",
            value: "Karim Uddin",
        },
        Part::Text {
            name: "phone_number",
            value: "01712345678",
        },
        Part::Text {
            name: "blood_group",
            value: "O-",
        },
        Part::Text {
            name: "age",
            value: "34",
        },
        Part::File {
            name: "image",
            filename: "karim.png",
            content_type: "image/png",
            data: PNG_BYTES,
        },
    ];

    let app = common::build_test_app(pool.clone());
    let response = send_multipart_api_key(app, "POST", "/api/v1/patients", &parts).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    assert_eq!(json["blood_group"], "O_NEGATIVE");
    assert_eq!(json["age"], 34);
    assert!(json["image"].as_str().unwrap().starts_with("/uploads/"));

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE mobile = $1")
        .bind("01712345678")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 1);
}

/// Creation without the required fields is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn create_patient_requires_name_and_phone(pool: PgPool) {
    let parts = [Part::Text {
        name: "name",
        value: "Karim Uddin",
    }];
    let app = common::build_test_app(pool);
    let response = send_multipart_api_key(app, "POST", "/api/v1/patients", &parts).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Update applies only the submitted fields.
#[sqlx::test(migrations = "../../db/migrations")]
async fn update_patient_is_partial(pool: PgPool) {
    let parts = [
        Part::Text {
            name: "name",
            value: "Karim Uddin",
        },
        Part::Text {
            name: "phone_number",
            value: "01712345678",
        },
        Part::Text {
            name: "medical_history",
            value: "Asthma",
        },
    ];
    let app = common::build_test_app(pool.clone());
    let response = send_multipart_api_key(app, "POST", "/api/v1/patients", &parts).await;
    let created = expect_json(response, StatusCode::CREATED).await;
    let id = created["id"].as_i64().unwrap();

    let parts = [Part::Text {
        name: "weight",
        value: "72.5",
    }];
    let app = common::build_test_app(pool);
    let response =
        send_multipart_api_key(app, "PUT", &format!("/api/v1/patients/{id}"), &parts).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["weight"], 72.5);
    assert_eq!(json["medical_history"], "Asthma");
    assert_eq!(json["name"], "Karim Uddin");
}
