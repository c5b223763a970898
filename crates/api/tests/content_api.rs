//! HTTP-level integration tests for the singleton site sections:
//! header create-once semantics, footer per-language upsert, and the
//! homepage section operations.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get_api_key, post_json_api_key, put_json_api_key};
use common::{send_multipart_api_key, Part};
use serde_json::json;
use sqlx::PgPool;

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

fn header_parts<'a>() -> Vec<Part<'a>> {
    vec![
        Part::Text {
            name: "data",
            value: r#"{"en": {"menus": [{"label": "Home", "href": "/"}], "tagline": "Care first"}}"#,
        },
        Part::File {
            name: "logo",
            filename: "logo.png",
            content_type: "image/png",
            data: PNG_BYTES,
        },
    ]
}

/// Header creation stores the logo path; a second POST is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn header_is_create_once(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response =
        send_multipart_api_key(app, "POST", "/api/v1/content/header", &header_parts()).await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert!(json["logo"].as_str().unwrap().starts_with("/uploads/"));
    assert_eq!(json["translations"]["en"]["tagline"], "Care first");

    let app = common::build_test_app(pool);
    let response =
        send_multipart_api_key(app, "POST", "/api/v1/content/header", &header_parts()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A header payload without a menus array for a language is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn header_requires_menus_per_language(pool: PgPool) {
    let parts = [Part::Text {
        name: "data",
        value: r#"{"en": {"tagline": "no menus here"}}"#,
    }];
    let app = common::build_test_app(pool);
    let response = send_multipart_api_key(app, "POST", "/api/v1/content/header", &parts).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert!(json["error"].as_str().unwrap().contains("menus"));
}

/// PUT merges new language blocks over the stored ones.
#[sqlx::test(migrations = "../../db/migrations")]
async fn header_update_merges_languages(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    send_multipart_api_key(app, "POST", "/api/v1/content/header", &header_parts()).await;

    let parts = [Part::Text {
        name: "data",
        value: r#"{"bn": {"menus": [{"label": "হোম", "href": "/"}]}}"#,
    }];
    let app = common::build_test_app(pool.clone());
    let response = send_multipart_api_key(app, "PUT", "/api/v1/content/header", &parts).await;
    let json = expect_json(response, StatusCode::OK).await;

    // Both languages now present.
    assert_eq!(json["translations"]["en"]["tagline"], "Care first");
    assert_eq!(json["translations"]["bn"]["menus"][0]["label"], "হোম");

    let app = common::build_test_app(pool);
    let response = get_api_key(app, "/api/v1/content/header").await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// GET before creation returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_header_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_api_key(app, "/api/v1/content/header").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

/// Footer upsert creates on first POST and merges languages on repeat
/// POSTs; uploaded logos are patched into the language block.
#[sqlx::test(migrations = "../../db/migrations")]
async fn footer_upserts_per_language(pool: PgPool) {
    let parts = [
        Part::Text {
            name: "language",
            value: "en",
        },
        Part::Text {
            name: "data",
            value: r#"{"description": "A hospital", "contact": {"phone": "10666"}}"#,
        },
        Part::File {
            name: "contact_logo",
            filename: "phone.png",
            content_type: "image/png",
            data: PNG_BYTES,
        },
    ];
    let app = common::build_test_app(pool.clone());
    let response = send_multipart_api_key(app, "POST", "/api/v1/content/footer", &parts).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["translations"]["en"]["description"], "A hospital");
    assert_eq!(json["translations"]["en"]["contact"]["phone"], "10666");
    assert!(json["translations"]["en"]["contact"]["logo"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/"));

    // A second language leaves the first intact.
    let parts = [
        Part::Text {
            name: "language",
            value: "bn",
        },
        Part::Text {
            name: "data",
            value: r#"{"description": "হাসপাতাল"}"#,
        },
    ];
    let app = common::build_test_app(pool);
    let response = send_multipart_api_key(app, "POST", "/api/v1/content/footer", &parts).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["translations"]["en"]["description"], "A hospital");
    assert_eq!(json["translations"]["bn"]["description"], "হাসপাতাল");
}

// ---------------------------------------------------------------------------
// Homepage
// ---------------------------------------------------------------------------

fn homepage_payload() -> serde_json::Value {
    json!({
        "translations": {
            "en": {
                "hero": { "title": "Welcome", "subtitle": "We care" },
                "stats": { "doctors": 120, "beds": 450 }
            }
        }
    })
}

/// Homepage is create-once; sections are readable individually.
#[sqlx::test(migrations = "../../db/migrations")]
async fn homepage_create_and_read_section(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_api_key(app, "/api/v1/content/homepage", homepage_payload()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = post_json_api_key(app, "/api/v1/content/homepage", homepage_payload()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = get_api_key(app, "/api/v1/content/homepage?section=hero").await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["title"], "Welcome");

    let app = common::build_test_app(pool);
    let response = get_api_key(app, "/api/v1/content/homepage?section=missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// PUT /homepage/{section} replaces one section in one language.
#[sqlx::test(migrations = "../../db/migrations")]
async fn homepage_section_update_is_scoped(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json_api_key(app, "/api/v1/content/homepage", homepage_payload()).await;

    let body = json!({ "lang": "en", "content": { "title": "New title" } });
    let app = common::build_test_app(pool);
    let response = put_json_api_key(app, "/api/v1/content/homepage/hero", body).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["translations"]["en"]["hero"]["title"], "New title");
    // Sibling sections are untouched.
    assert_eq!(json["translations"]["en"]["stats"]["doctors"], 120);
}

/// copy-translations duplicates a language tree onto another language.
#[sqlx::test(migrations = "../../db/migrations")]
async fn homepage_copy_translations(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json_api_key(app, "/api/v1/content/homepage", homepage_payload()).await;

    let body = json!({ "from": "en", "to": "bn" });
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_api_key(app, "/api/v1/content/homepage/copy-translations", body).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["translations"]["bn"]["hero"]["title"], "Welcome");

    // Copying from a language with no content is a 400.
    let body = json!({ "from": "fr", "to": "bn" });
    let app = common::build_test_app(pool);
    let response =
        post_json_api_key(app, "/api/v1/content/homepage/copy-translations", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The section image endpoint stores the file and patches the path.
#[sqlx::test(migrations = "../../db/migrations")]
async fn homepage_section_image_upload(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json_api_key(app, "/api/v1/content/homepage", homepage_payload()).await;

    let parts = [
        Part::Text {
            name: "language",
            value: "en",
        },
        Part::File {
            name: "image",
            filename: "hero.png",
            content_type: "image/png",
            data: PNG_BYTES,
        },
    ];
    let app = common::build_test_app(pool);
    let response =
        send_multipart_api_key(app, "POST", "/api/v1/content/homepage/hero/image", &parts).await;
    let json = expect_json(response, StatusCode::OK).await;

    let image = json["translations"]["en"]["hero"]["image"].as_str().unwrap();
    assert!(image.starts_with("/uploads/"));
    // The rest of the section survives the patch.
    assert_eq!(json["translations"]["en"]["hero"]["title"], "Welcome");
}
