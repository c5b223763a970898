//! HTTP-level integration tests for appointments: the admin CRUD surface
//! and the patient self-service booking flow.

mod common;

use axum::http::StatusCode;
use common::{
    delete_api_key, expect_json, get_api_key, get_auth, post_json_api_key, post_json_auth,
    put_json_api_key, test_token,
};
use serde_json::json;
use sqlx::PgPool;

use carelink_db::models::doctor::CreateDoctor;
use carelink_db::models::user::CreateUser;
use carelink_db::repositories::{DoctorRepo, UserRepo};

/// Insert a doctor directly and return its id.
async fn seed_doctor(pool: &PgPool) -> i64 {
    let input = CreateDoctor {
        email: "ayesha@hospital.example".to_string(),
        profile_photo: None,
        translations: json!({"en": {"name": "Dr. Ayesha Rahman"}}),
        appointment_fee: Some(1500.0),
        follow_up_fee: None,
        memberships: vec![],
        awards: vec![],
        treatments: vec![],
        conditions: vec![],
        schedule: vec![],
        faqs: vec![],
    };
    DoctorRepo::create(pool, &input, "dr-ayesha-rahman")
        .await
        .expect("doctor creation should succeed")
        .doctor
        .id
}

fn booking_payload(doctor_id: i64) -> serde_json::Value {
    json!({
        "doctor_id": doctor_id,
        "doctor_name": "Dr. Ayesha Rahman",
        "patient_name": "Karim Uddin",
        "mobile_number": "01712345678",
        "appointment_date": "2025-07-01T10:00:00Z",
        "blood_group": "A+",
        "consultation_type": "physical",
        "payment_method": "bkash",
        "consultation_fee": 1500.0
    })
}

// ---------------------------------------------------------------------------
// Admin create
// ---------------------------------------------------------------------------

/// Creating an appointment for a new mobile number creates the user and
/// patient records, and normalizes loose enum values.
#[sqlx::test(migrations = "../../db/migrations")]
async fn create_appointment_creates_user_and_patient(pool: PgPool) {
    let doctor_id = seed_doctor(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_api_key(app, "/api/v1/appointments", booking_payload(doctor_id)).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    assert_eq!(json["status"], "PENDING");
    assert_eq!(json["consultation_type"], "PHYSICAL");
    assert_eq!(json["payment_method"], "BKASH");
    assert_eq!(json["blood_group"], "A_POSITIVE");

    // The walk-in flow must have created a site user and a patient.
    let user = UserRepo::find_by_mobile(&pool, "01712345678")
        .await
        .unwrap()
        .expect("user should have been created");
    assert_eq!(user.name, "Karim Uddin");

    let patient_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM patients WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(patient_count, 1);
}

/// A second appointment for the same mobile reuses the patient record.
#[sqlx::test(migrations = "../../db/migrations")]
async fn repeat_booking_reuses_patient(pool: PgPool) {
    let doctor_id = seed_doctor(&pool).await;

    let app = common::build_test_app(pool.clone());
    post_json_api_key(app, "/api/v1/appointments", booking_payload(doctor_id)).await;
    let app = common::build_test_app(pool.clone());
    post_json_api_key(app, "/api/v1/appointments", booking_payload(doctor_id)).await;

    let patient_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patients")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(patient_count, 1);

    let appointment_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(appointment_count, 2);
}

/// An unknown doctor id is rejected with 400 before any insert.
#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_doctor_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_api_key(app, "/api/v1/appointments", booking_payload(9999)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// Unrecognized enum values are rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_unknown_enum_values(pool: PgPool) {
    let doctor_id = seed_doctor(&pool).await;

    let mut body = booking_payload(doctor_id);
    body["payment_method"] = json!("cash-under-the-table");

    let app = common::build_test_app(pool);
    let response = post_json_api_key(app, "/api/v1/appointments", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Admin read / update / delete
// ---------------------------------------------------------------------------

/// The list endpoint embeds the doctor and patient rows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn list_embeds_doctor_and_patient(pool: PgPool) {
    let doctor_id = seed_doctor(&pool).await;
    let app = common::build_test_app(pool.clone());
    post_json_api_key(app, "/api/v1/appointments", booking_payload(doctor_id)).await;

    let app = common::build_test_app(pool);
    let response = get_api_key(app, "/api/v1/appointments").await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["doctor"]["email"], "ayesha@hospital.example");
    assert_eq!(json[0]["patient"]["phone_number"], "01712345678");
}

/// Status updates are normalized and persisted; unknown ids 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn update_status_and_delete(pool: PgPool) {
    let doctor_id = seed_doctor(&pool).await;
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_api_key(app, "/api/v1/appointments", booking_payload(doctor_id)).await;
    let created = expect_json(response, StatusCode::CREATED).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_api_key(
        app,
        &format!("/api/v1/appointments/{id}"),
        json!({ "status": "confirmed" }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["status"], "CONFIRMED");

    let app = common::build_test_app(pool.clone());
    let response = delete_api_key(app, &format!("/api/v1/appointments/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = put_json_api_key(
        app,
        &format!("/api/v1/appointments/{id}"),
        json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Patient self-service
// ---------------------------------------------------------------------------

/// A logged-in user books an appointment; a patient record is created on
/// first booking and the doctor's fee is applied.
#[sqlx::test(migrations = "../../db/migrations")]
async fn own_booking_creates_patient_and_lists(pool: PgPool) {
    let doctor_id = seed_doctor(&pool).await;
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            name: "Karim Uddin".into(),
            mobile: "01812345678".into(),
            email: None,
        },
    )
    .await
    .unwrap();
    let token = test_token(user.id, &user.mobile);

    let app = common::build_test_app(pool.clone());
    let body = json!({
        "doctor_id": doctor_id,
        "appointment_date": "2025-07-02T09:30:00Z",
        "consultation_type": "video_call",
        "reason": "Follow-up"
    });
    let response = post_json_auth(app, "/api/v1/my/appointments", body, &token).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    assert_eq!(json["patient_name"], "Karim Uddin");
    assert_eq!(json["mobile_number"], "01812345678");
    assert_eq!(json["doctor_name"], "Dr. Ayesha Rahman");
    assert_eq!(json["consultation_type"], "VIDEO_CALL");
    assert_eq!(json["consultation_fee"], 1500.0);

    // The listing shows only this user's bookings.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/my/appointments", &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

/// Booking without a token is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn own_booking_requires_token(pool: PgPool) {
    let doctor_id = seed_doctor(&pool).await;
    let app = common::build_test_app(pool);
    let body = json!({ "doctor_id": doctor_id, "appointment_date": "2025-07-02T09:30:00Z" });
    let response = common::post_json(app, "/api/v1/my/appointments", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
