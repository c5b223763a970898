//! Repository for the `appointments` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::appointment::{Appointment, AppointmentChanges, NewAppointment};

const COLUMNS: &str = "id, doctor_id, patient_id, doctor_name, patient_name, mobile_number, \
                       appointment_date, serial_number, weight, age, blood_group, \
                       consultation_fee, vat, promo_code, consultation_type, payment_method, \
                       director_reference, reason, address, status, created_at, updated_at";

/// Provides CRUD operations for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert a new appointment (status starts as `PENDING`), returning the
    /// created row.
    pub async fn create(pool: &PgPool, input: &NewAppointment) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments (doctor_id, patient_id, doctor_name, patient_name,
                                       mobile_number, appointment_date, serial_number, weight,
                                       age, blood_group, consultation_fee, vat, promo_code,
                                       consultation_type, payment_method, director_reference,
                                       reason, address)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(input.doctor_id)
            .bind(input.patient_id)
            .bind(&input.doctor_name)
            .bind(&input.patient_name)
            .bind(&input.mobile_number)
            .bind(input.appointment_date)
            .bind(input.serial_number)
            .bind(input.weight)
            .bind(input.age)
            .bind(&input.blood_group)
            .bind(input.consultation_fee)
            .bind(input.vat)
            .bind(&input.promo_code)
            .bind(&input.consultation_type)
            .bind(&input.payment_method)
            .bind(&input.director_reference)
            .bind(&input.reason)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    /// Find an appointment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all appointments, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments ORDER BY created_at DESC");
        sqlx::query_as::<_, Appointment>(&query).fetch_all(pool).await
    }

    /// List the appointments booked by one site user (via their patient
    /// records), newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT a.{}
             FROM appointments a
             JOIN patients p ON p.id = a.patient_id
             WHERE p.user_id = $1
             ORDER BY a.created_at DESC",
            COLUMNS.replace(", ", ", a.")
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an appointment. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AppointmentChanges,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                doctor_name = COALESCE($2, doctor_name),
                patient_name = COALESCE($3, patient_name),
                mobile_number = COALESCE($4, mobile_number),
                appointment_date = COALESCE($5, appointment_date),
                serial_number = COALESCE($6, serial_number),
                weight = COALESCE($7, weight),
                age = COALESCE($8, age),
                blood_group = COALESCE($9, blood_group),
                consultation_fee = COALESCE($10, consultation_fee),
                vat = COALESCE($11, vat),
                promo_code = COALESCE($12, promo_code),
                consultation_type = COALESCE($13, consultation_type),
                payment_method = COALESCE($14, payment_method),
                director_reference = COALESCE($15, director_reference),
                reason = COALESCE($16, reason),
                address = COALESCE($17, address),
                status = COALESCE($18, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(&input.doctor_name)
            .bind(&input.patient_name)
            .bind(&input.mobile_number)
            .bind(input.appointment_date)
            .bind(input.serial_number)
            .bind(input.weight)
            .bind(input.age)
            .bind(&input.blood_group)
            .bind(input.consultation_fee)
            .bind(input.vat)
            .bind(&input.promo_code)
            .bind(&input.consultation_type)
            .bind(&input.payment_method)
            .bind(&input.director_reference)
            .bind(&input.reason)
            .bind(&input.address)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an appointment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
