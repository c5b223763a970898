//! Repository for the `patients` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::patient::{CreatePatient, Patient, UpdatePatient};

const COLUMNS: &str = "id, user_id, name, phone_number, email, gender, blood_group, \
                       date_of_birth, age, weight, height, medical_history, image, \
                       created_at, updated_at";

/// Provides CRUD operations for patients.
pub struct PatientRepo;

impl PatientRepo {
    /// Insert a new patient, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePatient) -> Result<Patient, sqlx::Error> {
        let query = format!(
            "INSERT INTO patients (user_id, name, phone_number, email, gender, blood_group,
                                   date_of_birth, age, weight, height, medical_history, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.gender)
            .bind(&input.blood_group)
            .bind(input.date_of_birth)
            .bind(input.age)
            .bind(input.weight)
            .bind(input.height)
            .bind(&input.medical_history)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Find a patient by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all patients, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients ORDER BY created_at DESC");
        sqlx::query_as::<_, Patient>(&query).fetch_all(pool).await
    }

    /// List the patients that belong to one site user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM patients WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The oldest patient record of a user, if any. Booking flows reuse
    /// this record when the account already has one.
    pub async fn find_first_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM patients WHERE user_id = $1 ORDER BY created_at ASC LIMIT 1"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch patients by a set of IDs (batch lookup for joined listings).
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = ANY($1)");
        sqlx::query_as::<_, Patient>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a patient. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePatient,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET
                name = COALESCE($2, name),
                phone_number = COALESCE($3, phone_number),
                email = COALESCE($4, email),
                gender = COALESCE($5, gender),
                blood_group = COALESCE($6, blood_group),
                date_of_birth = COALESCE($7, date_of_birth),
                age = COALESCE($8, age),
                weight = COALESCE($9, weight),
                height = COALESCE($10, height),
                medical_history = COALESCE($11, medical_history),
                image = COALESCE($12, image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.gender)
            .bind(&input.blood_group)
            .bind(input.date_of_birth)
            .bind(input.age)
            .bind(input.weight)
            .bind(input.height)
            .bind(&input.medical_history)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a patient by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
