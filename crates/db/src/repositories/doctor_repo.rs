//! Repository for the `doctors` table and its per-doctor collections.
//!
//! Collections (memberships, awards, treatments, conditions, schedule,
//! FAQs) are replaced wholesale on update: delete-then-insert inside one
//! transaction.

use sqlx::{PgPool, Postgres, Transaction};

use carelink_core::types::DbId;

use crate::models::doctor::{
    CreateDoctor, Doctor, DoctorDetail, DoctorFaq, DoctorFilter, FaqInput, ScheduleEntry,
    ScheduleEntryInput, UpdateDoctor,
};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, slug, profile_photo, translations, appointment_fee, \
                       follow_up_fee, created_at, updated_at";

/// Provides CRUD operations for doctors.
pub struct DoctorRepo;

impl DoctorRepo {
    /// Insert a doctor and all submitted collections, returning the full
    /// detail view.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDoctor,
        slug: &str,
    ) -> Result<DoctorDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO doctors (email, slug, profile_photo, translations, appointment_fee, follow_up_fee)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let doctor = sqlx::query_as::<_, Doctor>(&query)
            .bind(&input.email)
            .bind(slug)
            .bind(&input.profile_photo)
            .bind(&input.translations)
            .bind(input.appointment_fee)
            .bind(input.follow_up_fee)
            .fetch_one(&mut *tx)
            .await?;

        insert_names(&mut tx, "doctor_memberships", "name", doctor.id, &input.memberships).await?;
        insert_names(&mut tx, "doctor_awards", "title", doctor.id, &input.awards).await?;
        insert_names(&mut tx, "doctor_treatments", "name", doctor.id, &input.treatments).await?;
        insert_names(&mut tx, "doctor_conditions", "name", doctor.id, &input.conditions).await?;
        insert_schedule(&mut tx, doctor.id, &input.schedule).await?;
        insert_faqs(&mut tx, doctor.id, &input.faqs).await?;

        tx.commit().await?;

        Self::load_detail(pool, doctor).await
    }

    /// Find a doctor by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Doctor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE id = $1");
        sqlx::query_as::<_, Doctor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a doctor by URL slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Doctor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE slug = $1");
        sqlx::query_as::<_, Doctor>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a doctor by email (used for the duplicate check on create).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Doctor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE email = $1");
        sqlx::query_as::<_, Doctor>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Fetch doctors by a set of IDs (batch lookup for joined listings).
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Doctor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE id = ANY($1)");
        sqlx::query_as::<_, Doctor>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List doctors with optional name search (any language), department
    /// filter (requested language), and pagination. Newest first.
    pub async fn list(pool: &PgPool, filter: &DoctorFilter) -> Result<Vec<Doctor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM doctors
             WHERE ($1::text IS NULL OR EXISTS (
                       SELECT 1 FROM jsonb_each(translations) AS t
                       WHERE t.value->>'name' ILIKE '%' || $1 || '%'))
               AND ($2::text IS NULL OR translations->$3->>'department' = $2)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(&filter.search)
            .bind(&filter.department)
            .bind(&filter.lang)
            .bind(clamp_limit(filter.limit))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Find the first unused slug derived from `base`: the base itself,
    /// then `base-2`, `base-3`, ...
    pub async fn next_free_slug(pool: &PgPool, base: &str) -> Result<String, sqlx::Error> {
        let mut n = 1;
        loop {
            let candidate = carelink_core::slug::nth_candidate(base, n);
            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM doctors WHERE slug = $1)")
                    .bind(&candidate)
                    .fetch_one(pool)
                    .await?;
            if !taken {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Update a doctor. Scalar fields are partial; collections present in
    /// `input` are replaced wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDoctor,
    ) -> Result<Option<DoctorDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE doctors SET
                email = COALESCE($2, email),
                profile_photo = COALESCE($3, profile_photo),
                translations = COALESCE($4, translations),
                appointment_fee = COALESCE($5, appointment_fee),
                follow_up_fee = COALESCE($6, follow_up_fee),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(doctor) = sqlx::query_as::<_, Doctor>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.profile_photo)
            .bind(&input.translations)
            .bind(input.appointment_fee)
            .bind(input.follow_up_fee)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(memberships) = &input.memberships {
            replace_names(&mut tx, "doctor_memberships", "name", id, memberships).await?;
        }
        if let Some(awards) = &input.awards {
            replace_names(&mut tx, "doctor_awards", "title", id, awards).await?;
        }
        if let Some(treatments) = &input.treatments {
            replace_names(&mut tx, "doctor_treatments", "name", id, treatments).await?;
        }
        if let Some(conditions) = &input.conditions {
            replace_names(&mut tx, "doctor_conditions", "name", id, conditions).await?;
        }
        if let Some(schedule) = &input.schedule {
            sqlx::query("DELETE FROM doctor_schedules WHERE doctor_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_schedule(&mut tx, id, schedule).await?;
        }
        if let Some(faqs) = &input.faqs {
            sqlx::query("DELETE FROM doctor_faqs WHERE doctor_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_faqs(&mut tx, id, faqs).await?;
        }

        tx.commit().await?;

        Self::load_detail(pool, doctor).await.map(Some)
    }

    /// Delete a doctor by ID (collections cascade). Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The weekly schedule of one doctor.
    pub async fn schedule_of(
        pool: &PgPool,
        doctor_id: DbId,
    ) -> Result<Vec<ScheduleEntry>, sqlx::Error> {
        sqlx::query_as::<_, ScheduleEntry>(
            "SELECT id, doctor_id, day, start_time, end_time
             FROM doctor_schedules WHERE doctor_id = $1 ORDER BY id",
        )
        .bind(doctor_id)
        .fetch_all(pool)
        .await
    }

    /// Load all collections for a doctor row and assemble the detail view.
    pub async fn load_detail(pool: &PgPool, doctor: Doctor) -> Result<DoctorDetail, sqlx::Error> {
        let memberships = fetch_names(pool, "doctor_memberships", "name", doctor.id).await?;
        let awards = fetch_names(pool, "doctor_awards", "title", doctor.id).await?;
        let treatments = fetch_names(pool, "doctor_treatments", "name", doctor.id).await?;
        let conditions = fetch_names(pool, "doctor_conditions", "name", doctor.id).await?;
        let schedule = Self::schedule_of(pool, doctor.id).await?;
        let faqs = sqlx::query_as::<_, DoctorFaq>(
            "SELECT id, question, answer FROM doctor_faqs WHERE doctor_id = $1 ORDER BY id",
        )
        .bind(doctor.id)
        .fetch_all(pool)
        .await?;

        Ok(DoctorDetail {
            doctor,
            memberships,
            awards,
            treatments,
            conditions,
            schedule,
            faqs,
        })
    }
}

/// Insert simple one-column collection rows for a doctor.
///
/// `table` and `column` are compile-time constants at every call site, so
/// the `format!` here never interpolates user input.
async fn insert_names(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    column: &str,
    doctor_id: DbId,
    values: &[String],
) -> Result<(), sqlx::Error> {
    for value in values {
        let query = format!("INSERT INTO {table} (doctor_id, {column}) VALUES ($1, $2)");
        sqlx::query(&query)
            .bind(doctor_id)
            .bind(value)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Delete-then-insert a one-column collection.
async fn replace_names(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    column: &str,
    doctor_id: DbId,
    values: &[String],
) -> Result<(), sqlx::Error> {
    let query = format!("DELETE FROM {table} WHERE doctor_id = $1");
    sqlx::query(&query).bind(doctor_id).execute(&mut **tx).await?;
    insert_names(tx, table, column, doctor_id, values).await
}

async fn insert_schedule(
    tx: &mut Transaction<'_, Postgres>,
    doctor_id: DbId,
    entries: &[ScheduleEntryInput],
) -> Result<(), sqlx::Error> {
    for entry in entries {
        sqlx::query(
            "INSERT INTO doctor_schedules (doctor_id, day, start_time, end_time)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(doctor_id)
        .bind(&entry.day)
        .bind(&entry.start_time)
        .bind(&entry.end_time)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_faqs(
    tx: &mut Transaction<'_, Postgres>,
    doctor_id: DbId,
    faqs: &[FaqInput],
) -> Result<(), sqlx::Error> {
    for faq in faqs {
        sqlx::query("INSERT INTO doctor_faqs (doctor_id, question, answer) VALUES ($1, $2, $3)")
            .bind(doctor_id)
            .bind(&faq.question)
            .bind(&faq.answer)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn fetch_names(
    pool: &PgPool,
    table: &str,
    column: &str,
    doctor_id: DbId,
) -> Result<Vec<String>, sqlx::Error> {
    let query = format!("SELECT {column} FROM {table} WHERE doctor_id = $1 ORDER BY id");
    sqlx::query_scalar::<_, String>(&query)
        .bind(doctor_id)
        .fetch_all(pool)
        .await
}
