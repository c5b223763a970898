//! Repository for the `time_slots` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::time_slot::TimeSlot;

/// Read access to bookable time slots.
pub struct TimeSlotRepo;

impl TimeSlotRepo {
    /// List all slots of one schedule entry, in insertion order.
    pub async fn list_by_schedule(
        pool: &PgPool,
        schedule_id: DbId,
    ) -> Result<Vec<TimeSlot>, sqlx::Error> {
        sqlx::query_as::<_, TimeSlot>(
            "SELECT id, schedule_id, starts_at, ends_at, is_booked
             FROM time_slots WHERE schedule_id = $1 ORDER BY id",
        )
        .bind(schedule_id)
        .fetch_all(pool)
        .await
    }
}
