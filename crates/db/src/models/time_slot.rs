//! Bookable time slot model.

use serde::Serialize;
use sqlx::FromRow;

use carelink_core::types::DbId;

/// A `time_slots` row, belonging to one weekly schedule entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeSlot {
    pub id: DbId,
    pub schedule_id: DbId,
    pub starts_at: String,
    pub ends_at: String,
    pub is_booked: bool,
}
