//! Handlers for schedule time slots.

use axum::extract::{Path, State};
use axum::Json;

use carelink_core::types::DbId;
use carelink_db::models::time_slot::TimeSlot;
use carelink_db::repositories::TimeSlotRepo;

use crate::error::AppResult;
use crate::middleware::api_key::ApiKeyGuard;
use crate::state::AppState;

/// GET /api/v1/schedules/{schedule_id}/time-slots
///
/// Lists the bookable slots of one weekly schedule entry. An unknown
/// schedule id yields an empty list rather than a 404; slots are seeded by
/// the dashboard, and "no slots yet" and "no such schedule" look the same
/// to the booking UI.
pub async fn list_time_slots(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(schedule_id): Path<DbId>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    let slots = TimeSlotRepo::list_by_schedule(&state.pool, schedule_id).await?;
    Ok(Json(slots))
}
