//! Route definitions for schedule time slots.

use axum::routing::get;
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/schedules`.
///
/// ```text
/// GET /{schedule_id}/time-slots -> list_time_slots
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{schedule_id}/time-slots", get(schedule::list_time_slots))
}
