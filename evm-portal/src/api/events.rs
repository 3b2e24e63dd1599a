//! Public event browsing

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use evm_common::api::ApiResult;
use evm_common::models::UpcomingEvent;
use evm_common::repo::events::{self, EventDetails};

use crate::AppState;

/// GET /api/events
///
/// Planned events from today on, soonest first.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<UpcomingEvent>>> {
    let today = Local::now().date_naive();
    Ok(Json(events::bookable_events(&state.db, today).await?))
}

/// GET /api/events/:id
pub async fn get_event_details(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ApiResult<Json<EventDetails>> {
    Ok(Json(events::event_details(&state.db, event_id).await?))
}
