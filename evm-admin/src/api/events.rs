//! Event CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evm_common::api::ApiResult;
use evm_common::models::{Event, EventInput, EventListing};
use evm_common::repo::events;

use super::{created, Created};
use crate::AppState;

/// GET /api/events
///
/// All events with their venue name, newest date first.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<EventListing>>> {
    Ok(Json(events::list_events(&state.db).await?))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<EventInput>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = events::create_event(&state.db, input).await?;
    Ok(created(id))
}

/// GET /api/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Event>> {
    Ok(Json(events::get_event(&state.db, id).await?))
}

/// PUT /api/events/:id
///
/// Replaces every field and returns the stored event.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<EventInput>,
) -> ApiResult<Json<Event>> {
    events::update_event(&state.db, id, input).await?;
    Ok(Json(events::get_event(&state.db, id).await?))
}

/// DELETE /api/events/:id
///
/// Tickets, purchases and assignments of the event go with it.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    events::delete_event(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
