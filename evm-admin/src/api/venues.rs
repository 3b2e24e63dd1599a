//! Venue CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evm_common::api::ApiResult;
use evm_common::models::{Venue, VenueInput};
use evm_common::repo::venues;

use super::{created, Created};
use crate::AppState;

/// GET /api/venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<Vec<Venue>>> {
    Ok(Json(venues::list_venues(&state.db).await?))
}

/// POST /api/venues
pub async fn create_venue(
    State(state): State<AppState>,
    Json(input): Json<VenueInput>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = venues::create_venue(&state.db, input).await?;
    Ok(created(id))
}

/// GET /api/venues/:id
pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Venue>> {
    Ok(Json(venues::get_venue(&state.db, id).await?))
}

/// PUT /api/venues/:id
pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<VenueInput>,
) -> ApiResult<Json<Venue>> {
    venues::update_venue(&state.db, id, input).await?;
    Ok(Json(venues::get_venue(&state.db, id).await?))
}

/// DELETE /api/venues/:id
///
/// 409 while any event is still booked at the venue.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    venues::delete_venue(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
