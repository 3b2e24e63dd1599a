//! Sponsor CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evm_common::api::ApiResult;
use evm_common::models::{Sponsor, SponsorInput};
use evm_common::repo::sponsors;

use super::{created, Created};
use crate::AppState;

/// GET /api/sponsors
pub async fn list_sponsors(State(state): State<AppState>) -> ApiResult<Json<Vec<Sponsor>>> {
    Ok(Json(sponsors::list_sponsors(&state.db).await?))
}

/// POST /api/sponsors
pub async fn create_sponsor(
    State(state): State<AppState>,
    Json(input): Json<SponsorInput>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = sponsors::create_sponsor(&state.db, input).await?;
    Ok(created(id))
}

/// GET /api/sponsors/:id
pub async fn get_sponsor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Sponsor>> {
    Ok(Json(sponsors::get_sponsor(&state.db, id).await?))
}

/// PUT /api/sponsors/:id
pub async fn update_sponsor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<SponsorInput>,
) -> ApiResult<Json<Sponsor>> {
    sponsors::update_sponsor(&state.db, id, input).await?;
    Ok(Json(sponsors::get_sponsor(&state.db, id).await?))
}

/// DELETE /api/sponsors/:id
pub async fn delete_sponsor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    sponsors::delete_sponsor(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
