//! Artist CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evm_common::api::ApiResult;
use evm_common::models::{Artist, ArtistInput};
use evm_common::repo::artists;

use super::{created, Created};
use crate::AppState;

pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<Artist>>> {
    Ok(Json(artists::list_artists(&state.db).await?))
}

pub async fn create_artist(
    State(state): State<AppState>,
    Json(input): Json<ArtistInput>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = artists::create_artist(&state.db, input).await?;
    Ok(created(id))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Artist>> {
    Ok(Json(artists::get_artist(&state.db, id).await?))
}

pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ArtistInput>,
) -> ApiResult<Json<Artist>> {
    artists::update_artist(&state.db, id, input).await?;
    Ok(Json(artists::get_artist(&state.db, id).await?))
}

/// Removing an artist also drops their performances
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    artists::delete_artist(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
