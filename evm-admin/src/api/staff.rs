//! Staff CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evm_common::api::ApiResult;
use evm_common::models::{Staff, StaffInput};
use evm_common::repo::staff;

use super::{created, Created};
use crate::AppState;

/// GET /api/staff
///
/// Grouped by role, then name.
pub async fn list_staff(State(state): State<AppState>) -> ApiResult<Json<Vec<Staff>>> {
    Ok(Json(staff::list_staff(&state.db).await?))
}

/// POST /api/staff
pub async fn create_staff(
    State(state): State<AppState>,
    Json(input): Json<StaffInput>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = staff::create_staff(&state.db, input).await?;
    Ok(created(id))
}

/// GET /api/staff/:id
pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Staff>> {
    Ok(Json(staff::get_staff(&state.db, id).await?))
}

/// PUT /api/staff/:id
pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<StaffInput>,
) -> ApiResult<Json<Staff>> {
    staff::update_staff(&state.db, id, input).await?;
    Ok(Json(staff::get_staff(&state.db, id).await?))
}

/// DELETE /api/staff/:id
pub async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    staff::delete_staff(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
