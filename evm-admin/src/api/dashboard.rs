//! Dashboard summary endpoint

use axum::{extract::State, Json};
use chrono::Local;
use evm_common::api::ApiResult;
use evm_common::repo::dashboard::{dashboard_summary, DashboardSummary};

use crate::AppState;

/// GET /api/dashboard
///
/// Entity counts plus the next upcoming events, relative to the local date.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardSummary>> {
    let today = Local::now().date_naive();
    Ok(Json(dashboard_summary(&state.db, today).await?))
}
