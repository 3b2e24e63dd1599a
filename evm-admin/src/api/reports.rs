//! Whole-database report endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use evm_common::analytics::reports::ReportInfo;
use evm_common::analytics::{run_report as execute_report, ReportKind};
use evm_common::api::{ApiError, ApiResult, FormatQuery, Rendered};
use evm_common::render::ReportTable;

use crate::AppState;

/// GET /api/reports
pub async fn list_reports() -> Json<Vec<ReportInfo>> {
    Json(ReportKind::catalogue())
}

/// GET /api/reports/:slug
///
/// Runs one report. `?format=text` returns the fixed-width table.
pub async fn run_report(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<FormatQuery>,
) -> ApiResult<Rendered<ReportTable>> {
    let kind: ReportKind = slug
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Report '{}'", slug)))?;

    let table = execute_report(&state.db, kind).await?;
    Ok(Rendered::new(query.format, table, ReportTable::to_text))
}
