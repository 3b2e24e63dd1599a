//! Per-event analytics and quick metrics

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use evm_common::analytics::{
    compute_metric, event_financial_summary, event_revenue, event_statistics, AnalyticsKind,
    Metric, MetricResult,
};
use evm_common::api::{ApiError, ApiResult, FormatQuery, Rendered};

use crate::AppState;

/// GET /api/events/:id/analytics/:kind
///
/// `kind` is `statistics`, `financial-summary` or `revenue`. With
/// `?format=text` the result is rendered as dotted key/value lines.
pub async fn event_analytics(
    State(state): State<AppState>,
    Path((event_id, kind)): Path<(i64, String)>,
    Query(query): Query<FormatQuery>,
) -> ApiResult<Response> {
    let kind: AnalyticsKind = kind
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Analytics '{}'", kind)))?;

    let response = match kind {
        AnalyticsKind::Statistics => {
            let stats = event_statistics(&state.db, event_id).await?;
            Rendered::new(query.format, stats, |s| s.to_report().to_text()).into_response()
        }
        AnalyticsKind::FinancialSummary => {
            let summary = event_financial_summary(&state.db, event_id).await?;
            Rendered::new(query.format, summary, |s| s.to_report().to_text()).into_response()
        }
        AnalyticsKind::Revenue => {
            let revenue = event_revenue(&state.db, event_id).await?;
            Rendered::new(query.format, revenue, |r| r.to_report().to_text()).into_response()
        }
    };
    Ok(response)
}

/// GET /api/events/:id/metrics/:metric
pub async fn event_metric(
    State(state): State<AppState>,
    Path((event_id, metric)): Path<(i64, String)>,
    Query(query): Query<FormatQuery>,
) -> ApiResult<Rendered<MetricResult>> {
    let metric: Metric = metric
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Metric '{}'", metric)))?;

    let result = compute_metric(&state.db, event_id, metric).await?;
    Ok(Rendered::new(query.format, result, MetricResult::to_text))
}
