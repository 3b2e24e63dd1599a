//! Event assignment endpoints
//!
//! Artists, sponsors and staff are attached to events through the
//! `performs`, `sponsors_event` and `works_at` tables. Each family has a
//! view (JSON or `?format=text`), an assign and a remove endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use evm_common::api::{ApiResult, FormatQuery, Rendered};
use evm_common::models::{
    ArtistAssignment, EventArtist, EventSponsor, EventStaff, SponsorAssignment, StaffAssignment,
};
use evm_common::render::{format_currency, ReportTable};
use evm_common::repo::assignments;
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// Assignments of one kind for an event, with totals
#[derive(Debug, Serialize)]
pub struct AssignmentView<T> {
    pub event_id: i64,
    pub items: Vec<T>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}

impl<T> AssignmentView<T> {
    fn new(event_id: i64, items: Vec<T>) -> Self {
        Self {
            event_id,
            count: items.len(),
            items,
            total_amount: None,
        }
    }
}

// ============================================================================
// Artists
// ============================================================================

fn artists_text(view: &AssignmentView<EventArtist>) -> String {
    let rows: Vec<Vec<Value>> = view
        .items
        .iter()
        .map(|a| vec![json!(a.artist_id), json!(a.name), json!(a.genre), json!(a.no_of_songs), json!(a.fee)])
        .collect();

    ReportTable::new(
        format!("Artists for Event ID: {}", view.event_id),
        &["artist_id", "name", "genre", "no_of_songs", "fee"],
    )
    .with_rows(rows)
    .with_note(format!("Total Artists: {}", view.count))
    .to_text()
}

/// GET /api/events/:id/artists
pub async fn view_event_artists(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<FormatQuery>,
) -> ApiResult<Rendered<AssignmentView<EventArtist>>> {
    let items = assignments::event_artists(&state.db, event_id).await?;
    Ok(Rendered::new(
        query.format,
        AssignmentView::new(event_id, items),
        artists_text,
    ))
}

/// POST /api/events/:id/artists
pub async fn assign_artist(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(input): Json<ArtistAssignment>,
) -> ApiResult<StatusCode> {
    assignments::assign_artist(&state.db, event_id, input).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/events/:id/artists/:artist_id
pub async fn remove_artist(
    State(state): State<AppState>,
    Path((event_id, artist_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    assignments::remove_artist(&state.db, event_id, artist_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Sponsors
// ============================================================================

fn sponsors_text(view: &AssignmentView<EventSponsor>) -> String {
    let rows: Vec<Vec<Value>> = view
        .items
        .iter()
        .map(|s| {
            vec![
                json!(s.sponsor_id),
                json!(s.name),
                json!(s.industry.as_deref().unwrap_or("N/A")),
                json!(s.amount),
            ]
        })
        .collect();

    ReportTable::new(
        format!("Sponsors for Event ID: {}", view.event_id),
        &["sponsor_id", "name", "industry", "amount"],
    )
    .with_rows(rows)
    .with_note(format!("Total Sponsors: {}", view.count))
    .with_note(format!(
        "Total Sponsorship Amount: {}",
        format_currency(view.total_amount.unwrap_or(0.0))
    ))
    .to_text()
}

/// GET /api/events/:id/sponsors
///
/// Largest contribution first; `total_amount` sums every contribution.
pub async fn view_event_sponsors(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<FormatQuery>,
) -> ApiResult<Rendered<AssignmentView<EventSponsor>>> {
    let items = assignments::event_sponsors(&state.db, event_id).await?;
    let total: f64 = items.iter().map(|s| s.amount).sum();

    let mut view = AssignmentView::new(event_id, items);
    view.total_amount = Some(total);
    Ok(Rendered::new(query.format, view, sponsors_text))
}

/// POST /api/events/:id/sponsors
pub async fn assign_sponsor(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(input): Json<SponsorAssignment>,
) -> ApiResult<StatusCode> {
    assignments::assign_sponsor(&state.db, event_id, input).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/events/:id/sponsors/:sponsor_id
pub async fn remove_sponsor(
    State(state): State<AppState>,
    Path((event_id, sponsor_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    assignments::remove_sponsor(&state.db, event_id, sponsor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Staff
// ============================================================================

fn staff_text(view: &AssignmentView<EventStaff>) -> String {
    let rows: Vec<Vec<Value>> = view
        .items
        .iter()
        .map(|s| {
            vec![
                json!(s.staff_id),
                json!(s.name),
                json!(s.role.as_str()),
                json!(s.shift.as_str()),
                json!(s.salary.unwrap_or(0.0)),
            ]
        })
        .collect();

    ReportTable::new(
        format!("Staff for Event ID: {}", view.event_id),
        &["staff_id", "name", "role", "shift", "salary"],
    )
    .with_rows(rows)
    .with_note(format!("Total Staff: {}", view.count))
    .to_text()
}

/// GET /api/events/:id/staff
pub async fn view_event_staff(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<FormatQuery>,
) -> ApiResult<Rendered<AssignmentView<EventStaff>>> {
    let items = assignments::event_staff(&state.db, event_id).await?;
    Ok(Rendered::new(
        query.format,
        AssignmentView::new(event_id, items),
        staff_text,
    ))
}

/// POST /api/events/:id/staff
pub async fn assign_staff(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(input): Json<StaffAssignment>,
) -> ApiResult<StatusCode> {
    assignments::assign_staff(&state.db, event_id, input).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/events/:id/staff/:staff_id
pub async fn remove_staff(
    State(state): State<AppState>,
    Path((event_id, staff_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    assignments::remove_staff(&state.db, event_id, staff_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sponsor_text_fallbacks() {
        let mut view = AssignmentView::new(
            4,
            vec![EventSponsor {
                sponsor_id: 1,
                name: "Acme Bank".to_string(),
                industry: None,
                amount: 2500.0,
            }],
        );
        view.total_amount = Some(2500.0);

        let text = sponsors_text(&view);
        assert!(text.contains("SPONSORS FOR EVENT ID: 4"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Total Sponsors: 1"));
        assert!(text.contains("Total Sponsorship Amount: ₹2,500.00"));
    }

    #[test]
    fn test_empty_artist_view() {
        let view: AssignmentView<EventArtist> = AssignmentView::new(9, Vec::new());
        let text = artists_text(&view);
        assert!(text.contains("ARTISTS FOR EVENT ID: 9"));
        assert!(text.contains("No data found."));
        assert_eq!(view.count, 0);
    }
}
