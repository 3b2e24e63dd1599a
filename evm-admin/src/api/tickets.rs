//! Ticket inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evm_common::api::ApiResult;
use evm_common::models::{Ticket, TicketBatch};
use evm_common::repo::tickets;

use crate::AppState;

/// GET /api/events/:id/tickets
///
/// Every ticket of the event, sold or not, by type then seat.
pub async fn list_tickets(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ApiResult<Json<Vec<Ticket>>> {
    Ok(Json(tickets::list_tickets(&state.db, event_id).await?))
}

/// POST /api/events/:id/tickets
///
/// Issues a batch of seats and returns them.
pub async fn create_tickets(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(batch): Json<TicketBatch>,
) -> ApiResult<(StatusCode, Json<Vec<Ticket>>)> {
    let created = tickets::create_tickets(&state.db, event_id, batch).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/tickets/:id
///
/// Only unsold tickets can be withdrawn; a sold ticket is a 409.
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> ApiResult<StatusCode> {
    tickets::delete_ticket(&state.db, ticket_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
