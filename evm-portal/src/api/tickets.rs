//! Ticket browsing and booking (login required)

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use evm_common::api::ApiResult;
use evm_common::models::{PurchasedTicket, Ticket};
use evm_common::repo::tickets;

use super::account::current_session;
use crate::AppState;

/// GET /api/events/:id/tickets
pub async fn available_tickets(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Ticket>>> {
    current_session(&state, &headers).await?;
    Ok(Json(tickets::available_tickets(&state.db, event_id).await?))
}

/// POST /api/tickets/:id/book
///
/// 409 if someone else bought the seat first or the event is closed.
pub async fn book_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<(StatusCode, Json<PurchasedTicket>)> {
    let (_, session) = current_session(&state, &headers).await?;
    let purchased = tickets::purchase_ticket(&state.db, session.attendee_id, ticket_id).await?;
    Ok((StatusCode::CREATED, Json(purchased)))
}

/// GET /api/me/tickets
pub async fn my_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<PurchasedTicket>>> {
    let (_, session) = current_session(&state, &headers).await?;
    Ok(Json(tickets::tickets_for_attendee(&state.db, session.attendee_id).await?))
}
