//! Registration, login and session endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use evm_common::api::{request_token, ApiError, ApiResult};
use evm_common::models::{Attendee, AttendeeInput};
use evm_common::repo::attendees;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::session::Session;
use crate::AppState;

/// Returned whenever a session is opened
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub attendee_id: i64,
    pub name: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionResponse {
    fn new(token: Uuid, session: Session) -> Self {
        Self {
            token,
            attendee_id: session.attendee_id,
            name: session.name,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub attendee_id: i64,
    pub email: String,
}

/// Resolve the request's bearer token to a live session
pub(crate) async fn current_session(
    state: &AppState,
    headers: &HeaderMap,
) -> ApiResult<(Uuid, Session)> {
    let token = request_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Please log in first".to_string()))?;
    let token = Uuid::parse_str(token)
        .map_err(|_| ApiError::Unauthorized("Invalid session token".to_string()))?;

    let session = state.sessions.get(&token).await.ok_or_else(|| {
        ApiError::Unauthorized("Session expired, please log in again".to_string())
    })?;
    Ok((token, session))
}

/// POST /api/attendees
///
/// Registers a new attendee and logs them straight in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<AttendeeInput>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let attendee_id = attendees::register_attendee(&state.db, input).await?;
    let attendee = attendees::get_attendee(&state.db, attendee_id).await?;

    let (token, session) = state.sessions.create(attendee_id, &attendee.name).await;
    Ok((StatusCode::CREATED, Json(SessionResponse::new(token, session))))
}

/// POST /api/session
///
/// Log in with attendee id and email (case-insensitive).
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let Some(attendee) =
        attendees::find_for_login(&state.db, request.attendee_id, &request.email).await?
    else {
        warn!("Failed login for attendee {}", request.attendee_id);
        return Err(ApiError::Unauthorized(
            "Attendee ID and email do not match".to_string(),
        ));
    };

    let (token, session) = state.sessions.create(attendee.attendee_id, &attendee.name).await;
    info!("Attendee {} logged in", attendee.attendee_id);
    Ok(Json(SessionResponse::new(token, session)))
}

/// GET /api/session
pub async fn whoami(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Attendee>> {
    let (_, session) = current_session(&state, &headers).await?;
    Ok(Json(attendees::get_attendee(&state.db, session.attendee_id).await?))
}

/// DELETE /api/session
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let (token, session) = current_session(&state, &headers).await?;
    state.sessions.remove(&token).await;
    info!("Attendee {} logged out", session.attendee_id);
    Ok(StatusCode::NO_CONTENT)
}
