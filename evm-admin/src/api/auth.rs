//! Admin bearer-token middleware
//!
//! When an admin token is configured, every `/api/*` request must carry
//! `Authorization: Bearer <token>`. Without a configured token the API is open
//! (local, single-operator use).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use evm_common::api::{request_token, ApiError};
use tracing::warn;

use crate::AppState;

/// Authentication middleware for protected routes
pub async fn require_admin_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let rejection = match request_token(request.headers()) {
        Some(token) if token == expected => None,
        Some(_) => Some("Invalid admin token"),
        None => Some("Missing Authorization: Bearer token"),
    };

    match rejection {
        None => Ok(next.run(request).await),
        Some(reason) => {
            warn!("Rejected admin request to {}: {}", request.uri().path(), reason);
            Err(ApiError::Unauthorized(reason.to_string()))
        }
    }
}
