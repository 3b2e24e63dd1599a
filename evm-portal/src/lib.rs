//! evm-portal library - customer portal service
//!
//! Attendees register or log in, browse upcoming events and book tickets.
//! Browsing is public; ticket lists and bookings need a session token.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod session;

use session::SessionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Logged-in attendees keyed by session token
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(db: SqlitePool, session_ttl_minutes: u64) -> Self {
        Self {
            db,
            sessions: SessionStore::new(session_ttl_minutes),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // UI routes
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        // Account
        .route("/api/attendees", post(api::register))
        .route(
            "/api/session",
            post(api::login).get(api::whoami).delete(api::logout),
        )
        // Browsing
        .route("/api/events", get(api::list_events))
        .route("/api/events/:id", get(api::get_event_details))
        // Tickets
        .route("/api/events/:id/tickets", get(api::available_tickets))
        .route("/api/tickets/:id/book", post(api::book_ticket))
        .route("/api/me/tickets", get(api::my_tickets))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
