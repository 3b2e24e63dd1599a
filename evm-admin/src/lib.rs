//! evm-admin library - administrator dashboard service
//!
//! JSON API over the event-management database plus a static browser UI.
//! Every `/api/*` route sits behind the optional admin bearer token;
//! `/health` and the UI assets are public.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Bearer token required on `/api/*`; `None` leaves the API open
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(db: SqlitePool, admin_token: Option<String>) -> Self {
        Self {
            db,
            admin_token: admin_token.map(Arc::from),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get};

    let protected = Router::new()
        .route("/api/dashboard", get(api::get_dashboard))
        // Events
        .route("/api/events", get(api::list_events).post(api::create_event))
        .route(
            "/api/events/:id",
            get(api::get_event).put(api::update_event).delete(api::delete_event),
        )
        // Venues
        .route("/api/venues", get(api::list_venues).post(api::create_venue))
        .route(
            "/api/venues/:id",
            get(api::get_venue).put(api::update_venue).delete(api::delete_venue),
        )
        // Artists
        .route("/api/artists", get(api::list_artists).post(api::create_artist))
        .route(
            "/api/artists/:id",
            get(api::get_artist).put(api::update_artist).delete(api::delete_artist),
        )
        // Sponsors
        .route("/api/sponsors", get(api::list_sponsors).post(api::create_sponsor))
        .route(
            "/api/sponsors/:id",
            get(api::get_sponsor).put(api::update_sponsor).delete(api::delete_sponsor),
        )
        // Staff
        .route("/api/staff", get(api::list_staff).post(api::create_staff))
        .route(
            "/api/staff/:id",
            get(api::get_staff).put(api::update_staff).delete(api::delete_staff),
        )
        // Event assignments
        .route(
            "/api/events/:id/artists",
            get(api::view_event_artists).post(api::assign_artist),
        )
        .route("/api/events/:id/artists/:artist_id", delete(api::remove_artist))
        .route(
            "/api/events/:id/sponsors",
            get(api::view_event_sponsors).post(api::assign_sponsor),
        )
        .route("/api/events/:id/sponsors/:sponsor_id", delete(api::remove_sponsor))
        .route(
            "/api/events/:id/staff",
            get(api::view_event_staff).post(api::assign_staff),
        )
        .route("/api/events/:id/staff/:staff_id", delete(api::remove_staff))
        // Tickets
        .route(
            "/api/events/:id/tickets",
            get(api::list_tickets).post(api::create_tickets),
        )
        .route("/api/tickets/:id", delete(api::delete_ticket))
        // Reports and analytics
        .route("/api/reports", get(api::list_reports))
        .route("/api/reports/:slug", get(api::run_report))
        .route("/api/events/:id/analytics/:kind", get(api::event_analytics))
        .route("/api/events/:id/metrics/:metric", get(api::event_metric))
        .route("/api/buildinfo", get(api::get_build_info))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_admin_token,
        ));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
