//! HTTP API handlers for evm-admin

pub mod analytics;
pub mod artists;
pub mod assignments;
pub mod auth;
pub mod buildinfo;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod reports;
pub mod sponsors;
pub mod staff;
pub mod tickets;
pub mod ui;
pub mod venues;

pub use analytics::{event_analytics, event_metric};
pub use artists::{create_artist, delete_artist, get_artist, list_artists, update_artist};
pub use assignments::{
    assign_artist, assign_sponsor, assign_staff, remove_artist, remove_sponsor, remove_staff,
    view_event_artists, view_event_sponsors, view_event_staff,
};
pub use auth::require_admin_token;
pub use buildinfo::get_build_info;
pub use dashboard::get_dashboard;
pub use events::{create_event, delete_event, get_event, list_events, update_event};
pub use health::health_routes;
pub use reports::{list_reports, run_report};
pub use sponsors::{create_sponsor, delete_sponsor, get_sponsor, list_sponsors, update_sponsor};
pub use staff::{create_staff, delete_staff, get_staff, list_staff, update_staff};
pub use tickets::{create_tickets, delete_ticket, list_tickets};
pub use ui::{serve_app_js, serve_index};
pub use venues::{create_venue, delete_venue, get_venue, list_venues, update_venue};

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body returned by every create endpoint
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

pub(crate) fn created(id: i64) -> (StatusCode, Json<Created>) {
    (StatusCode::CREATED, Json(Created { id }))
}
