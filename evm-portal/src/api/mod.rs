//! HTTP API handlers for evm-portal

pub mod account;
pub mod buildinfo;
pub mod events;
pub mod health;
pub mod tickets;
pub mod ui;

pub use account::{login, logout, register, whoami};
pub use buildinfo::get_build_info;
pub use events::{get_event_details, list_events};
pub use health::health_routes;
pub use tickets::{available_tickets, book_ticket, my_tickets};
pub use ui::{serve_app_js, serve_index};
