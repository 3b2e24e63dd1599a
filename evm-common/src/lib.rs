//! # EVM Common Library
//!
//! Shared code for both event-management services:
//! - Database schema, initialization and repositories
//! - Entity models and form validation
//! - Reports, per-event analytics and quick metrics
//! - Text rendering of report tables
//! - Bootstrap configuration loading
//! - HTTP error type used by the admin dashboard and customer portal

pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod repo;

pub use error::{Error, Result};
