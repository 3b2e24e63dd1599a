//! HTTP API types shared by the admin and portal services
//!
//! This module holds only what both axum services need identically: the
//! error-to-response mapping, bearer-token parsing, the health payload and
//! the `?format=` switch.
//! Routers, handlers and middleware live in each service crate.

pub mod auth;
pub mod error;
pub mod types;

pub use auth::{bearer_token, request_token};
pub use error::{ApiError, ApiResult};
pub use types::{FormatQuery, HealthResponse, OutputFormat, Rendered};
