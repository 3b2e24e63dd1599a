//! Shared request/response types

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// GET /health payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// Response body format selected by `?format=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Query string carrying the optional `format` switch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Either a JSON value or its fixed-width text rendering
pub enum Rendered<T> {
    Json(T),
    Text(String),
}

impl<T: Serialize> Rendered<T> {
    /// Pick the representation; `text` is only evaluated when asked for
    pub fn new(format: OutputFormat, value: T, text: impl FnOnce(&T) -> String) -> Self {
        match format {
            OutputFormat::Json => Rendered::Json(value),
            OutputFormat::Text => Rendered::Text(text(&value)),
        }
    }
}

impl<T: Serialize> IntoResponse for Rendered<T> {
    fn into_response(self) -> Response {
        match self {
            Rendered::Json(value) => Json(value).into_response(),
            Rendered::Text(text) => (
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                text,
            )
                .into_response(),
        }
    }
}
