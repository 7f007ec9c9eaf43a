//! # REST API Interface Layer
//!
//! HTTP endpoints for the expense tracker. This layer handles:
//! - Request/response serialization and deserialization
//! - Period token parsing at the boundary (only the typed [`Period`] enum
//!   reaches the domain layer)
//! - Error translation from domain failures to HTTP status codes
//! - Request logging
//!
//! No business logic lives here; handlers are thin translations onto the
//! domain services.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::domain::period::Period;

pub mod category_apis;
pub mod expense_apis;
pub mod statistics_apis;

pub use category_apis::*;
pub use expense_apis::*;
pub use statistics_apis::*;

/// Query parameters shared by the endpoints that accept a period filter
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

impl PeriodQuery {
    /// Parse the wire token; unknown tokens mean "no filter"
    pub fn to_period(&self) -> Period {
        Period::from_token(self.period.as_deref())
    }
}

/// Health check endpoint
pub async fn ping() -> impl IntoResponse {
    Json(json!({ "message": "pong" }))
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(shared::ErrorResponse::new("Resource not found")),
    )
}
