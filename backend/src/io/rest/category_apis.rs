//! # REST API for Categories
//!
//! Read-only endpoints for the category reference data.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::ErrorResponse;

/// List all categories
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/categories");

    match state.category_service.list_categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => {
            error!("Failed to list categories: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error listing categories")),
            )
                .into_response()
        }
    }
}

/// Get a single category by id
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/categories/{}", id);

    match state.category_service.get_category(id).await {
        Ok(Some(category)) => (StatusCode::OK, Json(category)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Category not found")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get category {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error retrieving category")),
            )
                .into_response()
        }
    }
}
