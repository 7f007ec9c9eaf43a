//! # REST API for Statistics
//!
//! Endpoints exposing the time-windowed spending aggregates.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::io::rest::PeriodQuery;
use crate::AppState;
use shared::ErrorResponse;

/// Total spent in the requested period
pub async fn get_statistics_total(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    info!("GET /api/statistics/total - query: {:?}", query);

    match state.statistics_service.get_total(query.to_period()).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to compute total: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Statistics store unavailable")),
            )
                .into_response()
        }
    }
}

/// Per-category breakdown of the spending in the requested period
pub async fn get_statistics_by_category(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    info!("GET /api/statistics/by-category - query: {:?}", query);

    match state
        .statistics_service
        .get_breakdown(query.to_period())
        .await
    {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => {
            error!("Failed to compute breakdown: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Statistics store unavailable")),
            )
                .into_response()
        }
    }
}
