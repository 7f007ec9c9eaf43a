//! # REST API for Expenses
//!
//! Endpoints for listing, creating, updating and deleting expenses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::io::rest::PeriodQuery;
use crate::AppState;
use shared::{CreateExpenseRequest, ErrorResponse, MessageResponse, UpdateExpenseRequest};

/// List expenses with an optional period filter
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    info!("GET /api/expenses - query: {:?}", query);

    match state.expense_service.list_expenses(query.to_period()).await {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => {
            error!("Failed to list expenses: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error listing expenses")),
            )
                .into_response()
        }
    }
}

/// Get a single expense by id
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/expenses/{}", id);

    match state.expense_service.get_expense(id).await {
        Ok(Some(expense)) => (StatusCode::OK, Json(expense)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Expense not found")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get expense {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error retrieving expense")),
            )
                .into_response()
        }
    }
}

/// Create a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - request: {:?}", request);

    match state.expense_service.create_expense(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create expense: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Update an existing expense
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/{} - request: {:?}", id, request);

    match state.expense_service.update_expense(id, request).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse::new("Expense updated successfully")),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Expense not found")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update expense {}: {}", id, e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", id);

    match state.expense_service.delete_expense(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse::new("Expense deleted successfully")),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Expense not found")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete expense {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error deleting expense")),
            )
                .into_response()
        }
    }
}
