//! Wire types shared between the expense tracker backend and its clients.

use serde::{Deserialize, Serialize};

/// An expense as returned by the listing and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Description of the expense (max 256 characters)
    pub description: String,
    /// Stored amount; negative for every expense (the sign encodes "outflow")
    pub amount: f64,
    /// `DD/MM/YYYY` in listings, ISO `YYYY-MM-DD` in the detail endpoint so
    /// the edit form can round-trip it
    pub date: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

/// A spending category. Referenced by expenses, never embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Display color as a hex string, e.g. "#FF5733"
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    /// Positive input is normalized to a negative stored amount
    pub amount: f64,
    /// ISO calendar date, `YYYY-MM-DD`
    pub date: String,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub description: String,
    pub amount: f64,
    /// ISO calendar date, `YYYY-MM-DD`
    pub date: String,
    pub category_id: Option<i64>,
}

/// Response after creating an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    pub id: i64,
    pub message: String,
}

/// Generic success message body for update/delete responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Generic error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response body for the statistics total endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalResponse {
    /// Total spent in the window, always reported as a non-negative figure
    pub total: f64,
}

/// One row of the per-category spending breakdown.
///
/// Derived, never persisted; recomputed on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdownRow {
    pub id: i64,
    pub name: String,
    pub color: String,
    /// Absolute value of the summed amounts for this category in the window
    pub total: f64,
    /// Share of the breakdown total, 0-100, rounded to 2 decimal places
    pub percentage: f64,
}
