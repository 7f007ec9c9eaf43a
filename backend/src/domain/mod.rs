//! # Domain Module
//!
//! Contains all business logic for the expense tracker backend.
//!
//! ## Module Organization
//!
//! - **period**: Named reporting periods and their resolution to date ranges
//! - **aggregation**: The statistics engine; pure functions over an expense set
//! - **statistics_service**: Facade orchestrating period resolution and aggregation
//! - **expense_service**: Expense CRUD operations and input validation
//! - **category_service**: Read access to the category reference data
//! - **models**: Domain records shared between storage and the engine
//!
//! ## Business Rules
//!
//! - Expense amounts are stored as negative magnitudes; positive input is
//!   normalized at write time
//! - Statistics are recomputed on every call; nothing is cached
//! - An unrecognized period token means "no filter", never an error

pub mod aggregation;
pub mod category_service;
pub mod expense_service;
pub mod models;
pub mod period;
pub mod statistics_service;

pub use category_service::CategoryService;
pub use expense_service::ExpenseService;
pub use statistics_service::{StatisticsService, StatsError};
