//! # Storage Module
//!
//! Handles all data persistence operations for the expense tracker backend.
//!
//! The statistics core never talks to SQLite directly: it depends on the
//! fetch traits in [`traits`], which the repositories implement. Swapping the
//! persistence backend therefore never forks the aggregation logic.
//!
//! ## Key Responsibilities
//!
//! - **Connection Management**: SQLite pool creation and lifecycle
//! - **Schema Setup**: Table and index creation, default category seeding
//! - **Repositories**: Row-level access for expenses and categories
//! - **Storage Abstraction**: The fetch contract consumed by the domain layer

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{CategoryRepository, ExpenseRepository};
pub use traits::{CategoryStore, ExpenseStore};
