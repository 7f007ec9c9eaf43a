//! Abstract fetch contract the statistics core depends on.
//!
//! The aggregation logic is defined purely over a logical record set; these
//! traits are the only storage surface it sees.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{CategoryRecord, ExpenseRecord};
use crate::domain::period::DateRange;

/// Read access to the stored expense set.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Fetch every expense whose date lies within `range`.
    ///
    /// Contract: every expense in range is returned, none outside it, and
    /// there are no duplicates. The implementation may push the filter into
    /// the query or filter in memory.
    async fn fetch_expenses(&self, range: &DateRange) -> Result<Vec<ExpenseRecord>>;
}

/// Read access to the stored category set.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>>;
}
