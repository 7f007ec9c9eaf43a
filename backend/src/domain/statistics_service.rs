//! Statistics facade: resolves the period, fetches, and aggregates.

use chrono::{Local, NaiveDate};
use shared::{CategoryBreakdownRow, TotalResponse};
use thiserror::Error;
use tracing::info;

use crate::domain::aggregation;
use crate::domain::period::Period;
use crate::storage::{CategoryStore, ExpenseStore};

/// Failures the statistics operations can surface.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The expense or category store could not be reached. No retry is
    /// attempted here; retry policy belongs to the caller.
    #[error("upstream store unavailable: {0}")]
    UpstreamUnavailable(#[source] anyhow::Error),
}

/// Coordination layer over the period resolver and the aggregation engine.
///
/// Holds no state beyond the injected store handles; every call is computed
/// fresh against the current store contents.
#[derive(Clone)]
pub struct StatisticsService<E, C> {
    expense_store: E,
    category_store: C,
}

impl<E: ExpenseStore, C: CategoryStore> StatisticsService<E, C> {
    pub fn new(expense_store: E, category_store: C) -> Self {
        Self {
            expense_store,
            category_store,
        }
    }

    /// Total spent in the period, reported as a non-negative figure.
    pub async fn get_total(&self, period: Period) -> Result<TotalResponse, StatsError> {
        self.get_total_at(period, Local::now().date_naive()).await
    }

    /// Per-category breakdown of the spending in the period.
    pub async fn get_breakdown(
        &self,
        period: Period,
    ) -> Result<Vec<CategoryBreakdownRow>, StatsError> {
        self.get_breakdown_at(period, Local::now().date_naive())
            .await
    }

    /// Variant of [`Self::get_total`] anchored on an explicit date.
    pub(crate) async fn get_total_at(
        &self,
        period: Period,
        now: NaiveDate,
    ) -> Result<TotalResponse, StatsError> {
        let range = period.resolve(now);
        let expenses = self
            .expense_store
            .fetch_expenses(&range)
            .await
            .map_err(StatsError::UpstreamUnavailable)?;

        // Raw sums are non-positive under the outflow invariant; flip the
        // sign for the user-facing figure
        let total = aggregation::sum_in_range(&range, &expenses).abs();

        info!("Computed total {:.2} over {} expenses", total, expenses.len());
        Ok(TotalResponse { total })
    }

    /// Variant of [`Self::get_breakdown`] anchored on an explicit date.
    pub(crate) async fn get_breakdown_at(
        &self,
        period: Period,
        now: NaiveDate,
    ) -> Result<Vec<CategoryBreakdownRow>, StatsError> {
        let range = period.resolve(now);
        let expenses = self
            .expense_store
            .fetch_expenses(&range)
            .await
            .map_err(StatsError::UpstreamUnavailable)?;
        let categories = self
            .category_store
            .fetch_categories()
            .await
            .map_err(StatsError::UpstreamUnavailable)?;

        Ok(aggregation::breakdown_by_category(
            &range, &expenses, &categories,
        ))
    }
}
