//! Statistics engine: filtering, summation and per-category grouping.
//!
//! Pure functions over an in-memory expense set. Nothing here touches
//! storage; the facade fetches through the store traits and hands the
//! records in, so every persistence backend shares this one implementation.

use std::collections::HashMap;

use shared::CategoryBreakdownRow;

use crate::domain::models::{CategoryRecord, ExpenseRecord};
use crate::domain::period::DateRange;

/// Raw signed sum of the amounts dated within `range`.
///
/// Returns `0.0` for an empty set. Under the outflow invariant the result is
/// non-positive; the sign is deliberately NOT flipped here - callers that
/// need a user-facing figure take the absolute value themselves.
pub fn sum_in_range(range: &DateRange, expenses: &[ExpenseRecord]) -> f64 {
    expenses
        .iter()
        .filter(|expense| range.contains(expense.date))
        .map(|expense| expense.amount)
        .sum()
}

/// Group the expenses dated within `range` by category and compute each
/// category's share of the total.
///
/// Inner-join semantics: expenses with no category, or whose category id
/// matches none of `categories`, are dropped from the breakdown even though
/// [`sum_in_range`] counts them. Categories with no matching expense are
/// omitted entirely.
///
/// Rows are ordered by descending total; equal totals fall back to category
/// name, ascending.
pub fn breakdown_by_category(
    range: &DateRange,
    expenses: &[ExpenseRecord],
    categories: &[CategoryRecord],
) -> Vec<CategoryBreakdownRow> {
    let by_id: HashMap<i64, &CategoryRecord> =
        categories.iter().map(|category| (category.id, category)).collect();

    let mut sums: HashMap<i64, f64> = HashMap::new();
    for expense in expenses.iter().filter(|e| range.contains(e.date)) {
        if let Some(category_id) = expense.category_id {
            if by_id.contains_key(&category_id) {
                *sums.entry(category_id).or_insert(0.0) += expense.amount;
            }
        }
    }

    let grand_total: f64 = sums.values().map(|sum| sum.abs()).sum();

    let mut rows: Vec<CategoryBreakdownRow> = sums
        .into_iter()
        .map(|(category_id, sum)| {
            let category = by_id[&category_id];
            let total = sum.abs();
            // Guard against division by zero: a breakdown of all-zero
            // amounts reports 0% everywhere instead of NaN
            let percentage = if grand_total > 0.0 {
                round2(total / grand_total * 100.0)
            } else {
                0.0
            };

            CategoryBreakdownRow {
                id: category.id,
                name: category.name.clone(),
                color: category.color.clone(),
                total,
                percentage,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    rows
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
