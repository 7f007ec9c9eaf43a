use chrono::NaiveDate;

/// A stored expense row.
///
/// `amount` is negative for every expense; the sign encodes "outflow" and is
/// normalized at write time by the expense service. The aggregation engine
/// relies on this invariant and treats raw sums as non-positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    /// Weak reference; may be `None` or point at a deleted category
    pub category_id: Option<i64>,
}

/// An expense joined with its category's display fields, as produced by the
/// listing and detail queries.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseWithCategory {
    pub expense: ExpenseRecord,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}
