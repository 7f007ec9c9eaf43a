use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::{ExpenseRecord, ExpenseWithCategory};
use crate::domain::period::DateRange;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ExpenseStore;

/// Repository for expense operations
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List expenses within `range` together with their category name and
    /// color (LEFT JOIN: uncategorized expenses are included), newest first.
    pub async fn list(&self, range: &DateRange) -> Result<Vec<ExpenseWithCategory>> {
        let mut sql = String::from(
            "SELECT e.id, e.description, e.amount, e.date, e.category_id, \
                    c.name AS category_name, c.color AS category_color \
             FROM expenses e \
             LEFT JOIN categories c ON e.category_id = c.id",
        );
        sql.push_str(&range_where_clause(range, "e.date"));
        sql.push_str(" ORDER BY e.date DESC");

        let query = bind_range(sqlx::query(&sql), range);
        let rows = query.fetch_all(self.db.pool()).await?;

        rows.iter()
            .map(|row| {
                Ok(ExpenseWithCategory {
                    expense: expense_from_row(row)?,
                    category_name: row.get("category_name"),
                    category_color: row.get("category_color"),
                })
            })
            .collect()
    }

    /// Get a single expense by id with its category name and color
    pub async fn get(&self, id: i64) -> Result<Option<ExpenseWithCategory>> {
        let row = sqlx::query(
            r#"
            SELECT e.id, e.description, e.amount, e.date, e.category_id,
                   c.name AS category_name, c.color AS category_color
            FROM expenses e
            LEFT JOIN categories c ON e.category_id = c.id
            WHERE e.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(ExpenseWithCategory {
                expense: expense_from_row(&r)?,
                category_name: r.get("category_name"),
                category_color: r.get("category_color"),
            })),
            None => Ok(None),
        }
    }

    /// Insert a new expense and return its id
    pub async fn create(
        &self,
        description: &str,
        amount: f64,
        date: NaiveDate,
        category_id: Option<i64>,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (description, amount, date, category_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(description)
        .bind(amount)
        .bind(date.to_string())
        .bind(category_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Update an existing expense; returns false when the id does not exist
    pub async fn update(
        &self,
        id: i64,
        description: &str,
        amount: f64,
        date: NaiveDate,
        category_id: Option<i64>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET description = ?, amount = ?, date = ?, category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(description)
        .bind(amount)
        .bind(date.to_string())
        .bind(category_id)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an expense by id; returns false when the id does not exist
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn fetch_expenses(&self, range: &DateRange) -> Result<Vec<ExpenseRecord>> {
        let mut sql = String::from("SELECT id, description, amount, date, category_id FROM expenses");
        sql.push_str(&range_where_clause(range, "date"));

        let query = bind_range(sqlx::query(&sql), range);
        let rows = query.fetch_all(self.db.pool()).await?;

        rows.iter().map(expense_from_row).collect()
    }
}

// Dates are stored as zero-padded ISO-8601 text, so lexicographic SQL
// comparison matches calendar order.
fn range_where_clause(range: &DateRange, column: &str) -> String {
    let mut clauses = Vec::new();
    if range.start.is_some() {
        clauses.push(format!("{} >= ?", column));
    }
    if range.end.is_some() {
        clauses.push(format!("{} <= ?", column));
    }

    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

fn bind_range<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    range: &DateRange,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    if let Some(start) = range.start {
        query = query.bind(start.to_string());
    }
    if let Some(end) = range.end {
        query = query.bind(end.to_string());
    }
    query
}

fn expense_from_row(row: &SqliteRow) -> Result<ExpenseRecord> {
    let date_text: String = row.get("date");
    let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
        .with_context(|| format!("invalid date stored for expense: {}", date_text))?;

    Ok(ExpenseRecord {
        id: row.get("id"),
        description: row.get("description"),
        amount: row.get("amount"),
        date,
        category_id: row.get("category_id"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> ExpenseRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        ExpenseRepository::new(db)
    }

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid test date")
    }

    #[tokio::test]
    async fn test_create_and_get_expense() {
        let repo = setup_test().await;

        let id = repo
            .create("Supermarket", -82.40, date("2026-08-01"), Some(1))
            .await
            .expect("Failed to create expense");

        let found = repo.get(id).await.expect("Failed to get expense");
        assert!(found.is_some());

        let found = found.unwrap();
        assert_eq!(found.expense.description, "Supermarket");
        assert_eq!(found.expense.amount, -82.40);
        assert_eq!(found.expense.date, date("2026-08-01"));
        assert_eq!(found.expense.category_id, Some(1));
        // Category 1 is seeded
        assert_eq!(found.category_name.as_deref(), Some("Alimentação"));
        assert_eq!(found.category_color.as_deref(), Some("#FF5733"));
    }

    #[tokio::test]
    async fn test_get_missing_expense() {
        let repo = setup_test().await;

        let found = repo.get(9999).await.expect("Failed to query expense");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let repo = setup_test().await;

        repo.create("Older", -10.0, date("2026-08-01"), Some(1))
            .await
            .unwrap();
        repo.create("Newer", -20.0, date("2026-08-05"), Some(1))
            .await
            .unwrap();

        let rows = repo.list(&DateRange::unbounded()).await.expect("Failed to list");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].expense.description, "Newer");
        assert_eq!(rows[1].expense.description, "Older");
    }

    #[tokio::test]
    async fn test_list_keeps_uncategorized_expenses() {
        let repo = setup_test().await;

        repo.create("No category", -5.0, date("2026-08-01"), None)
            .await
            .unwrap();

        let rows = repo.list(&DateRange::unbounded()).await.expect("Failed to list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expense.category_id, None);
        assert_eq!(rows[0].category_name, None);
        assert_eq!(rows[0].category_color, None);
    }

    #[tokio::test]
    async fn test_dangling_category_reference_in_list() {
        let repo = setup_test().await;

        // Reference a category id that does not exist
        repo.create("Dangling", -5.0, date("2026-08-01"), Some(9999))
            .await
            .unwrap();

        let rows = repo.list(&DateRange::unbounded()).await.expect("Failed to list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expense.category_id, Some(9999));
        assert_eq!(rows[0].category_name, None);
    }

    #[tokio::test]
    async fn test_fetch_expenses_respects_range() {
        let repo = setup_test().await;

        repo.create("Inside", -10.0, date("2026-08-03"), Some(1))
            .await
            .unwrap();
        repo.create("Before", -20.0, date("2026-07-20"), Some(1))
            .await
            .unwrap();
        repo.create("After", -30.0, date("2026-08-10"), Some(1))
            .await
            .unwrap();

        let range = DateRange::bounded(date("2026-08-01"), date("2026-08-07"));
        let expenses = repo.fetch_expenses(&range).await.expect("Failed to fetch");

        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "Inside");
    }

    #[tokio::test]
    async fn test_fetch_expenses_includes_range_bounds() {
        let repo = setup_test().await;

        repo.create("On start", -10.0, date("2026-08-01"), Some(1))
            .await
            .unwrap();
        repo.create("On end", -20.0, date("2026-08-07"), Some(1))
            .await
            .unwrap();

        let range = DateRange::bounded(date("2026-08-01"), date("2026-08-07"));
        let expenses = repo.fetch_expenses(&range).await.expect("Failed to fetch");

        assert_eq!(expenses.len(), 2, "Both bounds are inclusive");
    }

    #[tokio::test]
    async fn test_fetch_expenses_unbounded_returns_everything() {
        let repo = setup_test().await;

        repo.create("Ancient", -10.0, date("1999-01-01"), None)
            .await
            .unwrap();
        repo.create("Recent", -20.0, date("2026-08-05"), Some(1))
            .await
            .unwrap();

        let expenses = repo
            .fetch_expenses(&DateRange::unbounded())
            .await
            .expect("Failed to fetch");
        assert_eq!(expenses.len(), 2);
    }

    #[tokio::test]
    async fn test_update_expense() {
        let repo = setup_test().await;

        let id = repo
            .create("Original", -10.0, date("2026-08-01"), Some(1))
            .await
            .unwrap();

        let updated = repo
            .update(id, "Changed", -15.0, date("2026-08-02"), Some(2))
            .await
            .expect("Failed to update");
        assert!(updated);

        let found = repo.get(id).await.unwrap().unwrap();
        assert_eq!(found.expense.description, "Changed");
        assert_eq!(found.expense.amount, -15.0);
        assert_eq!(found.expense.date, date("2026-08-02"));
        assert_eq!(found.expense.category_id, Some(2));
    }

    #[tokio::test]
    async fn test_update_missing_expense_returns_false() {
        let repo = setup_test().await;

        let updated = repo
            .update(9999, "Nothing", -1.0, date("2026-08-01"), None)
            .await
            .expect("Failed to run update");
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let repo = setup_test().await;

        let id = repo
            .create("Doomed", -10.0, date("2026-08-01"), None)
            .await
            .unwrap();

        assert!(repo.delete(id).await.expect("Failed to delete"));
        assert!(repo.get(id).await.unwrap().is_none());

        // Deleting again reports not-found
        assert!(!repo.delete(id).await.expect("Failed to re-delete"));
    }
}
