//! Expense CRUD domain logic for the expense tracker.

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use shared::{CreateExpenseRequest, CreateExpenseResponse, Expense, UpdateExpenseRequest};
use tracing::info;

use crate::domain::models::ExpenseWithCategory;
use crate::domain::period::Period;
use crate::storage::ExpenseRepository;

#[derive(Clone)]
pub struct ExpenseService {
    expense_repository: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(expense_repository: ExpenseRepository) -> Self {
        Self { expense_repository }
    }

    /// List expenses for the given period, newest first, with their category
    /// display fields joined in.
    pub async fn list_expenses(&self, period: Period) -> Result<Vec<Expense>> {
        let range = period.resolve(Local::now().date_naive());
        let rows = self.expense_repository.list(&range).await?;

        Ok(rows.into_iter().map(to_list_dto).collect())
    }

    /// Get a single expense by id. The date stays ISO here so the edit form
    /// can round-trip it.
    pub async fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        Ok(self.expense_repository.get(id).await?.map(to_detail_dto))
    }

    /// Create a new expense. The amount sign is normalized at write time:
    /// positive input is stored as its negative, so every stored expense
    /// carries the outflow sign the statistics engine assumes.
    pub async fn create_expense(
        &self,
        request: CreateExpenseRequest,
    ) -> Result<CreateExpenseResponse> {
        let (amount, date) = validate_input(&request.description, request.amount, &request.date)?;

        let id = self
            .expense_repository
            .create(&request.description, amount, date, request.category_id)
            .await?;

        info!("Created expense {}", id);
        Ok(CreateExpenseResponse {
            id,
            message: "Expense created successfully".to_string(),
        })
    }

    /// Update an existing expense; returns false when the id does not exist.
    /// Sign normalization applies the same way as on create.
    pub async fn update_expense(&self, id: i64, request: UpdateExpenseRequest) -> Result<bool> {
        let (amount, date) = validate_input(&request.description, request.amount, &request.date)?;

        let updated = self
            .expense_repository
            .update(id, &request.description, amount, date, request.category_id)
            .await?;

        if updated {
            info!("Updated expense {}", id);
        }
        Ok(updated)
    }

    /// Delete an expense; returns false when the id does not exist
    pub async fn delete_expense(&self, id: i64) -> Result<bool> {
        let deleted = self.expense_repository.delete(id).await?;

        if deleted {
            info!("Deleted expense {}", id);
        }
        Ok(deleted)
    }
}

fn validate_input(description: &str, amount: f64, date: &str) -> Result<(f64, NaiveDate)> {
    if description.is_empty() || description.len() > 256 {
        return Err(anyhow!("Description must be between 1 and 256 characters"));
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| anyhow!("Date must be in YYYY-MM-DD format"))?;

    // Expenses are outflows: a positive amount is the same expense typed
    // without the minus sign
    let amount = if amount > 0.0 { -amount } else { amount };

    Ok((amount, date))
}

fn to_list_dto(row: ExpenseWithCategory) -> Expense {
    Expense {
        id: row.expense.id,
        description: row.expense.description,
        amount: row.expense.amount,
        date: row.expense.date.format("%d/%m/%Y").to_string(),
        category_id: row.expense.category_id,
        category_name: row.category_name,
        category_color: row.category_color,
    }
}

fn to_detail_dto(row: ExpenseWithCategory) -> Expense {
    Expense {
        id: row.expense.id,
        description: row.expense.description,
        amount: row.expense.amount,
        date: row.expense.date.to_string(),
        category_id: row.expense.category_id,
        category_name: row.category_name,
        category_color: row.category_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use chrono::Duration;

    async fn create_test_service() -> ExpenseService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        ExpenseService::new(ExpenseRepository::new(db))
    }

    fn request(description: &str, amount: f64, date: &str) -> CreateExpenseRequest {
        CreateExpenseRequest {
            description: description.to_string(),
            amount,
            date: date.to_string(),
            category_id: Some(1),
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_positive_amount() {
        let service = create_test_service().await;

        let response = service
            .create_expense(request("Bus ticket", 4.50, "2026-08-01"))
            .await
            .unwrap();

        let stored = service.get_expense(response.id).await.unwrap().unwrap();
        assert_eq!(stored.amount, -4.50);
    }

    #[tokio::test]
    async fn test_create_keeps_negative_amount() {
        let service = create_test_service().await;

        let response = service
            .create_expense(request("Groceries", -80.0, "2026-08-01"))
            .await
            .unwrap();

        let stored = service.get_expense(response.id).await.unwrap().unwrap();
        assert_eq!(stored.amount, -80.0);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_description() {
        let service = create_test_service().await;

        let result = service
            .create_expense(request("", 10.0, "2026-08-01"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_description() {
        let service = create_test_service().await;

        let result = service
            .create_expense(request(&"x".repeat(257), 10.0, "2026-08-01"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_date() {
        let service = create_test_service().await;

        let result = service
            .create_expense(request("Groceries", 10.0, "01/08/2026"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_formats_dates_for_display() {
        let service = create_test_service().await;

        service
            .create_expense(request("Groceries", 10.0, "2026-08-01"))
            .await
            .unwrap();

        let expenses = service.list_expenses(Period::AllTime).await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].date, "01/08/2026");
        assert_eq!(expenses[0].category_name.as_deref(), Some("Alimentação"));
    }

    #[tokio::test]
    async fn test_get_returns_iso_date_for_editing() {
        let service = create_test_service().await;

        let response = service
            .create_expense(request("Groceries", 10.0, "2026-08-01"))
            .await
            .unwrap();

        let stored = service.get_expense(response.id).await.unwrap().unwrap();
        assert_eq!(stored.date, "2026-08-01");
    }

    #[tokio::test]
    async fn test_list_applies_period_filter() {
        let service = create_test_service().await;
        let today = Local::now().date_naive();
        let last_month = today - Duration::days(40);

        service
            .create_expense(request("Recent", 10.0, &today.to_string()))
            .await
            .unwrap();
        service
            .create_expense(request("Old", 20.0, &last_month.to_string()))
            .await
            .unwrap();

        let weekly = service.list_expenses(Period::Weekly).await.unwrap();
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].description, "Recent");

        let all = service.list_expenses(Period::AllTime).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_expense_returns_false() {
        let service = create_test_service().await;

        let updated = service
            .update_expense(
                9999,
                UpdateExpenseRequest {
                    description: "Nothing".to_string(),
                    amount: 1.0,
                    date: "2026-08-01".to_string(),
                    category_id: None,
                },
            )
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_update_normalizes_amount() {
        let service = create_test_service().await;

        let response = service
            .create_expense(request("Groceries", 10.0, "2026-08-01"))
            .await
            .unwrap();

        let updated = service
            .update_expense(
                response.id,
                UpdateExpenseRequest {
                    description: "Groceries".to_string(),
                    amount: 25.0,
                    date: "2026-08-02".to_string(),
                    category_id: Some(2),
                },
            )
            .await
            .unwrap();
        assert!(updated);

        let stored = service.get_expense(response.id).await.unwrap().unwrap();
        assert_eq!(stored.amount, -25.0);
        assert_eq!(stored.date, "2026-08-02");
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let service = create_test_service().await;

        let response = service
            .create_expense(request("Doomed", 10.0, "2026-08-01"))
            .await
            .unwrap();

        assert!(service.delete_expense(response.id).await.unwrap());
        assert!(service.get_expense(response.id).await.unwrap().is_none());
        assert!(!service.delete_expense(response.id).await.unwrap());
    }
}
