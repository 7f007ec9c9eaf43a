use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::CategoryRecord;
use crate::storage::connection::DbConnection;
use crate::storage::traits::CategoryStore;

/// Repository for category operations
#[derive(Clone)]
pub struct CategoryRepository {
    db: DbConnection,
}

impl CategoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryRecord>> {
        let rows = sqlx::query("SELECT id, name, color FROM categories ORDER BY name")
            .fetch_all(self.db.pool())
            .await?;

        let categories = rows
            .iter()
            .map(|row| CategoryRecord {
                id: row.get("id"),
                name: row.get("name"),
                color: row.get("color"),
            })
            .collect();

        Ok(categories)
    }

    /// Get a single category by id
    pub async fn get(&self, id: i64) -> Result<Option<CategoryRecord>> {
        let row = sqlx::query("SELECT id, name, color FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(CategoryRecord {
                id: r.get("id"),
                name: r.get("name"),
                color: r.get("color"),
            })),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>> {
        self.list().await
    }
}
