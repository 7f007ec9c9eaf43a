//! Category read service. Categories are reference data: expenses point at
//! them by id, and this service only exposes lookups.

use anyhow::Result;
use shared::Category;

use crate::domain::models::CategoryRecord;
use crate::storage::CategoryRepository;

#[derive(Clone)]
pub struct CategoryService {
    category_repository: CategoryRepository,
}

impl CategoryService {
    pub fn new(category_repository: CategoryRepository) -> Self {
        Self {
            category_repository,
        }
    }

    /// List all categories ordered by name
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = self.category_repository.list().await?;
        Ok(categories.into_iter().map(to_dto).collect())
    }

    /// Get a single category by id
    pub async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        Ok(self.category_repository.get(id).await?.map(to_dto))
    }
}

fn to_dto(record: CategoryRecord) -> Category {
    Category {
        id: record.id,
        name: record.name,
        color: record.color,
    }
}
