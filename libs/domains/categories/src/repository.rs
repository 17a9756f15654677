use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::Category;

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category
    async fn create(&self, category: Category) -> CategoryResult<Category>;

    /// Get a category by ID
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// List all categories
    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// Replace an existing category
    async fn update(&self, category: Category) -> CategoryResult<Category>;

    /// Delete a category, returning the removed document when one matched
    async fn delete(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// Check whether a category with this (trimmed) name exists
    async fn exists_by_name(&self, name: &str) -> CategoryResult<bool>;
}
