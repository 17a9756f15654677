//! Category Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Category service providing business logic operations
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Create a new CategoryService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new category
    #[instrument(skip(self, input))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CategoryError::Validation(
                "Please enter a category name".to_string(),
            ));
        }

        if self.repository.exists_by_name(name).await? {
            return Err(CategoryError::Duplicate);
        }

        self.repository.create(Category::new(name)).await
    }

    /// Rename an existing category
    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CategoryError::Validation(
                "Please enter a category name".to_string(),
            ));
        }

        let mut category = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound)?;

        category.rename(name);

        self.repository.update(category).await
    }

    /// Delete a category
    ///
    /// Succeeds regardless of whether the id matched; the removed document
    /// (or None) is handed back to the caller.
    #[instrument(skip(self))]
    pub async fn remove_category(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        self.repository.delete(id).await
    }

    /// List all categories
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list().await
    }

    /// Get a category by ID
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound)
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCategoryRepository;

    #[tokio::test]
    async fn test_create_category_rejects_blank_name() {
        let repo = MockCategoryRepository::new();
        let service = CategoryService::new(repo);

        let result = service
            .create_category(CreateCategory {
                name: "   ".to_string(),
            })
            .await;

        match result {
            Err(CategoryError::Validation(msg)) => {
                assert_eq!(msg, "Please enter a category name");
            }
            other => panic!("expected validation error, got {:?}", other.map(|c| c.name)),
        }
    }

    #[tokio::test]
    async fn test_create_category_rejects_duplicate_name() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_exists_by_name()
            .withf(|name| name == "Electronics")
            .returning(|_| Ok(true));
        // no create expectation: a duplicate must insert nothing

        let service = CategoryService::new(repo);
        let result = service
            .create_category(CreateCategory {
                name: "Electronics".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CategoryError::Duplicate)));
    }

    #[tokio::test]
    async fn test_create_category_trims_name() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_exists_by_name().returning(|_| Ok(false));
        repo.expect_create().returning(Ok);

        let service = CategoryService::new(repo);
        let category = service
            .create_category(CreateCategory {
                name: "  Books ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(category.name, "Books");
    }

    #[tokio::test]
    async fn test_update_category_missing_id_is_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = CategoryService::new(repo);
        let result = service
            .update_category(
                Uuid::now_v7(),
                UpdateCategory {
                    name: "Games".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(CategoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_remove_category_of_absent_id_is_ok_none() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete().returning(|_| Ok(None));

        let service = CategoryService::new(repo);
        let removed = service.remove_category(Uuid::now_v7()).await.unwrap();

        assert!(removed.is_none());
    }
}
