//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::Category;
use crate::repository::CategoryRepository;

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    /// Create a new MongoCategoryRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Category>("categories");
        Self { collection }
    }

    /// Initialize indexes
    pub async fn init_indexes(&self) -> CategoryResult<()> {
        let indexes = vec![IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_name_unique".to_string())
                    .build(),
            )
            .build()];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Category indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(category_name = %category.name))]
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let category = self.collection.find_one(filter).await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CategoryResult<Vec<Category>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;

        Ok(categories)
    }

    #[instrument(skip(self, category))]
    async fn update(&self, category: Category) -> CategoryResult<Category> {
        let filter = doc! { "_id": to_bson(&category.id).unwrap_or(Bson::Null) };
        self.collection.replace_one(filter, &category).await?;

        tracing::info!(category_id = %category.id, "Category updated successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let removed = self.collection.find_one_and_delete(filter).await?;

        if removed.is_some() {
            tracing::info!(category_id = %id, "Category deleted successfully");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> CategoryResult<bool> {
        let filter = doc! { "name": name.trim() };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }
}
