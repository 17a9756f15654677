//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, from_document, to_bson, Bson},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductWithCategory};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Initialize indexes for the catalog query patterns
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // Keyword search on name
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
            // Top-rated listing
            IndexModel::builder()
                .keys(doc! { "rating": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_rating".to_string())
                        .build(),
                )
                .build(),
            // Storefront listing
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
            // Category + price filtering
            IndexModel::builder()
                .keys(doc! { "category": 1, "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_price".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Build the keyword filter document
    fn keyword_filter(keyword: Option<&str>) -> mongodb::bson::Document {
        match keyword {
            Some(kw) if !kw.trim().is_empty() => {
                doc! { "name": { "$regex": kw.trim(), "$options": "i" } }
            }
            _ => doc! {},
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self, product))]
    async fn update(&self, product: Product) -> ProductResult<Product> {
        let filter = doc! { "_id": to_bson(&product.id).unwrap_or(Bson::Null) };
        self.collection.replace_one(filter, &product).await?;

        tracing::info!(product_id = %product.id, "Product updated successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn search<'a>(&self, keyword: Option<&'a str>, limit: i64) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let filter = Self::keyword_filter(keyword);

        // Natural order, no sort: the page matches whatever the store
        // returns first, capped at the page size.
        let options = mongodb::options::FindOptions::builder()
            .limit(limit)
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count<'a>(&self, keyword: Option<&'a str>) -> ProductResult<u64> {
        let filter = Self::keyword_filter(keyword);
        let count = self.collection.count_documents(filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn list_with_category(&self, limit: i64) -> ProductResult<Vec<ProductWithCategory>> {
        use futures_util::TryStreamExt;

        // Same shape mongoose populate produced: the category id is replaced
        // by the referenced document, or dropped when it no longer exists.
        let pipeline = vec![
            doc! { "$sort": { "created_at": -1 } },
            doc! { "$limit": limit },
            doc! { "$lookup": {
                "from": "categories",
                "localField": "category",
                "foreignField": "_id",
                "as": "category",
            }},
            doc! { "$unwind": {
                "path": "$category",
                "preserveNullAndEmptyArrays": true,
            }},
        ];

        let cursor = self.collection.aggregate(pipeline).await?;
        let documents: Vec<mongodb::bson::Document> = cursor.try_collect().await?;

        let mut products = Vec::with_capacity(documents.len());
        for document in documents {
            let product: ProductWithCategory = from_document(document)
                .map_err(|e| crate::error::ProductError::Database(e.to_string()))?;
            products.push(product);
        }

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn top_rated(&self, limit: i64) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let options = mongodb::options::FindOptions::builder()
            .limit(limit)
            .sort(doc! { "rating": -1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn newest(&self, limit: i64) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        // v7 ids are time-ordered, so descending _id is insertion order
        let options = mongodb::options::FindOptions::builder()
            .limit(limit)
            .sort(doc! { "_id": -1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn filter(
        &self,
        categories: Vec<Uuid>,
        price_range: Option<(f64, f64)>,
    ) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let mut filter = doc! {};

        if !categories.is_empty() {
            filter.insert(
                "category",
                doc! { "$in": to_bson(&categories).unwrap_or(Bson::Null) },
            );
        }

        if let Some((min, max)) = price_range {
            filter.insert("price", doc! { "$gte": min, "$lte": max });
        }

        let cursor = self.collection.find(filter).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_filter_empty() {
        assert!(MongoProductRepository::keyword_filter(None).is_empty());
        assert!(MongoProductRepository::keyword_filter(Some("   ")).is_empty());
    }

    #[test]
    fn test_keyword_filter_builds_regex() {
        let filter = MongoProductRepository::keyword_filter(Some("phone"));
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "phone");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_keyword_filter_trims() {
        let filter = MongoProductRepository::keyword_filter(Some("  tv "));
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "tv");
    }
}
