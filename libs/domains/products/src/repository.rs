use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductWithCategory};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Replace an existing product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID, reporting whether a document matched
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Products whose name contains the keyword (case-insensitive), newest first
    async fn search<'a>(&self, keyword: Option<&'a str>, limit: i64)
        -> ProductResult<Vec<Product>>;

    /// Count products matching the keyword
    async fn count<'a>(&self, keyword: Option<&'a str>) -> ProductResult<u64>;

    /// Newest products with their category expanded inline
    async fn list_with_category(&self, limit: i64) -> ProductResult<Vec<ProductWithCategory>>;

    /// Highest rated products, rating descending
    async fn top_rated(&self, limit: i64) -> ProductResult<Vec<Product>>;

    /// Most recently inserted products, descending id
    async fn newest(&self, limit: i64) -> ProductResult<Vec<Product>>;

    /// Products constrained by category membership and price range
    async fn filter(
        &self,
        categories: Vec<Uuid>,
        price_range: Option<(f64, f64)>,
    ) -> ProductResult<Vec<Product>>;
}
