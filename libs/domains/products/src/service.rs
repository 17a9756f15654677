//! Product Service - Business logic layer

use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateReview, FilterRequest, Product, ProductFields, ProductInput, ProductPage,
    ProductWithCategory, Review,
};
use crate::repository::ProductRepository;

/// Page size of the keyword listing
const PAGE_SIZE: i64 = 6;

/// How many products the storefront landing listing returns
const STOREFRONT_LIMIT: i64 = 12;

/// How many products the top-rated carousel returns
const TOP_LIMIT: i64 = 4;

/// How many products the new-arrivals carousel returns
const NEW_LIMIT: i64 = 5;

/// Product service providing business logic operations
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Enforce the required fields in their fixed precedence order.
    ///
    /// The first missing field wins and names itself in the error, so a
    /// payload missing everything still reports "Name is required".
    fn required_fields(input: ProductInput) -> ProductResult<ProductFields> {
        let name = match input.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ProductError::MissingField("Name")),
        };
        let description = match input.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Err(ProductError::MissingField("Description")),
        };
        let price = input.price.ok_or(ProductError::MissingField("Price"))?;
        let category = input
            .category
            .ok_or(ProductError::MissingField("Category"))?;
        let quantity = input
            .quantity
            .ok_or(ProductError::MissingField("Quantity"))?;
        let brand = match input.brand {
            Some(b) if !b.trim().is_empty() => b,
            _ => return Err(ProductError::MissingField("Brand")),
        };

        Ok(ProductFields {
            name,
            description,
            price,
            category,
            quantity,
            brand,
            image: input.image,
            count_in_stock: input.count_in_stock.unwrap_or(0),
        })
    }

    /// Create a new product
    #[instrument(skip(self, input))]
    pub async fn add_product(&self, input: ProductInput) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let fields = Self::required_fields(input)?;
        self.repository.create(Product::new(fields)).await
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: ProductInput) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let fields = Self::required_fields(input)?;

        let mut product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        product.apply_fields(fields);

        self.repository.update(product).await
    }

    /// Delete a product
    ///
    /// Deleting an absent id is a no-op; the caller gets the same success
    /// message either way.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete(id).await?;
        Ok(())
    }

    /// Keyword listing, one fixed-size page
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, keyword: Option<String>) -> ProductResult<ProductPage> {
        let keyword = keyword.as_deref();

        let count = self.repository.count(keyword).await?;
        let products = self.repository.search(keyword, PAGE_SIZE).await?;

        Ok(ProductPage {
            products,
            page: 1,
            pages: (count as i64 + PAGE_SIZE - 1) / PAGE_SIZE,
            has_more: false,
        })
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn fetch_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// Storefront landing listing: newest products, category expanded
    #[instrument(skip(self))]
    pub async fn fetch_all_products(&self) -> ProductResult<Vec<ProductWithCategory>> {
        self.repository.list_with_category(STOREFRONT_LIMIT).await
    }

    /// Append a review and recompute the denormalized rating.
    ///
    /// The duplicate check is a read-scan-append; two concurrent reviews by
    /// the same user can both pass the scan. Accepted, same as the system
    /// this replaces.
    #[instrument(skip(self, input), fields(product_id = %product_id, user_id = %user_id))]
    pub async fn add_review(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        username: &str,
        input: CreateReview,
    ) -> ProductResult<()> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let mut product = self
            .repository
            .get_by_id(product_id)
            .await?
            .ok_or(ProductError::NotFound)?;

        if product.reviewed_by(user_id) {
            return Err(ProductError::AlreadyReviewed);
        }

        product.push_review(Review {
            name: username.to_string(),
            rating: input.rating,
            comment: input.comment,
            user: user_id,
            created_at: Utc::now(),
        });

        self.repository.update(product).await?;
        Ok(())
    }

    /// Highest rated products
    #[instrument(skip(self))]
    pub async fn top_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.top_rated(TOP_LIMIT).await
    }

    /// Most recently added products
    #[instrument(skip(self))]
    pub async fn new_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.newest(NEW_LIMIT).await
    }

    /// Filtered listing by category membership and price range
    #[instrument(skip(self, request))]
    pub async fn filter_products(&self, request: FilterRequest) -> ProductResult<Vec<Product>> {
        let price_range = match request.radio.as_slice() {
            [min, max] => Some((*min, *max)),
            _ => None,
        };

        self.repository.filter(request.checked, price_range).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn input() -> ProductInput {
        ProductInput {
            name: Some("Widget".to_string()),
            description: Some("A widget".to_string()),
            price: Some(19.99),
            category: Some(Uuid::now_v7()),
            quantity: Some(3),
            brand: Some("Acme".to_string()),
            image: None,
            count_in_stock: Some(3),
        }
    }

    fn product() -> Product {
        Product::new(ProductService::<MockProductRepository>::required_fields(input()).unwrap())
    }

    #[tokio::test]
    async fn test_add_product_reports_first_missing_field() {
        let service = ProductService::new(MockProductRepository::new());

        let cases: Vec<(Box<dyn Fn(&mut ProductInput)>, &str)> = vec![
            (Box::new(|i| i.name = None), "Name"),
            (Box::new(|i| i.description = Some("  ".to_string())), "Description"),
            (Box::new(|i| i.price = None), "Price"),
            (Box::new(|i| i.category = None), "Category"),
            (Box::new(|i| i.quantity = None), "Quantity"),
            (Box::new(|i| i.brand = None), "Brand"),
        ];

        for (strip, field) in cases {
            let mut payload = input();
            strip(&mut payload);
            match service.add_product(payload).await {
                Err(ProductError::MissingField(f)) => assert_eq!(f, field),
                other => panic!("expected MissingField({field}), got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_add_product_precedence_name_first() {
        let service = ProductService::new(MockProductRepository::new());

        // everything missing: the name check wins
        let result = service.add_product(ProductInput::default()).await;
        assert!(matches!(result, Err(ProductError::MissingField("Name"))));
    }

    #[tokio::test]
    async fn test_fetch_products_page_shape() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().returning(|_| Ok(13));
        repo.expect_search().returning(|_, _| Ok(vec![]));

        let service = ProductService::new(repo);
        let page = service.fetch_products(None).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 3); // ceil(13 / 6)
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_fetch_products_caps_page_at_six() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().returning(|_| Ok(100));
        repo.expect_search()
            .withf(|keyword, limit| *keyword == Some("widget") && *limit == 6)
            .returning(|_, _| Ok(vec![]));

        let service = ProductService::new(repo);
        service
            .fetch_products(Some("widget".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_top_products_requests_four() {
        let mut repo = MockProductRepository::new();
        repo.expect_top_rated()
            .withf(|limit| *limit == 4)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(repo);
        assert!(service.top_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_review_rejects_second_review_by_same_user() {
        let user = Uuid::now_v7();
        let mut existing = product();
        existing.push_review(Review {
            name: "jane".to_string(),
            rating: 5.0,
            comment: "great".to_string(),
            user,
            created_at: Utc::now(),
        });
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        // no update expectation: the duplicate must change nothing

        let service = ProductService::new(repo);
        let result = service
            .add_review(
                id,
                user,
                "jane",
                CreateReview {
                    rating: 4.0,
                    comment: "again".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::AlreadyReviewed)));
    }

    #[tokio::test]
    async fn test_add_review_recomputes_mean_and_count() {
        let existing = product();
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .withf(|p| p.num_reviews == 1 && (p.rating - 4.0).abs() < f64::EPSILON)
            .returning(Ok);

        let service = ProductService::new(repo);
        service
            .add_review(
                id,
                Uuid::now_v7(),
                "jane",
                CreateReview {
                    rating: 4.0,
                    comment: "solid".to_string(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_review_on_absent_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let result = service
            .add_review(
                Uuid::now_v7(),
                Uuid::now_v7(),
                "jane",
                CreateReview {
                    rating: 3.0,
                    comment: "ok".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_filter_products_maps_radio_to_price_range() {
        let mut repo = MockProductRepository::new();
        repo.expect_filter()
            .withf(|categories, range| categories.is_empty() && *range == Some((10.0, 50.0)))
            .returning(|_, _| Ok(vec![]));

        let service = ProductService::new(repo);
        service
            .filter_products(FilterRequest {
                checked: vec![],
                radio: vec![10.0, 50.0],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_filter_products_ignores_malformed_radio() {
        let mut repo = MockProductRepository::new();
        repo.expect_filter()
            .withf(|_, range| range.is_none())
            .returning(|_, _| Ok(vec![]));

        let service = ProductService::new(repo);
        service
            .filter_products(FilterRequest {
                checked: vec![],
                radio: vec![10.0],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_product_absent_still_succeeds() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(repo);

        assert!(service.remove_product(Uuid::now_v7()).await.is_ok());
    }
}
