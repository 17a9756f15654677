use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A customer review, embedded in its product document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    /// Reviewer display name (username at review time)
    pub name: String,
    /// Star rating, 1.0 to 5.0
    pub rating: f64,
    /// Review text
    pub comment: String,
    /// Reviewer user id
    pub user: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Product entity - represents a catalog product stored in MongoDB
///
/// Reviews are exclusively owned by the product and embedded in the same
/// document. `num_reviews` and `rating` are denormalized from `reviews`
/// and recomputed on every review insert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Price
    pub price: f64,
    /// Category id (references the categories collection)
    pub category: Uuid,
    /// Quantity on hand
    pub quantity: i64,
    /// Brand name
    pub brand: String,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Units available for sale
    #[serde(default)]
    pub count_in_stock: i64,
    /// Embedded customer reviews
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Number of reviews (always reviews.len())
    #[serde(default)]
    pub num_reviews: i64,
    /// Mean of review ratings, 0.0 when there are none
    #[serde(default)]
    pub rating: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or replacing a product
///
/// All fields are optional at the wire level; the service enforces the
/// required set with a fixed precedence so the first missing field wins.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Uuid>,
    pub quantity: Option<i64>,
    pub brand: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0))]
    pub count_in_stock: Option<i64>,
}

/// The required fields of [`ProductInput`], extracted by the service
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Uuid,
    pub quantity: i64,
    pub brand: String,
    pub image: Option<String>,
    pub count_in_stock: i64,
}

/// DTO for posting a review
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    /// Star rating, 1 to 5
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,
    /// Review text
    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

/// Query parameters for the paged product listing
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring match on the product name
    pub keyword: Option<String>,
}

/// One page of products
///
/// `page` and `hasMore` mirror the long-standing client contract: the
/// listing always reports the first page and never signals more.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: i64,
    pub pages: i64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Category summary embedded in storefront listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryInfo {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
}

/// Product with its category expanded inline (storefront listing shape)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductWithCategory {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Expanded category, None when the referenced category is gone
    pub category: Option<CategoryInfo>,
    pub quantity: i64,
    pub brand: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub count_in_stock: i64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub num_reviews: i64,
    #[serde(default)]
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of the storefront filter endpoint
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct FilterRequest {
    /// Category ids to include; empty imposes no constraint
    #[serde(default)]
    pub checked: Vec<Uuid>,
    /// Price range as [min, max]; anything but two entries imposes no constraint
    #[serde(default)]
    pub radio: Vec<f64>,
}

/// Plain message response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Product {
    /// Create a new product from validated fields
    pub fn new(fields: ProductFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            quantity: fields.quantity,
            brand: fields.brand,
            image: fields.image,
            count_in_stock: fields.count_in_stock,
            reviews: Vec::new(),
            num_reviews: 0,
            rating: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields, leaving reviews and rating intact
    pub fn apply_fields(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
        self.quantity = fields.quantity;
        self.brand = fields.brand;
        if fields.image.is_some() {
            self.image = fields.image;
        }
        self.count_in_stock = fields.count_in_stock;
        self.updated_at = Utc::now();
    }

    /// Whether this user already has a review on the product
    pub fn reviewed_by(&self, user: Uuid) -> bool {
        self.reviews.iter().any(|r| r.user == user)
    }

    /// Append a review and recompute the denormalized counters
    pub fn push_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.num_reviews = self.reviews.len() as i64;
        let sum: f64 = self.reviews.iter().map(|r| r.rating).sum();
        self.rating = sum / self.reviews.len() as f64;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            description: "desc".to_string(),
            price: 99.99,
            category: Uuid::now_v7(),
            quantity: 10,
            brand: "Acme".to_string(),
            image: None,
            count_in_stock: 5,
        }
    }

    fn review(user: Uuid, rating: f64) -> Review {
        Review {
            name: "jane".to_string(),
            rating,
            comment: "solid".to_string(),
            user,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_product_has_no_reviews() {
        let product = Product::new(fields("Widget"));
        assert!(product.reviews.is_empty());
        assert_eq!(product.num_reviews, 0);
        assert_eq!(product.rating, 0.0);
    }

    #[test]
    fn test_push_review_recomputes_mean() {
        let mut product = Product::new(fields("Widget"));
        product.push_review(review(Uuid::now_v7(), 4.0));
        product.push_review(review(Uuid::now_v7(), 5.0));

        assert_eq!(product.num_reviews, 2);
        assert!((product.rating - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reviewed_by() {
        let user = Uuid::now_v7();
        let mut product = Product::new(fields("Widget"));
        assert!(!product.reviewed_by(user));

        product.push_review(review(user, 3.0));
        assert!(product.reviewed_by(user));
        assert!(!product.reviewed_by(Uuid::now_v7()));
    }

    #[test]
    fn test_product_page_serializes_has_more_camel_case() {
        let page = ProductPage {
            products: vec![],
            page: 1,
            pages: 0,
            has_more: false,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["hasMore"], false);
        assert_eq!(json["page"], 1);
    }
}
