//! Products Domain
//!
//! Catalog products with embedded customer reviews, backed by MongoDB.
//!
//! Layered like the other domain crates:
//!
//! ```text
//! handlers -> service -> repository (trait + MongoDB impl) -> models
//! ```
//!
//! The service owns the catalog rules: the fixed required-field precedence
//! on writes, the fixed-size keyword page, and the one-review-per-user
//! check with mean-rating recompute.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CategoryInfo, CreateReview, FilterRequest, MessageResponse, Product, ProductFields,
    ProductInput, ProductPage, ProductWithCategory, Review, SearchQuery,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
