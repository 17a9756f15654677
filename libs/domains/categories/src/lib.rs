//! Categories Domain
//!
//! Category management for the storefront catalog: a flat namespace of
//! uniquely named categories that products reference by id.
//!
//! Layered like the other domain crates: handlers over a service over a
//! repository trait with a MongoDB implementation.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CreateCategory, UpdateCategory};
pub use mongodb::MongoCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
