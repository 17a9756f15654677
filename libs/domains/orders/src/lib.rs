//! Orders Domain
//!
//! Order placement and fulfilment tracking, backed by MongoDB. Orders
//! snapshot product names and prices at placement time and carry paid
//! and delivered flags that admins flip as fulfilment progresses.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{Order, OrderItem, PlaceOrder, ShippingAddress};
pub use mongodb::MongoOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
