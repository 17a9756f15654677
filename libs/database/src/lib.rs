//! Database library providing the MongoDB connector and shared utilities
//!
//! The storefront keeps all collections in a single MongoDB database; this
//! crate owns connection configuration, startup retry, and health checks so
//! apps and domain crates never talk to the driver's client options directly.
//!
//! # Features
//!
//! - `config` - load [`mongodb::MongoConfig`] from environment variables via
//!   `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("storefront");
//! let products = db.collection::<Product>("products");
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
