//! MongoDB connector and utilities
//!
//! Connection management for the storefront's document store.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config, connect_from_config_with_retry, MongoError};
pub use health::check_health;

// Re-export driver types for convenience
pub use mongodb::{Client, Collection, Database};
