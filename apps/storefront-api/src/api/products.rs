//! Products API routes
//!
//! Wires the products domain to HTTP routes.

use axum::Router;
use axum_helpers::JwtAuth;
use domain_products::{MongoProductRepository, ProductService, handlers};
use tracing::info;

use crate::state::AppState;

/// Create the products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);

    handlers::router(service, JwtAuth::new(&state.config.jwt))
}

/// Initialize product indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(db);
    repository
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create product indexes: {}", e))?;
    info!("Product collection indexes created");
    Ok(())
}
