//! Categories API routes
//!
//! Wires the categories domain to HTTP routes.

use axum::Router;
use axum_helpers::JwtAuth;
use domain_categories::{CategoryService, MongoCategoryRepository, handlers};
use tracing::info;

use crate::state::AppState;

/// Create the categories router
pub fn router(state: &AppState) -> Router {
    let repository = MongoCategoryRepository::new(&state.db);
    let service = CategoryService::new(repository);

    handlers::router(service, JwtAuth::new(&state.config.jwt))
}

/// Initialize category indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoCategoryRepository::new(db);
    repository
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create category indexes: {}", e))?;
    info!("Category collection indexes created");
    Ok(())
}
