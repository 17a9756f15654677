//! Orders API routes
//!
//! Wires the orders domain to HTTP routes.

use axum::Router;
use axum_helpers::JwtAuth;
use domain_orders::{MongoOrderRepository, OrderService, handlers};
use tracing::info;

use crate::state::AppState;

/// Create the orders router
pub fn router(state: &AppState) -> Router {
    let repository = MongoOrderRepository::new(&state.db);
    let service = OrderService::new(repository);

    handlers::router(service, JwtAuth::new(&state.config.jwt))
}

/// Initialize order indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoOrderRepository::new(db);
    repository
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create order indexes: {}", e))?;
    info!("Order collection indexes created");
    Ok(())
}
