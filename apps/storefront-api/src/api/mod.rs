//! HTTP API composition
//!
//! Each domain crate ships its own router; this module builds them against
//! the shared state and mounts them. `axum_helpers::create_router` nests
//! everything here under `/api`.

pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Compose all domain routers plus the readiness endpoint
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/categories", categories::router(state))
        .nest("/products", products::router(state))
        .nest("/users", users::router(state))
        .nest("/orders", orders::router(state))
        .merge(health::router(state.clone()))
}
