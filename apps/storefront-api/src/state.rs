//! Shared application state.
//!
//! Every domain router is wired from this state: the JWT config feeds the
//! auth middleware and the database handle feeds the repositories.

use mongodb::{Client, Database};

/// State shared across all request handlers.
///
/// Cloning is cheap; the client and database handles are Arc-backed and
/// share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, kept for health checks and shutdown
    pub mongo_client: Client,
    /// Handle to the storefront database
    pub db: Database,
}
