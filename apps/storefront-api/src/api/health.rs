//! Readiness endpoint
//!
//! Liveness (`/health`) is served by `axum_helpers::health_router`; this
//! module adds `/api/ready`, which actually touches MongoDB.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use serde_json::Value;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check; not ready turns into 503
async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks = vec![(
        "mongodb",
        Box::pin(async {
            if database::mongodb::check_health(&state.mongo_client).await {
                Ok(())
            } else {
                Err("MongoDB unreachable".to_string())
            }
        }) as HealthCheckFuture,
    )];

    run_health_checks(checks).await
}
