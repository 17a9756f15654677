//! Authentication and authorization module.
//!
//! This module provides:
//! - JWT token creation and verification (HS256)
//! - Authentication middleware for protected routes
//! - An admin gate for management endpoints
//! - The [`AuthUser`] extractor exposing the verified identity to handlers
//!
//! Tokens travel in an HttpOnly `access_token` cookie (set by the login
//! handlers) and are also accepted via `Authorization: Bearer`.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! let protected = Router::new()
//!     .route("/profile", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod user;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims, ROLE_ADMIN, ROLE_USER};
pub use middleware::{admin_auth_middleware, jwt_auth_middleware};
pub use user::AuthUser;
