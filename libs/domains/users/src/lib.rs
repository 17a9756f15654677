//! Users Domain
//!
//! Accounts, credentials and user administration for the storefront,
//! backed by MongoDB.
//!
//! Registration and login issue an HS256 JWT carried in an HttpOnly
//! `access_token` cookie; profile routes authenticate with it and
//! management routes additionally require the admin role.

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use auth_handlers::AuthState;
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    AdminUpdateUser, LoginRequest, MessageResponse, RegisterRequest, UpdateProfile, User,
    UserResponse,
};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
