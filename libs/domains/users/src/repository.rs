use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// List all users
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Replace an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID, reporting whether a document matched
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check whether an account with this email exists
    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}
