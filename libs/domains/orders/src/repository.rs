use async_trait::async_trait;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::Order;

/// Repository trait for Order persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order
    async fn create(&self, order: Order) -> OrderResult<Order>;

    /// Get an order by ID
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    /// A user's orders, newest first
    async fn list_by_user(&self, user: Uuid) -> OrderResult<Vec<Order>>;

    /// All orders, newest first
    async fn list(&self) -> OrderResult<Vec<Order>>;

    /// Replace an existing order
    async fn update(&self, order: Order) -> OrderResult<Order>;
}
