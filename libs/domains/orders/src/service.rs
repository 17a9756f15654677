//! Order Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, PlaceOrder};
use crate::repository::OrderRepository;

/// Order service providing business logic operations
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    /// Create a new OrderService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Place a new order for a user
    #[instrument(skip(self, input), fields(user_id = %user))]
    pub async fn place_order(&self, user: Uuid, input: PlaceOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        if input.items.is_empty() {
            return Err(OrderError::NoItems);
        }

        self.repository.create(Order::new(user, input)).await
    }

    /// Get an order; readable by its owner or any admin
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid, caller: Uuid, is_admin: bool) -> OrderResult<Order> {
        let order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if order.user != caller && !is_admin {
            return Err(OrderError::Forbidden);
        }

        Ok(order)
    }

    /// The caller's orders, newest first
    #[instrument(skip(self))]
    pub async fn my_orders(&self, user: Uuid) -> OrderResult<Vec<Order>> {
        self.repository.list_by_user(user).await
    }

    /// All orders, newest first (admin)
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> OrderResult<Vec<Order>> {
        self.repository.list().await
    }

    /// Record payment on an order
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: Uuid) -> OrderResult<Order> {
        let mut order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound)?;

        order.mark_paid();
        self.repository.update(order).await
    }

    /// Record delivery on an order
    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: Uuid) -> OrderResult<Order> {
        let mut order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound)?;

        order.mark_delivered();
        self.repository.update(order).await
    }
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItem, ShippingAddress};
    use crate::repository::MockOrderRepository;

    fn place_order(items: Vec<OrderItem>) -> PlaceOrder {
        PlaceOrder {
            items,
            shipping_address: ShippingAddress {
                address: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                postal_code: "12345".to_string(),
                country: "US".to_string(),
            },
            payment_method: "PayPal".to_string(),
            items_price: 19.98,
            shipping_price: 5.0,
            tax_price: 2.0,
            total_price: 26.98,
        }
    }

    fn item() -> OrderItem {
        OrderItem {
            product: Uuid::now_v7(),
            name: "Widget".to_string(),
            qty: 2,
            price: 9.99,
        }
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_items() {
        let service = OrderService::new(MockOrderRepository::new());

        let result = service
            .place_order(Uuid::now_v7(), place_order(vec![]))
            .await;

        assert!(matches!(result, Err(OrderError::NoItems)));
    }

    #[tokio::test]
    async fn test_place_order_starts_unpaid() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create()
            .withf(|order| !order.is_paid && !order.is_delivered)
            .returning(Ok);

        let service = OrderService::new(repo);
        service
            .place_order(Uuid::now_v7(), place_order(vec![item()]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_order_forbids_other_users() {
        let owner = Uuid::now_v7();
        let order = Order::new(owner, place_order(vec![item()]));
        let id = order.id;

        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(order.clone())));

        let service = OrderService::new(repo);

        let stranger = service.get_order(id, Uuid::now_v7(), false).await;
        assert!(matches!(stranger, Err(OrderError::Forbidden)));

        let admin = service.get_order(id, Uuid::now_v7(), true).await;
        assert!(admin.is_ok());

        let as_owner = service.get_order(id, owner, false).await;
        assert!(as_owner.is_ok());
    }

    #[tokio::test]
    async fn test_mark_paid_sets_timestamp() {
        let order = Order::new(Uuid::now_v7(), place_order(vec![item()]));
        let id = order.id;

        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(order.clone())));
        repo.expect_update()
            .withf(|order| order.is_paid && order.paid_at.is_some())
            .returning(Ok);

        let service = OrderService::new(repo);
        service.mark_paid(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_mark_delivered_absent_is_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = OrderService::new(repo);
        let result = service.mark_delivered(Uuid::now_v7()).await;

        assert!(matches!(result, Err(OrderError::NotFound)));
    }
}
