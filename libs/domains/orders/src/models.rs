use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    /// Ordered product id
    pub product: Uuid,
    /// Product name at order time
    pub name: String,
    /// Quantity ordered
    pub qty: i64,
    /// Unit price at order time
    pub price: f64,
}

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShippingAddress {
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub postal_code: String,
    #[validate(length(min = 1))]
    pub country: String,
}

/// Order entity - represents a placed order stored in MongoDB
///
/// Items embed the product name and price as they were at order time, so
/// later catalog edits never rewrite order history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// The user who placed the order
    pub user: Uuid,
    /// Ordered lines
    pub items: Vec<OrderItem>,
    /// Delivery address
    pub shipping_address: ShippingAddress,
    /// Payment method label (recorded only; no gateway integration)
    pub payment_method: String,
    /// Sum of line prices
    pub items_price: f64,
    /// Shipping cost
    pub shipping_price: f64,
    /// Tax amount
    pub tax_price: f64,
    /// Grand total
    pub total_price: f64,
    /// Whether payment has been recorded
    pub is_paid: bool,
    /// When payment was recorded
    pub paid_at: Option<DateTime<Utc>>,
    /// Whether delivery has been recorded
    pub is_delivered: bool,
    /// When delivery was recorded
    pub delivered_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for placing an order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PlaceOrder {
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[validate(nested)]
    pub shipping_address: ShippingAddress,
    #[validate(length(min = 1))]
    pub payment_method: String,
    #[validate(range(min = 0.0))]
    pub items_price: f64,
    #[validate(range(min = 0.0))]
    pub shipping_price: f64,
    #[validate(range(min = 0.0))]
    pub tax_price: f64,
    #[validate(range(min = 0.0))]
    pub total_price: f64,
}

impl Order {
    /// Create a new unpaid, undelivered order
    pub fn new(user: Uuid, input: PlaceOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user,
            items: input.items,
            shipping_address: input.shipping_address,
            payment_method: input.payment_method,
            items_price: input.items_price,
            shipping_price: input.shipping_price,
            tax_price: input.tax_price,
            total_price: input.total_price,
            is_paid: false,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record payment
    pub fn mark_paid(&mut self) {
        let now = Utc::now();
        self.is_paid = true;
        self.paid_at = Some(now);
        self.updated_at = now;
    }

    /// Record delivery
    pub fn mark_delivered(&mut self) {
        let now = Utc::now();
        self.is_delivered = true;
        self.delivered_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_order() -> PlaceOrder {
        PlaceOrder {
            items: vec![OrderItem {
                product: Uuid::now_v7(),
                name: "Widget".to_string(),
                qty: 2,
                price: 9.99,
            }],
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

    #[test]
    fn test_new_order_starts_unpaid_and_undelivered() {
        let order = Order::new(Uuid::now_v7(), place_order());
        assert!(!order.is_paid);
        assert!(order.paid_at.is_none());
        assert!(!order.is_delivered);
        assert!(order.delivered_at.is_none());
    }

    #[test]
    fn test_mark_paid_sets_flag_and_timestamp() {
        let mut order = Order::new(Uuid::now_v7(), place_order());
        order.mark_paid();
        assert!(order.is_paid);
        assert!(order.paid_at.is_some());
    }

    #[test]
    fn test_mark_delivered_sets_flag_and_timestamp() {
        let mut order = Order::new(Uuid::now_v7(), place_order());
        order.mark_delivered();
        assert!(order.is_delivered);
        assert!(order.delivered_at.is_some());
    }
}
