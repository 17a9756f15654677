//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::Order;
use crate::repository::OrderRepository;

/// MongoDB implementation of the OrderRepository
pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    /// Create a new MongoOrderRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Order>("orders");
        Self { collection }
    }

    /// Initialize indexes
    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![IndexModel::builder()
            .keys(doc! { "user": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("idx_user_created_at".to_string())
                    .build(),
            )
            .build()];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Order indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(user_id = %order.user))]
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.collection.insert_one(&order).await?;

        tracing::info!(order_id = %order.id, "Order created successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let order = self.collection.find_one(filter).await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user: Uuid) -> OrderResult<Vec<Order>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "user": to_bson(&user).unwrap_or(Bson::Null) };
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let orders: Vec<Order> = cursor.try_collect().await?;

        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> OrderResult<Vec<Order>> {
        use futures_util::TryStreamExt;

        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await?;
        let orders: Vec<Order> = cursor.try_collect().await?;

        Ok(orders)
    }

    #[instrument(skip(self, order))]
    async fn update(&self, order: Order) -> OrderResult<Order> {
        let filter = doc! { "_id": to_bson(&order.id).unwrap_or(Bson::Null) };
        self.collection.replace_one(filter, &order).await?;

        tracing::info!(order_id = %order.id, "Order updated successfully");
        Ok(order)
    }
}
