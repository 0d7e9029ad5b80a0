//! # Order Client
//!
//! The actor-backed [`OrderStore`]. Wraps a `ResourceClient<Order>` and translates
//! framework failures into [`OrderError`].

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{NewOrder, Order, OrderItem, OrderKey, OrderPatch};
use crate::order_actor::{OrderAction, OrderError};
use crate::store::{sort_newest_first, OrderStore, OrdersCallback, Subscription};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    /// Entity rejections keep their own `OrderError`; a missing key is `NotFound`;
    /// anything else is a store failure.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(key)) => OrderError::NotFound(key),
            Err(other) => OrderError::Store(other.to_string()),
        }
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    #[instrument(skip(self, order), fields(code = %order.id))]
    async fn create_order(&self, order: NewOrder) -> Result<OrderKey, OrderError> {
        debug!(?order, "Sending request");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    async fn fetch_order(&self, key: OrderKey) -> Result<Option<Order>, OrderError> {
        self.get(key).await
    }

    #[instrument(skip(self, patch))]
    async fn update_order(&self, key: OrderKey, patch: OrderPatch) -> Result<Order, OrderError> {
        debug!(?patch, "Sending request");
        self.inner.update(key, patch).await.map_err(Self::map_error)
    }

    async fn delete_order(&self, key: OrderKey) -> Result<(), OrderError> {
        self.delete(key).await
    }

    async fn all_orders_once(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    #[instrument(skip(self, callback))]
    async fn subscribe_orders(&self, callback: OrdersCallback) -> Result<Subscription, OrderError> {
        debug!("Sending request");
        let feed = self.inner.subscribe().await.map_err(Self::map_error)?;
        Ok(Subscription::forward(feed, move |mut orders: Vec<Order>| {
            sort_newest_first(&mut orders);
            callback(orders)
        }))
    }

    #[instrument(skip(self, expected, items))]
    async fn compare_and_swap_items(
        &self,
        key: OrderKey,
        expected: Vec<OrderItem>,
        items: Vec<OrderItem>,
    ) -> Result<Order, OrderError> {
        debug!(lines = items.len(), "Sending request");
        self.inner
            .perform_action(key, OrderAction::SwapItems { expected, items })
            .await
            .map_err(Self::map_error)
    }
}
