//! # Store Contracts
//!
//! The abstract collaborators the ordering core depends on. [`OrderStore`] and [`MenuStore`]
//! are implemented by the actor-backed clients in [`crate::clients`]; the workflow and
//! reconciliation code only ever sees these traits.
//!
//! Subscriptions are push-based: the callback receives the full current list once on
//! subscribe and again after every change. A caller's own write may show up through the
//! callback before or after the write's future resolves.

pub mod record;

use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, NewOrder, Order, OrderItem, OrderKey, OrderPatch};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Callback invoked with the full order list, newest first.
pub type OrdersCallback = Box<dyn Fn(Vec<Order>) + Send + Sync + 'static>;

/// Callback invoked with the full catalog, ordered by item id.
pub type MenuCallback = Box<dyn Fn(Vec<MenuItem>) + Send + Sync + 'static>;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order and returns its store key.
    async fn create_order(&self, order: NewOrder) -> Result<OrderKey, OrderError>;

    /// One-shot lookup by key. `Ok(None)` when the order no longer exists.
    async fn fetch_order(&self, key: OrderKey) -> Result<Option<Order>, OrderError>;

    /// Partial update; `None` fields of the patch are left untouched.
    async fn update_order(&self, key: OrderKey, patch: OrderPatch) -> Result<Order, OrderError>;

    async fn delete_order(&self, key: OrderKey) -> Result<(), OrderError>;

    /// Every order, newest first.
    async fn all_orders_once(&self) -> Result<Vec<Order>, OrderError>;

    async fn subscribe_orders(&self, callback: OrdersCallback) -> Result<Subscription, OrderError>;

    /// Writes `items` (and their total) only if the stored lines still equal `expected`.
    /// Fails with [`OrderError::Conflict`] otherwise, leaving the order untouched.
    async fn compare_and_swap_items(
        &self,
        key: OrderKey,
        expected: Vec<OrderItem>,
        items: Vec<OrderItem>,
    ) -> Result<Order, OrderError>;
}

#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn create_item(&self, item: MenuItemCreate) -> Result<MenuItemId, MenuError>;

    async fn update_item(&self, id: MenuItemId, update: MenuItemUpdate) -> Result<MenuItem, MenuError>;

    async fn delete_item(&self, id: MenuItemId) -> Result<(), MenuError>;

    /// The whole catalog, ordered by item id.
    async fn menu_once(&self) -> Result<Vec<MenuItem>, MenuError>;

    async fn subscribe_menu(&self, callback: MenuCallback) -> Result<Subscription, MenuError>;

    /// Creates `defaults` when the catalog is empty. Returns how many items were created.
    async fn seed_if_empty(&self, defaults: Vec<MenuItemCreate>) -> Result<usize, MenuError> {
        if !self.menu_once().await?.is_empty() {
            return Ok(0);
        }
        let count = defaults.len();
        for item in defaults {
            self.create_item(item).await?;
        }
        Ok(count)
    }
}

/// Handle for a live subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    /// Forwards every snapshot published on `feed` to `deliver`, starting with the current one.
    pub fn forward<T, F>(mut feed: watch::Receiver<Vec<T>>, deliver: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(Vec<T>) + Send + 'static,
    {
        let task = tokio::spawn(async move {
            loop {
                let snapshot = feed.borrow_and_update().clone();
                deliver(snapshot);
                if feed.changed().await.is_err() {
                    break;
                }
            }
        });
        Self { task }
    }

    /// False once the store has shut down or the subscription was cancelled.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Newest first; orders placed in the same instant fall back to key order.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.key.cmp(&a.key)));
}
