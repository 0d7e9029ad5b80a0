//! Staff-facing order operations.
//!
//! Every operation re-reads the order by key before acting, validates against that fresh
//! copy and only then writes. Nothing here caches order state between calls.

use crate::cart::Cart;
use crate::model::{NewOrder, Order, OrderItem, OrderKey, OrderPatch, OrderStatus, OrderType};
use crate::order_actor::OrderError;
use crate::orders::reconcile::Reconciler;
use crate::store::OrderStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of [`OrderDesk::update_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The order now has the requested status.
    Updated(Order),
    /// A completed add-on was folded into its parent and removed; this is the parent.
    Merged(Order),
}

/// The order desk: places orders and moves them through their lifecycle.
pub struct OrderDesk<S> {
    store: Arc<S>,
    reconciler: Reconciler<S>,
}

impl<S: OrderStore> OrderDesk<S> {
    pub fn new(store: S) -> Self {
        Self::with_shared(Arc::new(store))
    }

    pub fn with_shared(store: Arc<S>) -> Self {
        Self {
            reconciler: Reconciler::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Submits the cart as a new `pending` order. The cart is cleared only once the store
    /// has accepted the order.
    #[instrument(skip(self, cart), fields(lines = cart.lines().len()))]
    pub async fn place_order(
        &self,
        cart: &mut Cart,
        customer_name: &str,
        order_type: OrderType,
        now: DateTime<Utc>,
    ) -> Result<OrderKey, OrderError> {
        let order = cart.checkout(customer_name, order_type, now)?;
        let key = self.store.create_order(order).await?;
        cart.clear();
        info!(%key, "Order placed");
        Ok(key)
    }

    /// Opens an add-on ticket for a completed order. The add-on is merged back into the
    /// parent when it is completed.
    #[instrument(skip(self, items))]
    pub async fn add_to_order(
        &self,
        parent_key: OrderKey,
        items: Vec<OrderItem>,
        now: DateTime<Utc>,
    ) -> Result<OrderKey, OrderError> {
        if items.is_empty() {
            return Err(OrderError::validation("nothing to add"));
        }
        let parent = self.current(parent_key).await?;
        if parent.status != OrderStatus::Completed {
            return Err(OrderError::validation(format!(
                "{parent_key} is still {}; edit its items instead",
                parent.status
            )));
        }
        let key = self
            .store
            .create_order(NewOrder::addition(&parent, items, now))
            .await?;
        info!(%key, %parent_key, "Add-on order placed");
        Ok(key)
    }

    /// Moves an order to `next`. Completing an add-on merges it into its parent instead.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        key: OrderKey,
        next: OrderStatus,
    ) -> Result<StatusChange, OrderError> {
        let order = self.current(key).await?;
        if !order.status.can_transition_to(next) {
            warn!(from = %order.status, to = %next, "Rejected status change");
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        if next == OrderStatus::Completed && order.is_addition() {
            return self.reconciler.reconcile(&order).await.map(StatusChange::Merged);
        }

        let updated = self.store.update_order(key, OrderPatch::status(next)).await?;
        info!(status = %next, "Status updated");
        Ok(StatusChange::Updated(updated))
    }

    /// Replaces the order's lines. The total is recomputed and written together with the
    /// order's current status.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn update_items(&self, key: OrderKey, items: Vec<OrderItem>) -> Result<Order, OrderError> {
        if items.is_empty() {
            return Err(OrderError::validation(
                "an order needs at least one item; cancel it instead",
            ));
        }
        let order = self.current(key).await?;
        let updated = self
            .store
            .update_order(key, OrderPatch::items(order.status, items))
            .await?;
        info!(total = updated.total, "Items updated");
        Ok(updated)
    }

    /// Sets the payment flag of a dine-in order. Takeaway orders are paid on pickup and
    /// cannot be toggled.
    #[instrument(skip(self))]
    pub async fn toggle_payment(&self, key: OrderKey, is_paid: bool) -> Result<Order, OrderError> {
        let order = self.current(key).await?;
        if order.order_type != OrderType::DineIn {
            return Err(OrderError::validation(format!(
                "{key} is {}; payment is settled at pickup",
                order.order_type
            )));
        }
        self.store
            .update_order(key, OrderPatch::payment(order.status, is_paid))
            .await
    }

    /// Deletes a `pending` order.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, key: OrderKey) -> Result<(), OrderError> {
        let order = self.current(key).await?;
        if !order.status.is_cancellable() {
            return Err(OrderError::validation(format!(
                "{key} is {} and can no longer be cancelled",
                order.status
            )));
        }
        self.store.delete_order(key).await?;
        info!("Order cancelled");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn rename_customer(&self, key: OrderKey, name: &str) -> Result<Order, OrderError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OrderError::validation("customer name must not be blank"));
        }
        self.current(key).await?;
        self.store
            .update_order(key, OrderPatch::customer_name(name))
            .await
    }

    async fn current(&self, key: OrderKey) -> Result<Order, OrderError> {
        self.store
            .fetch_order(key)
            .await?
            .ok_or_else(|| OrderError::NotFound(key.to_string()))
    }
}
