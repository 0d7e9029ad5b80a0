//! [`ActorEntity`] implementation for [`Order`].
//!
//! The store-side rules live here: the stored `total` always matches the stored `items`,
//! `items` is never empty, and the payment flag starts from the order type.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::framework::ActorEntity;
use crate::model::{items_total, NewOrder, Order, OrderItem, OrderKey, OrderPatch, OrderStatus};
use async_trait::async_trait;

fn check_lines(items: &[OrderItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::validation("an order needs at least one item"));
    }
    if let Some(line) = items.iter().find(|line| line.quantity == 0) {
        return Err(OrderError::validation(format!(
            "quantity of {} must be at least 1",
            line.item.name
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderKey;
    type Create = NewOrder;
    type Update = OrderPatch;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    /// Builds a `pending` order with its total and default payment flag.
    fn from_create_params(key: OrderKey, params: NewOrder) -> Result<Self, OrderError> {
        check_lines(&params.items)?;
        let total = params.total();
        Ok(Order {
            key,
            id: params.id,
            items: params.items,
            status: OrderStatus::Pending,
            timestamp: params.placed_at,
            customer_name: params.customer_name,
            total,
            order_type: params.order_type,
            is_paid: params.order_type.default_paid(),
            parent_order_key: params.parent_order_key,
        })
    }

    /// Applies the `Some` fields of the patch.
    ///
    /// Lines without a total get their total recomputed; a total that disagrees with the
    /// resulting lines is rejected.
    async fn on_update(&mut self, patch: OrderPatch, _ctx: &()) -> Result<(), OrderError> {
        if let Some(items) = patch.items {
            check_lines(&items)?;
            self.total = items_total(&items);
            self.items = items;
        }
        if let Some(total) = patch.total {
            if total != self.total {
                return Err(OrderError::validation(format!(
                    "total {} does not match items ({})",
                    total, self.total
                )));
            }
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(is_paid) = patch.is_paid {
            self.is_paid = is_paid;
        }
        if let Some(name) = patch.customer_name {
            self.customer_name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, OrderError> {
        match action {
            OrderAction::SwapItems { expected, items } => {
                if self.items != expected {
                    return Err(OrderError::Conflict(self.key.to_string()));
                }
                check_lines(&items)?;
                self.total = items_total(&items);
                self.items = items;
                Ok(self.clone())
            }
        }
    }
}
