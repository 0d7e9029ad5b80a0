//! Custom actions for the Order store.
//!
//! Actions run inside the store actor, so each one is atomic with respect to every other
//! request against the order store. They are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

use crate::model::OrderItem;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Replaces the order's lines (and total) only if they still equal `expected`.
    ///
    /// # Errors
    /// Fails with `OrderError::Conflict` when another writer changed the lines first, and
    /// with `OrderError::Validation` when `items` is empty.
    SwapItems {
        expected: Vec<OrderItem>,
        items: Vec<OrderItem>,
    },
}
