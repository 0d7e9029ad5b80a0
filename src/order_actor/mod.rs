//! # Order Store Actor
//!
//! Holds every order of the shop and applies the store-side order rules.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] and its [`ErrorKind`] classification
//! - [`actions`] - [`OrderAction`], the conditional line swap used by reconciliation
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, orders) = order_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let key = orders.create_order(NewOrder::new(items, "", OrderType::Takeaway, Utc::now())).await?;
//! let placed = orders.fetch_order(key).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
