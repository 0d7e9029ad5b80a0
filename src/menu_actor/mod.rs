//! # Menu Store Actor
//!
//! The drink catalog. Items are created, edited and removed only through menu management;
//! order lines keep a copy of the item as it was when ordered.
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MenuClient;
use crate::framework::ResourceActor;
use crate::model::MenuItem;

/// Creates a new Menu actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, MenuClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, MenuClient::new(generic_client))
}
