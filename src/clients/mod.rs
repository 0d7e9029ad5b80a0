//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Each client implements one of the store contracts from [`crate::store`].

pub mod actor_client;
pub mod menu_client;
pub mod order_client;

pub use actor_client::ActorClient;
pub use menu_client::*;
pub use order_client::*;
