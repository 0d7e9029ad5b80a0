//! Plain data types for the catalog and for orders.

pub mod menu;
pub mod order;

pub use menu::*;
pub use order::*;
