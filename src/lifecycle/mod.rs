//! # System Lifecycle
//!
//! Starting, wiring and stopping the store actors, plus logging setup.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each store's channel
//! 2. **Stores detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - [`PosSystem::shutdown`] waits for every store task
//!
//! Subscriptions end on their own once their store has stopped.

pub mod pos_system;
pub mod tracing;

pub use self::pos_system::PosSystem;
pub use self::tracing::setup_tracing;
