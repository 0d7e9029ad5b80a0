//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (menu items, orders) implements
//! to be kept by the generic [`ResourceActor`](crate::framework::ResourceActor). It names the key
//! type, the create/update payloads, the custom actions and the error type, and exposes the
//! lifecycle hooks the actor calls while it owns the entity.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Keys
/// The actor assigns keys itself from a `u32` counter, which is why `Id: From<u32>`.
/// The key is the store-level address of the entity and is handed to
/// [`from_create_params`](ActorEntity::from_create_params) so the entity can remember it.
///
/// # Async & Context
/// Hooks are `#[async_trait]` and receive the injected `Context` (late binding of
/// dependencies through `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The store-assigned key for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The partial update applied to an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations that must run atomically inside the actor.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per resource rather than one per message: clients match on a single
    /// `OrderError` / `MenuError` type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from its key and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received. Omitted fields must be left untouched.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
