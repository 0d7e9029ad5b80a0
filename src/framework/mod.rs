//! Generic in-process resource store.
//!
//! This module provides the building blocks the menu and order stores are made of:
//! a keyed entity map owned by a single task, a cloneable client that talks to it over
//! channels, and a snapshot feed for push-based subscriptions.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored resource types implement
//! - [`ResourceActor`] - Generic actor that owns and mutates entities
//! - [`ResourceClient`] - Typed client for sending requests to an actor
//! - [`FrameworkError`] - Plumbing errors (closed actor, missing key, entity rejection)
//!
//! # Testing
//!
//! See [`mock`] for scripted clients that stand in for a running actor.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
