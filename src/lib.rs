//! # Brew POS
//!
//! > **The ordering core of a small beverage shop.**
//!
//! Customers (or staff on their behalf) build a cart from the menu and place orders; staff
//! move orders through `pending → preparing → completed`, add drinks to orders that were
//! already served, and read revenue reports. Every staff screen works off the same order
//! store and is kept current by push subscriptions.
//!
//! ## 🏗️ Architecture
//!
//! Both stores (menu and orders) are resource actors: a single Tokio task owns the keyed
//! map and processes requests one at a time, so a request is atomic with respect to every
//! other request against that store. Callers talk to a store through a typed client that
//! implements the store contract ([`store::OrderStore`], [`store::MenuStore`]). Ordering
//! logic is written against those traits only.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic [`ResourceActor<T>`](framework::ResourceActor), its client, and the
//! [`ActorEntity`](framework::ActorEntity) trait every stored type implements.
//! [`framework::mock`] has scripted clients for failure-injection tests.
//!
//! ### 2. The Data ([`model`])
//! Menu items, order lines, orders, and the order status state machine.
//!
//! ### 3. The Stores ([`order_actor`], [`menu_actor`], [`store`], [`clients`])
//! Store-side rules (totals always match items, no empty orders, payment defaults), the
//! store contracts, the record codec, and the actor-backed clients.
//!
//! ### 4. The Shop Floor ([`cart`], [`orders`], [`revenue`])
//! - [`cart::Cart`]: lines picked before ordering.
//! - [`orders::OrderDesk`]: placing orders and every lifecycle operation.
//! - [`orders::Reconciler`]: folding a completed add-on order back into its parent.
//! - [`orders::board`]: board sorting, priority, delay and age labels.
//! - [`revenue`]: day/week/month/all-time windows, top items, per-type and per-hour views.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`PosSystem`](lifecycle::PosSystem) starts and stops the stores;
//! [`setup_tracing`](lifecycle::setup_tracing) installs logging;
//! [`PosConfig`](config::PosConfig) reads the environment.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod cart;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod orders;
pub mod revenue;
pub mod store;
