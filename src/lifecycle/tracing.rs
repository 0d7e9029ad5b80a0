//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! The format is compact and hides the module path (`with_target(false)`); the store actors
//! tag their events with `entity_type` instead. `RUST_LOG` takes precedence over the
//! configured filter:
//!
//! ```bash
//! RUST_LOG=info cargo run          # state changes only
//! RUST_LOG=debug cargo run         # request payloads and store traffic
//! POS_LOG_FILTER=brew_pos=debug cargo run
//! ```
//!
//! With `info`, placing an order and completing an add-on reads roughly like:
//!
//! ```text
//! INFO place_order: Created entity_type="Order" id=order_1 size=1
//! INFO place_order: Order placed key=order_1
//! INFO update_status:reconcile: Add-on merged parent_key=order_1 total=105000
//! ```

use crate::config::PosConfig;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(config: &PosConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type already says where an event comes from
        .compact() // spans inline, e.g. "update_status:reconcile"
        .init();
}
