//! # Tracing Setup
//!
//! Every actor logs through `tracing` with structured fields (`entity_type`, `id`, `size`,
//! `error`), and the domain crates add their own (`order_id`, `status`). This module installs
//! the subscriber that prints them.
//!
//! ```bash
//! RUST_LOG=info cargo run                          # lifecycle and transitions
//! RUST_LOG=debug cargo run                         # full request payloads
//! RUST_LOG=order_service::scheduler=debug cargo run
//! ```
//!
//! Typical output for one order under automation:
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Task registered order_id=order_1 status=Received
//! INFO Status advanced order_id=order_1 status=Preparing
//! INFO Status advanced order_id=order_1 status=Ready
//! INFO Terminal status reached, task finished order_id=order_1 status=Ready
//! ```

use tracing_subscriber::EnvFilter;

/// Installs a compact fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Module paths are hidden; the structured fields already say which actor or order a line
/// belongs to. Calling this twice panics, as the global subscriber can only be set once.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
