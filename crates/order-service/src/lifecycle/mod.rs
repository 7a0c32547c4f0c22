//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors that make up the service.
//!
//! ## Wiring
//!
//! The order store comes first because the scheduler reads and writes through it. The
//! scheduler gets the store as an [`OrderStore`](crate::store::OrderStore) trait object, and
//! the [`OrderClient`](crate::clients::OrderClient) gets both the raw store client and a
//! [`SchedulerClient`](crate::clients::SchedulerClient):
//!
//! ```text
//!   OrderClient ──create/update/delete──▶ Order actor ◀──get/set_status_if── status tasks
//!        │                                                                      ▲
//!        └────────register/cancel───────▶ StatusScheduler ──spawns/cancels──────┘
//! ```
//!
//! ## Shutdown
//!
//! 1. `Shutdown` to the scheduler cancels every status task and waits for them.
//! 2. The scheduler loop exits and drops its store handle.
//! 3. Dropping the remaining clients closes the store's channel and its loop exits.
//! 4. Every actor task is awaited; a panic in any of them is reported as an error.
//!
//! Tasks never hold a scheduler client, so the dependency graph is acyclic and the
//! store closes as soon as the last client goes.

pub mod order_system;

pub use order_system::*;
