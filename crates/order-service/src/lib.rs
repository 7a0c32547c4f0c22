//! # Order Service
//!
//! Order backend built on [`actor_framework`]: orders live in a resource actor, and a
//! status scheduler moves each one through a configurable status sequence on a timer,
//! tolerating manual status changes made in between.
//!
//! - [`model`]: orders, ids and the [`StatusSequence`](model::StatusSequence).
//! - [`order_actor`]: the order store as an [`ActorEntity`](actor_framework::ActorEntity).
//! - [`store`]: the [`OrderStore`](store::OrderStore) view the scheduler depends on.
//! - [`scheduler`]: per-order status automation.
//! - [`clients`]: typed handles for callers.
//! - [`config`]: TOML configuration.
//! - [`lifecycle`]: [`OrderSystem`](lifecycle::OrderSystem), which starts and stops it all.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod scheduler;
pub mod store;
