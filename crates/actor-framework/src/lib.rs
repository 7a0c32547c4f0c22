//! # Actor Framework
//!
//! A small toolkit for resource-oriented actors on Tokio. One [`ResourceActor`] owns every
//! record of one entity type and serves CRUD, existence, listing and custom actions over a
//! channel; [`ResourceClient`] is the cloneable sending half.
//!
//! ## Building Blocks
//!
//! - [`ActorEntity`] - the contract a record type implements (ids, payloads, hooks, errors).
//! - [`ResourceActor`] - the sequential message loop that owns the records.
//! - [`ResourceClient`] - async request/response API over `mpsc` + `oneshot`.
//! - [`ActorClient`] - base trait for domain clients wrapping a `ResourceClient`.
//! - [`FrameworkError`] - plumbing failures (`ActorClosed`, `NotFound`, ...).
//! - [`mock`] - scripted and receiver-driven mocks for tests.
//! - [`tracing`](mod@tracing) - subscriber setup shared by binaries.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task.
//! - Requests to one actor are processed **sequentially**, so writes to the same record are
//!   applied in arrival order without locks.
//! - Different actors run in parallel.
//! - Dropping every client closes the channel and ends the actor's loop.
//!
//! ## Wiring
//!
//! Dependencies are passed to [`ResourceActor::run`] rather than to `new`, so actors can be
//! created first and wired afterwards:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = ResourceActor::<Order>::new(32);
//! let handle = tokio::spawn(order_actor.run(()));
//! // hand `order_client` clones to whoever needs the store
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
