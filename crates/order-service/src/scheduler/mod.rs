//! # Order Status Scheduler
//!
//! Moves orders through the configured [`StatusSequence`](crate::model::StatusSequence)
//! on a timer. Every registered order gets its own Tokio task that wakes once per period,
//! reconciles with the persisted status, and writes the next one. The task stops itself
//! after writing the terminal status.
//!
//! ## Components
//!
//! - [`StatusScheduler`]: actor owning the registry of running tasks.
//! - [`SchedulerClient`](crate::clients::SchedulerClient): handle used to register,
//!   cancel and inspect tasks.
//! - [`StatusTask`]: per-order bookkeeping and the tick algorithm.
//!
//! ## Manual changes
//!
//! Status changes made through [`OrderClient`](crate::clients::OrderClient) bypass the
//! scheduler. A task notices them on its next tick, when the store no longer holds the
//! status it wrote last, and continues from the new position. Writes are conditional on
//! the status read at the start of the tick, so a change landing mid-tick is reported as
//! [`TickError::Conflict`] instead of being overwritten.

mod actor;
mod error;
mod message;
mod task;

pub use actor::StatusScheduler;
pub use error::{SchedulerError, TickError};
pub use message::SchedulerRequest;
pub use task::{StatusTask, TaskExit, TickOutcome};
