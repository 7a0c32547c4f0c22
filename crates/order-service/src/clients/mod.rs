//! # Typed Clients
//!
//! Handles the rest of the application uses instead of raw channels.
//!
//! - [`OrderClient`] wraps the order store and keeps automation in step with it.
//! - [`SchedulerClient`] talks to the status scheduler.

pub mod order_client;
pub mod scheduler_client;

pub use order_client::OrderClient;
pub use scheduler_client::SchedulerClient;
