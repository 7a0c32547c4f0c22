//! Error types for the Order actor and its client.

use crate::model::StatusId;
use crate::scheduler::SchedulerError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid or incomplete.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// A manual status change named a status outside the sequence.
    #[error("Invalid status: {0}")]
    InvalidStatus(StatusId),

    /// The order was stored but its status automation could not be started or stopped.
    #[error("Status automation error: {0}")]
    Automation(#[from] SchedulerError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
