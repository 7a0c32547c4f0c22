//! Error types for the status scheduler.

use crate::model::{OrderId, StatusId};
use crate::store::StoreError;
use thiserror::Error;

/// Errors returned by scheduler operations (`register`, `cancel`, ...).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchedulerError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Status {status} of {order_id} is not part of the status sequence")]
    StatusNotInSequence { order_id: OrderId, status: StatusId },

    #[error("Status automation already running for {0}")]
    AlreadyRegistered(OrderId),

    #[error("{order_id} is already at terminal status {status}")]
    AlreadyTerminal { order_id: OrderId, status: StatusId },

    #[error("Order store error: {0}")]
    Store(StoreError),

    #[error("Scheduler closed")]
    ActorClosed,

    #[error("Scheduler dropped response channel")]
    ActorDropped,
}

impl From<StoreError> for SchedulerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(order_id) => SchedulerError::OrderNotFound(order_id),
            other => SchedulerError::Store(other),
        }
    }
}

/// Why a single tick did not advance its order. Never fatal to the task.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TickError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Status {status} of {order_id} is not part of the status sequence")]
    StatusNotInSequence { order_id: OrderId, status: StatusId },

    /// The conditional write lost to a concurrent manual change.
    #[error("Status of {order_id} changed during the tick: expected {expected}, found {actual}")]
    Conflict {
        order_id: OrderId,
        expected: StatusId,
        actual: StatusId,
    },

    #[error("Order store unavailable: {0}")]
    Store(String),
}

impl From<StoreError> for TickError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(order_id) => TickError::OrderNotFound(order_id),
            StoreError::Conflict {
                order_id,
                expected,
                actual,
            } => TickError::Conflict {
                order_id,
                expected,
                actual,
            },
            StoreError::Unavailable(reason) => TickError::Store(reason),
        }
    }
}
