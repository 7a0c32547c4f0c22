//! # Order Store Adapter
//!
//! The narrow view of persistence the status scheduler depends on: read one order's
//! status and write it, optionally conditional on the value last read.
//!
//! [`OrderStore`] is implemented for `ResourceClient<Order>`, so the live order actor and
//! [`MockClient`](actor_framework::mock::MockClient) both plug in without adapters.

use crate::model::{Order, OrderId, StatusId};
use crate::order_actor::{OrderAction, OrderActionResult};
use actor_framework::{FrameworkError, ResourceClient};
use async_trait::async_trait;
use thiserror::Error;

/// Failures of a single store call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// A conditional write found a status other than the one expected.
    #[error("Status of {order_id} changed concurrently: expected {expected}, found {actual}")]
    Conflict {
        order_id: OrderId,
        expected: StatusId,
        actual: StatusId,
    },

    /// Transient failure; the call may succeed if retried later.
    #[error("Order store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    fn from_framework(order_id: OrderId, e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(_) => StoreError::NotFound(order_id),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Persistence contract of the status scheduler.
///
/// No atomicity is assumed between a `get_status` and a later write; `set_status_if` is the
/// only way to detect that someone else wrote in between.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get_status(&self, order_id: OrderId) -> Result<StatusId, StoreError>;

    async fn set_status(&self, order_id: OrderId, status: StatusId) -> Result<(), StoreError>;

    /// Writes `status` only if the stored status is still `expected`.
    async fn set_status_if(
        &self,
        order_id: OrderId,
        expected: StatusId,
        status: StatusId,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl OrderStore for ResourceClient<Order> {
    async fn get_status(&self, order_id: OrderId) -> Result<StatusId, StoreError> {
        match self.get(order_id).await {
            Ok(Some(order)) => Ok(order.status),
            Ok(None) => Err(StoreError::NotFound(order_id)),
            Err(e) => Err(StoreError::from_framework(order_id, e)),
        }
    }

    async fn set_status(&self, order_id: OrderId, status: StatusId) -> Result<(), StoreError> {
        self.perform_action(order_id, OrderAction::SetStatus(status))
            .await
            .map(|_| ())
            .map_err(|e| StoreError::from_framework(order_id, e))
    }

    async fn set_status_if(
        &self,
        order_id: OrderId,
        expected: StatusId,
        status: StatusId,
    ) -> Result<(), StoreError> {
        let action = OrderAction::CompareAndSetStatus { expected, status };
        match self.perform_action(order_id, action).await {
            Ok(OrderActionResult::Written { .. }) => Ok(()),
            Ok(OrderActionResult::Conflict { actual }) => Err(StoreError::Conflict {
                order_id,
                expected,
                actual,
            }),
            Err(e) => Err(StoreError::from_framework(order_id, e)),
        }
    }
}
