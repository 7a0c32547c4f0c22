//! # Scheduler Client
//!
//! Cloneable handle to the [`StatusScheduler`](crate::scheduler::StatusScheduler) actor.
use crate::model::OrderId;
use crate::scheduler::{SchedulerError, SchedulerRequest};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SchedulerClient {
    sender: mpsc::Sender<SchedulerRequest>,
}

impl SchedulerClient {
    pub fn new(sender: mpsc::Sender<SchedulerRequest>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, SchedulerError>>) -> SchedulerRequest,
    ) -> Result<R, SchedulerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| SchedulerError::ActorClosed)?;
        response.await.map_err(|_| SchedulerError::ActorDropped)?
    }

    /// Starts status automation for an order, reading its current status from the store.
    #[instrument(skip(self))]
    pub async fn register(&self, order_id: OrderId) -> Result<(), SchedulerError> {
        debug!("Sending request");
        self.call(|respond_to| SchedulerRequest::Register {
            order_id,
            respond_to,
        })
        .await
    }

    /// Stops automation for an order. Returns `false` if none was running.
    ///
    /// When this returns, the order's task has exited and will not write again.
    #[instrument(skip(self))]
    pub async fn cancel(&self, order_id: OrderId) -> Result<bool, SchedulerError> {
        debug!("Sending request");
        self.call(|respond_to| SchedulerRequest::Cancel {
            order_id,
            respond_to,
        })
        .await
    }

    pub async fn is_registered(&self, order_id: OrderId) -> Result<bool, SchedulerError> {
        self.call(|respond_to| SchedulerRequest::IsRegistered {
            order_id,
            respond_to,
        })
        .await
    }

    /// Orders with a live task, ascending.
    pub async fn active_orders(&self) -> Result<Vec<OrderId>, SchedulerError> {
        self.call(|respond_to| SchedulerRequest::Active { respond_to })
            .await
    }

    /// Cancels every task and stops the scheduler. Returns how many tasks were stopped.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<usize, SchedulerError> {
        debug!("Sending request");
        self.call(|respond_to| SchedulerRequest::Shutdown { respond_to })
            .await
    }
}
