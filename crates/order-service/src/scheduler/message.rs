//! Requests understood by the scheduler actor.

use super::error::SchedulerError;
use crate::model::OrderId;
use tokio::sync::oneshot;

pub type Reply<T> = oneshot::Sender<Result<T, SchedulerError>>;

#[derive(Debug)]
pub enum SchedulerRequest {
    Register {
        order_id: OrderId,
        respond_to: Reply<()>,
    },
    /// Replies `true` if a live task was stopped.
    Cancel {
        order_id: OrderId,
        respond_to: Reply<bool>,
    },
    IsRegistered {
        order_id: OrderId,
        respond_to: Reply<bool>,
    },
    Active {
        respond_to: Reply<Vec<OrderId>>,
    },
    /// Cancels every task and stops the actor. Replies with the number of tasks stopped.
    Shutdown {
        respond_to: Reply<usize>,
    },
}
