//! One order under automation: its bookkeeping, the tick algorithm, and the timer loop.

use super::error::TickError;
use crate::model::{OrderId, StatusId, StatusSequence};
use crate::store::{OrderStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Result of a tick that wrote a new status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Wrote a non-terminal status; the task keeps running.
    Advanced(StatusId),
    /// Wrote the terminal status; the task is finished.
    Completed(StatusId),
}

/// Why a task's loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskExit {
    /// Stopped from outside through the cancel channel.
    Cancelled,
    /// Ended on its own: terminal status written, or the order is gone.
    Finished,
}

/// Scheduler-side state for one order.
///
/// `tracked_index` is the scheduler's belief of where the order sits in the sequence and
/// `last_written` the status it wrote itself. When the store disagrees with `last_written`,
/// somebody else changed the order and the position is re-derived from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTask {
    order_id: OrderId,
    tracked_index: usize,
    last_written: Option<StatusId>,
    resync_pending: bool,
    cancelled: bool,
}

impl StatusTask {
    pub fn new(order_id: OrderId, tracked_index: usize) -> Self {
        Self {
            order_id,
            tracked_index,
            last_written: None,
            resync_pending: false,
            cancelled: false,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn tracked_index(&self) -> usize {
        self.tracked_index
    }

    pub fn last_written(&self) -> Option<StatusId> {
        self.last_written
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Reconcile with the store and move the order one step forward.
    ///
    /// On any error the task's position is left as it was, so the next tick retries the
    /// same step. A lost conditional write additionally forces a resync on the next tick.
    pub async fn tick(
        &mut self,
        store: &dyn OrderStore,
        sequence: &StatusSequence,
    ) -> Result<TickOutcome, TickError> {
        debug_assert!(!self.cancelled, "tick on a finished task");
        let order_id = self.order_id;
        let persisted = store.get_status(order_id).await?;

        // A foreign status is never advanced, even before the first write.
        let index = sequence
            .index_of(persisted)
            .ok_or(TickError::StatusNotInSequence {
                order_id,
                status: persisted,
            })?;

        let drifted = self.last_written.is_some_and(|written| written != persisted);
        if drifted || self.resync_pending {
            debug!(%order_id, status = %persisted, from = self.tracked_index, to = index, "Resynchronized with store");
            self.tracked_index = index;
            self.resync_pending = false;
        }

        let next_index = sequence.next(self.tracked_index);
        let next = sequence.value_at(next_index);

        if let Err(e) = store.set_status_if(order_id, persisted, next).await {
            if matches!(e, StoreError::Conflict { .. }) {
                self.resync_pending = true;
            }
            return Err(e.into());
        }

        self.tracked_index = next_index;
        self.last_written = Some(next);

        if sequence.is_terminal(next) {
            self.cancelled = true;
            return Ok(TickOutcome::Completed(next));
        }
        Ok(TickOutcome::Advanced(next))
    }

    /// Tick every `period` until the terminal status is written or `cancel` fires.
    ///
    /// The first tick happens one full period after the call. A dropped `cancel` sender
    /// counts as cancellation, so dropping the registry stops every task. Cancellation is
    /// only observed between ticks: a tick that has started always finishes.
    pub(crate) async fn run(
        mut self,
        store: Arc<dyn OrderStore>,
        sequence: Arc<StatusSequence>,
        period: Duration,
        cancel_on_missing_order: bool,
        mut cancel: oneshot::Receiver<()>,
    ) -> TaskExit {
        let order_id = self.order_id;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    debug!(%order_id, "Task cancelled");
                    return TaskExit::Cancelled;
                }
                _ = ticker.tick() => {}
            }

            match self.tick(store.as_ref(), &sequence).await {
                Ok(TickOutcome::Advanced(status)) => {
                    info!(%order_id, %status, "Status advanced");
                }
                Ok(TickOutcome::Completed(status)) => {
                    info!(%order_id, %status, "Terminal status reached, task finished");
                    return TaskExit::Finished;
                }
                Err(TickError::OrderNotFound(_)) if cancel_on_missing_order => {
                    warn!(%order_id, "Order is gone, stopping automation");
                    self.cancelled = true;
                    return TaskExit::Finished;
                }
                Err(e) => {
                    warn!(%order_id, error = %e, "Tick failed, retrying next period");
                }
            }
        }
    }
}
