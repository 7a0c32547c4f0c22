//! The scheduler actor: owns the registry of running status tasks.

use super::error::SchedulerError;
use super::message::SchedulerRequest;
use super::task::{StatusTask, TaskExit};
use crate::clients::SchedulerClient;
use crate::config::SchedulerConfig;
use crate::model::{OrderId, StatusSequence};
use crate::store::OrderStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// A running task and the means to stop it.
struct TaskHandle {
    /// Distinguishes this task from earlier ones registered for the same order.
    generation: u64,
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Sent by a task that ended on its own.
type FinishedNotice = (OrderId, u64);

/// Registry of per-order status tasks.
///
/// Like a [`ResourceActor`](actor_framework::ResourceActor), the registry is touched only
/// by this actor's message loop, so it needs no lock. Tasks that end on their own (terminal
/// status written, order gone) report back on a separate channel, which the loop drains
/// before serving the next request.
pub struct StatusScheduler {
    receiver: mpsc::Receiver<SchedulerRequest>,
    finished_tx: mpsc::UnboundedSender<FinishedNotice>,
    finished_rx: mpsc::UnboundedReceiver<FinishedNotice>,
    store: Arc<dyn OrderStore>,
    sequence: Arc<StatusSequence>,
    period: Duration,
    cancel_on_missing_order: bool,
    tasks: HashMap<OrderId, TaskHandle>,
    next_generation: u64,
}

impl StatusScheduler {
    /// Creates the scheduler and its client. Nothing runs until [`run`](Self::run) is spawned.
    pub fn new(
        config: &SchedulerConfig,
        store: Arc<dyn OrderStore>,
        buffer_size: usize,
    ) -> (Self, SchedulerClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (finished_tx, finished_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            receiver,
            finished_tx,
            finished_rx,
            store,
            sequence: Arc::new(config.statuses.clone()),
            period: config.tick_interval(),
            cancel_on_missing_order: config.cancel_on_missing_order,
            tasks: HashMap::new(),
            next_generation: 0,
        };
        (scheduler, SchedulerClient::new(sender))
    }

    /// Serves requests until `Shutdown` arrives or every client is dropped, then cancels
    /// all remaining tasks.
    pub async fn run(mut self) {
        info!(
            sequence = %self.sequence,
            period_secs = self.period.as_secs_f64(),
            "Scheduler started"
        );

        loop {
            tokio::select! {
                biased;
                Some((order_id, generation)) = self.finished_rx.recv() => {
                    self.release(order_id, generation);
                }
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else { break };
                    if !self.handle(msg).await {
                        break;
                    }
                }
            }
        }

        let stopped = self.cancel_all().await;
        info!(stopped, "Scheduler shutdown");
    }

    /// Returns `false` once the loop should stop.
    async fn handle(&mut self, msg: SchedulerRequest) -> bool {
        match msg {
            SchedulerRequest::Register {
                order_id,
                respond_to,
            } => {
                let _ = respond_to.send(self.register(order_id).await);
            }
            SchedulerRequest::Cancel {
                order_id,
                respond_to,
            } => {
                let _ = respond_to.send(Ok(self.cancel(order_id).await));
            }
            SchedulerRequest::IsRegistered {
                order_id,
                respond_to,
            } => {
                let _ = respond_to.send(Ok(self.tasks.contains_key(&order_id)));
            }
            SchedulerRequest::Active { respond_to } => {
                let mut active: Vec<OrderId> = self.tasks.keys().copied().collect();
                active.sort();
                let _ = respond_to.send(Ok(active));
            }
            SchedulerRequest::Shutdown { respond_to } => {
                let stopped = self.cancel_all().await;
                let _ = respond_to.send(Ok(stopped));
                return false;
            }
        }
        true
    }

    async fn register(&mut self, order_id: OrderId) -> Result<(), SchedulerError> {
        if self.tasks.contains_key(&order_id) {
            return Err(SchedulerError::AlreadyRegistered(order_id));
        }

        let status = self.store.get_status(order_id).await?;
        let index = self
            .sequence
            .index_of(status)
            .ok_or(SchedulerError::StatusNotInSequence { order_id, status })?;
        if self.sequence.is_terminal(status) {
            return Err(SchedulerError::AlreadyTerminal { order_id, status });
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        let (cancel, cancel_rx) = oneshot::channel();
        let run = StatusTask::new(order_id, index).run(
            self.store.clone(),
            self.sequence.clone(),
            self.period,
            self.cancel_on_missing_order,
            cancel_rx,
        );
        let finished = self.finished_tx.clone();
        let handle = tokio::spawn(async move {
            if run.await == TaskExit::Finished {
                let _ = finished.send((order_id, generation));
            }
        });

        self.tasks.insert(
            order_id,
            TaskHandle {
                generation,
                cancel,
                handle,
            },
        );
        info!(%order_id, %status, active = self.tasks.len(), "Task registered");
        Ok(())
    }

    /// Stops a task and waits for it, so no tick of it runs after this returns.
    async fn cancel(&mut self, order_id: OrderId) -> bool {
        let Some(task) = self.tasks.remove(&order_id) else {
            debug!(%order_id, "Cancel for inactive order ignored");
            return false;
        };
        Self::stop(order_id, task).await;
        info!(%order_id, active = self.tasks.len(), "Task cancelled");
        true
    }

    async fn cancel_all(&mut self) -> usize {
        let tasks: Vec<(OrderId, TaskHandle)> = self.tasks.drain().collect();
        let count = tasks.len();
        for (order_id, task) in tasks {
            Self::stop(order_id, task).await;
        }
        count
    }

    async fn stop(order_id: OrderId, task: TaskHandle) {
        // The task may already have finished and dropped its receiver.
        let _ = task.cancel.send(());
        if let Err(e) = task.handle.await {
            error!(%order_id, error = %e, "Status task failed");
        }
    }

    /// Drops the entry of a task that ended on its own. Notices from a task that was
    /// cancelled and replaced in the meantime are ignored.
    fn release(&mut self, order_id: OrderId, generation: u64) {
        if self
            .tasks
            .get(&order_id)
            .is_some_and(|task| task.generation == generation)
        {
            self.tasks.remove(&order_id);
            debug!(%order_id, active = self.tasks.len(), "Released finished task");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderCreate, PlateId, StatusId, UserId};
    use crate::order_actor;

    #[tokio::test(start_paused = true)]
    async fn test_finished_task_reports_back_without_a_request() {
        let (actor, store) = order_actor::new(8);
        tokio::spawn(actor.run(()));
        let id = store
            .create(OrderCreate {
                user_id: UserId(1),
                details: String::new(),
                plates: vec![PlateId(1)],
                total_value: 5.0,
                status: StatusId::PREPARING,
            })
            .await
            .unwrap();

        let config = SchedulerConfig::default();
        let (mut scheduler, _client) = StatusScheduler::new(&config, Arc::new(store.clone()), 8);
        scheduler.register(id).await.unwrap();
        assert!(scheduler.tasks.contains_key(&id));

        // One tick writes the terminal status; the task announces its exit by itself.
        let notice = scheduler.finished_rx.recv().await.unwrap();
        assert_eq!(notice, (id, 0));
        assert_eq!(store.get_status(id).await, Ok(StatusId::READY));

        scheduler.release(notice.0, notice.1);
        assert!(scheduler.tasks.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_notice_keeps_newer_task() {
        let (actor, store) = order_actor::new(8);
        tokio::spawn(actor.run(()));
        let id = store
            .create(OrderCreate {
                user_id: UserId(1),
                details: String::new(),
                plates: vec![PlateId(1)],
                total_value: 5.0,
                status: StatusId::RECEIVED,
            })
            .await
            .unwrap();

        let config = SchedulerConfig::default();
        let (mut scheduler, _client) = StatusScheduler::new(&config, Arc::new(store), 8);
        scheduler.register(id).await.unwrap();
        assert!(scheduler.cancel(id).await);
        scheduler.register(id).await.unwrap();

        scheduler.release(id, 0);
        assert!(scheduler.tasks.contains_key(&id));
        assert_eq!(scheduler.cancel_all().await, 1);
    }
}
