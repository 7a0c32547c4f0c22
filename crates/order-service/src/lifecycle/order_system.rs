use crate::clients::{OrderClient, SchedulerClient};
use crate::config::ServiceConfig;
use crate::order_actor;
use crate::scheduler::{SchedulerError, StatusScheduler};
use crate::store::OrderStore;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Failures while stopping the system.
#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Scheduler did not stop cleanly: {0}")]
    Scheduler(#[from] SchedulerError),
    #[error("Actor task failed: {0}")]
    Task(#[from] JoinError),
}

/// Runtime orchestrator: the order store actor, the status scheduler and their clients.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(ServiceConfig::default());
///
/// let order_id = system.order_client.create_order(new_order).await?;
/// // ... status advances on its own every tick ...
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub scheduler_client: SchedulerClient,
    /// Scheduler first, then the store it reads from.
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns every actor and wires the clients. Must be called inside a Tokio runtime.
    pub fn new(config: ServiceConfig) -> Self {
        let capacity = config.actors.channel_capacity;

        // 1. Create actors
        let (order_actor, store_client) = order_actor::new(capacity);
        let store: Arc<dyn OrderStore> = Arc::new(store_client.clone());
        let (scheduler, scheduler_client) =
            StatusScheduler::new(&config.scheduler, store, capacity);

        // 2. Start them
        let order_handle = tokio::spawn(order_actor.run(()));
        let scheduler_handle = tokio::spawn(scheduler.run());

        let order_client = OrderClient::new(
            store_client,
            scheduler_client.clone(),
            Arc::new(config.scheduler.statuses),
        );

        Self {
            order_client,
            scheduler_client,
            handles: vec![scheduler_handle, order_handle],
        }
    }

    /// Stops all status automation, then closes every channel and waits for the actors.
    ///
    /// Clones of the clients handed out earlier keep the store actor alive; drop them first.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");

        let stopped = self.scheduler_client.shutdown().await?;
        info!(stopped, "Status automation stopped");

        drop(self.order_client);
        drop(self.scheduler_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
