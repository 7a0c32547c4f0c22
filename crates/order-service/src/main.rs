//! # Order Service
//!
//! Starts the order store and the status scheduler, places one demo order and keeps
//! running until Ctrl-C, so the order can be watched moving through its statuses.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ORDER_SERVICE_CONFIG=crates/order-service/config/order-service.toml cargo run
//! ```

use actor_framework::tracing::setup_tracing;
use order_service::config::ServiceConfig;
use order_service::lifecycle::OrderSystem;
use order_service::model::{NewOrder, PlateId, UserId};
use std::error::Error;
use tracing::{error, info, Instrument};

const CONFIG_ENV: &str = "ORDER_SERVICE_CONFIG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!(%path, "Loading configuration");
            ServiceConfig::from_file(&path).await?
        }
        Err(_) => ServiceConfig::default(),
    };
    info!(
        sequence = %config.scheduler.statuses,
        tick_interval_secs = config.scheduler.tick_interval_secs,
        "Starting order service"
    );

    let system = OrderSystem::new(config);

    let demo = NewOrder {
        user_id: UserId(1),
        details: "No onions, please".to_string(),
        plates: vec![PlateId(1), PlateId(2)],
        total_value: 74.5,
    };

    let span = tracing::info_span!("order_processing");
    let placed = async {
        info!("Placing demo order");
        system.order_client.create_order(demo).await
    }
    .instrument(span)
    .await;

    match placed {
        Ok(order_id) => info!(%order_id, "Demo order placed, waiting for status changes"),
        Err(e) => error!(error = %e, "Demo order failed"),
    }

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
