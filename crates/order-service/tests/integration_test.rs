use actor_framework::ActorClient;
use order_service::config::ServiceConfig;
use order_service::lifecycle::OrderSystem;
use order_service::model::{NewOrder, OrderId, OrderQuery, PlateId, StatusId, UserId};
use order_service::order_actor::OrderError;
use std::time::Duration;

fn new_order(user: u32, plates: &[u32]) -> NewOrder {
    NewOrder {
        user_id: UserId(user),
        details: "table 4".to_string(),
        plates: plates.iter().copied().map(PlateId).collect(),
        total_value: 18.0 * plates.len() as f64,
    }
}

/// Full end-to-end test with the real store and scheduler.
#[tokio::test]
async fn test_full_order_system_integration() {
    let system = OrderSystem::new(ServiceConfig::default());
    let orders = &system.order_client;

    let first = orders
        .create_order(new_order(1, &[1, 2]))
        .await
        .expect("Failed to create order");
    let second = orders
        .create_order(new_order(2, &[3]))
        .await
        .expect("Failed to create order");

    let stored = orders
        .get(first)
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(stored.status, StatusId::RECEIVED);
    assert_eq!(stored.plates, vec![PlateId(1), PlateId(2)]);
    assert_eq!(stored.code.len(), 6);
    assert_eq!(
        system.scheduler_client.active_orders().await.unwrap(),
        vec![first, second]
    );

    // Listing
    let all = orders.list_orders(OrderQuery::All).await.unwrap();
    assert_eq!(all.len(), 2);
    let mine = orders
        .list_orders(OrderQuery::ForUser(UserId(2)))
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, second);

    // Manual override
    let updated = orders
        .update_status(first, StatusId::PREPARING)
        .await
        .unwrap();
    assert_eq!(updated.status, StatusId::PREPARING);
    assert_eq!(
        orders.update_status(first, StatusId(42)).await,
        Err(OrderError::InvalidStatus(StatusId(42)))
    );
    assert!(matches!(
        orders.update_status(OrderId(99), StatusId::READY).await,
        Err(OrderError::NotFound(_))
    ));

    // Deletion stops automation
    orders.delete_order(first).await.unwrap();
    assert!(orders.get(first).await.unwrap().is_none());
    assert!(!system.scheduler_client.is_registered(first).await.unwrap());
    assert!(matches!(
        orders.delete_order(first).await,
        Err(OrderError::NotFound(_))
    ));

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_order_without_plates_is_rejected() {
    let system = OrderSystem::new(ServiceConfig::default());

    let result = system.order_client.create_order(new_order(1, &[])).await;
    assert!(matches!(result, Err(OrderError::Validation(_))));
    assert!(system
        .order_client
        .list_orders(OrderQuery::All)
        .await
        .unwrap()
        .is_empty());
    assert!(system
        .scheduler_client
        .active_orders()
        .await
        .unwrap()
        .is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_custom_sequence_from_config() {
    let config: ServiceConfig = r#"
        [scheduler]
        tick_interval_secs = 1
        statuses = [10, 20]
    "#
    .parse()
    .unwrap();
    assert_eq!(config.scheduler.tick_interval(), Duration::from_secs(1));
    let system = OrderSystem::new(config);
    let orders = &system.order_client;

    let id = orders.create_order(new_order(1, &[1])).await.unwrap();
    assert_eq!(orders.get(id).await.unwrap().unwrap().status, StatusId(10));
    assert_eq!(
        orders.update_status(id, StatusId::READY).await,
        Err(OrderError::InvalidStatus(StatusId::READY))
    );

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(orders.get(id).await.unwrap().unwrap().status, StatusId(20));
    assert!(!system.scheduler_client.is_registered(id).await.unwrap());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_with_orders_in_flight() {
    let system = OrderSystem::new(ServiceConfig::default());
    for user in 1..=5 {
        system
            .order_client
            .create_order(new_order(user, &[1]))
            .await
            .unwrap();
    }
    assert_eq!(
        system.scheduler_client.active_orders().await.unwrap().len(),
        5
    );

    system.shutdown().await.expect("Shutdown failed");
}
