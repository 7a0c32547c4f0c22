use actor_framework::ActorClient;
use order_service::clients::{OrderClient, SchedulerClient};
use order_service::model::{NewOrder, OrderId, PlateId, StatusId, StatusSequence, UserId};
use order_service::order_actor::{self, OrderError};
use order_service::scheduler::{SchedulerError, SchedulerRequest};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Real Order actor, scheduler played by the test.
///
/// The test reads scheduler requests off the raw channel and answers them itself, so it can
/// check what the client asks for and inject scheduler failures.
fn setup() -> (OrderClient, mpsc::Receiver<SchedulerRequest>) {
    let (actor, store) = order_actor::new(10);
    tokio::spawn(actor.run(()));
    let (sender, receiver) = mpsc::channel(10);
    let client = OrderClient::new(
        store,
        SchedulerClient::new(sender),
        Arc::new(StatusSequence::standard()),
    );
    (client, receiver)
}

fn new_order() -> NewOrder {
    NewOrder {
        user_id: UserId(3),
        details: "no ice".to_string(),
        plates: vec![PlateId(5)],
        total_value: 9.5,
    }
}

#[tokio::test]
async fn test_create_order_registers_stored_order() {
    let (client, mut scheduler) = setup();

    let creating = {
        let client = client.clone();
        tokio::spawn(async move { client.create_order(new_order()).await })
    };

    match scheduler.recv().await {
        Some(SchedulerRequest::Register {
            order_id,
            respond_to,
        }) => {
            // The order is already stored at the first status when registration happens.
            let order = client.get(order_id).await.unwrap().expect("Order not stored");
            assert_eq!(order.status, StatusId::RECEIVED);
            assert_eq!(order.user_id, UserId(3));
            respond_to.send(Ok(())).unwrap();
        }
        other => panic!("Expected Register request, got {other:?}"),
    }

    let id = creating.await.unwrap().unwrap();
    assert_eq!(id, OrderId(1));
}

#[tokio::test]
async fn test_failed_registration_is_reported() {
    let (client, mut scheduler) = setup();

    let creating = {
        let client = client.clone();
        tokio::spawn(async move { client.create_order(new_order()).await })
    };

    let Some(SchedulerRequest::Register {
        order_id,
        respond_to,
    }) = scheduler.recv().await
    else {
        panic!("Expected Register request");
    };
    respond_to
        .send(Err(SchedulerError::AlreadyRegistered(order_id)))
        .unwrap();

    let result = creating.await.unwrap();
    assert_eq!(
        result,
        Err(OrderError::Automation(SchedulerError::AlreadyRegistered(
            order_id
        )))
    );
    // The order itself was stored.
    assert!(client.exists(order_id).await.unwrap());
}

#[tokio::test]
async fn test_delete_order_cancels_after_removing() {
    let (client, mut scheduler) = setup();

    let creating = {
        let client = client.clone();
        tokio::spawn(async move { client.create_order(new_order()).await })
    };
    if let Some(SchedulerRequest::Register { respond_to, .. }) = scheduler.recv().await {
        respond_to.send(Ok(())).unwrap();
    }
    let id = creating.await.unwrap().unwrap();

    let deleting = {
        let client = client.clone();
        tokio::spawn(async move { client.delete_order(id).await })
    };
    match scheduler.recv().await {
        Some(SchedulerRequest::Cancel {
            order_id,
            respond_to,
        }) => {
            assert_eq!(order_id, id);
            assert!(!client.exists(id).await.unwrap());
            respond_to.send(Ok(true)).unwrap();
        }
        other => panic!("Expected Cancel request, got {other:?}"),
    }
    deleting.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_delete_of_missing_order_still_cancels() {
    let (client, mut scheduler) = setup();

    let deleting = {
        let client = client.clone();
        tokio::spawn(async move { client.delete_order(OrderId(404)).await })
    };
    match scheduler.recv().await {
        Some(SchedulerRequest::Cancel {
            order_id,
            respond_to,
        }) => {
            assert_eq!(order_id, OrderId(404));
            respond_to.send(Ok(true)).unwrap();
        }
        other => panic!("Expected Cancel request, got {other:?}"),
    }
    assert!(matches!(
        deleting.await.unwrap(),
        Err(OrderError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_scheduler_gone_surfaces_as_automation_error() {
    let (client, scheduler) = setup();
    drop(scheduler);

    let result = client.create_order(new_order()).await;
    assert_eq!(
        result,
        Err(OrderError::Automation(SchedulerError::ActorClosed))
    );
}
