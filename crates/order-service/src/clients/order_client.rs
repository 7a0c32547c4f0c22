//! # Order Client
//!
//! High-level API over the order store. Placing an order also starts its status
//! automation; deleting one stops it. [`OrderClient::update_status`] is the manual
//! override path: it writes straight to the store and leaves the scheduler to notice.
use crate::clients::SchedulerClient;
use crate::model::{
    NewOrder, Order, OrderCreate, OrderId, OrderQuery, OrderUpdate, StatusId, StatusSequence,
};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    scheduler: SchedulerClient,
    sequence: Arc<StatusSequence>,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        scheduler: SchedulerClient,
        sequence: Arc<StatusSequence>,
    ) -> Self {
        Self {
            inner,
            scheduler,
            sequence,
        }
    }

    /// The sequence orders move through.
    pub fn sequence(&self) -> &StatusSequence {
        &self.sequence
    }

    /// Stores the order at the first status of the sequence and registers it for automation.
    ///
    /// If registration fails the order stays stored without automation and the error is
    /// returned as [`OrderError::Automation`].
    #[instrument(skip(self, order), fields(user_id = %order.user_id))]
    pub async fn create_order(&self, order: NewOrder) -> Result<OrderId, OrderError> {
        debug!(?order, "Sending request");
        let params = OrderCreate {
            user_id: order.user_id,
            details: order.details,
            plates: order.plates,
            total_value: order.total_value,
            status: self.sequence.first(),
        };
        let order_id = self.inner.create(params).await.map_err(Self::map_error)?;

        if let Err(e) = self.scheduler.register(order_id).await {
            warn!(%order_id, error = %e, "Order stored without status automation");
            return Err(e.into());
        }
        info!(%order_id, "Order placed");
        Ok(order_id)
    }

    /// Orders visible to `query`, ordered by id.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, query: OrderQuery) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let orders = self.inner.list().await.map_err(Self::map_error)?;
        Ok(orders.into_iter().filter(|o| query.matches(o)).collect())
    }

    /// Manual status change. The status must belong to the sequence.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: OrderId,
        status: StatusId,
    ) -> Result<Order, OrderError> {
        if !self.sequence.contains(status) {
            warn!(%status, "Rejected status outside the sequence");
            return Err(OrderError::InvalidStatus(status));
        }
        debug!("Sending request");
        let update = OrderUpdate {
            status: Some(status),
            ..OrderUpdate::default()
        };
        self.inner
            .update(order_id, update)
            .await
            .map_err(Self::map_error)
    }

    /// Removes the order, then stops its automation before returning.
    ///
    /// The task is cancelled even when the order was already gone from the store, so an
    /// order deleted behind the client's back still has its task released here. The
    /// delete error is reported after the cancel.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId) -> Result<(), OrderError> {
        debug!("Sending request");
        let deleted = self.inner.delete(order_id).await.map_err(Self::map_error);
        let stopped = self.scheduler.cancel(order_id).await?;
        deleted?;
        info!(stopped, "Order deleted");
        Ok(())
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(order_error) = e.entity_error::<OrderError>() {
            return order_error.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlateId, UserId};
    use actor_framework::mock::{create_mock_client, expect_update, MockClient};
    use chrono::Utc;
    use tokio::sync::mpsc;

    fn detached_scheduler() -> SchedulerClient {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        SchedulerClient::new(sender)
    }

    fn order(id: u32, user: u32, status: StatusId) -> Order {
        Order {
            id: OrderId(id),
            code: "123456".into(),
            details: String::new(),
            plates: vec![PlateId(1)],
            total_value: 12.0,
            user_id: UserId(user),
            status,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_update_status_sends_status_only() {
        let (inner, mut receiver) = create_mock_client::<Order>(10);
        let client = OrderClient::new(
            inner,
            detached_scheduler(),
            Arc::new(StatusSequence::standard()),
        );

        let task =
            tokio::spawn(async move { client.update_status(OrderId(4), StatusId::READY).await });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, OrderId(4));
        assert_eq!(update.status, Some(StatusId::READY));
        assert_eq!(update.details, None);
        responder.send(Ok(order(4, 1, StatusId::READY))).unwrap();

        let updated = task.await.unwrap().unwrap();
        assert_eq!(updated.status, StatusId::READY);
    }

    #[tokio::test]
    async fn test_update_status_rejects_foreign_status_locally() {
        let mock = MockClient::<Order>::new();
        let client = OrderClient::new(
            mock.client(),
            detached_scheduler(),
            Arc::new(StatusSequence::standard()),
        );

        let result = client.update_status(OrderId(1), StatusId(9)).await;
        assert_eq!(result, Err(OrderError::InvalidStatus(StatusId(9))));
        // No request reached the store.
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_filters_and_maps_errors() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_ok(vec![
            order(1, 1, StatusId::RECEIVED),
            order(2, 2, StatusId::PREPARING),
            order(3, 1, StatusId::READY),
        ]);
        mock.expect_get(OrderId(5))
            .return_err(FrameworkError::ActorClosed);
        let client = OrderClient::new(
            mock.client(),
            detached_scheduler(),
            Arc::new(StatusSequence::standard()),
        );

        let mine = client.list_orders(OrderQuery::ForUser(UserId(1))).await.unwrap();
        let ids: Vec<OrderId> = mine.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(1), OrderId(3)]);

        assert!(matches!(
            client.get(OrderId(5)).await,
            Err(OrderError::ActorCommunicationError(_))
        ));
        mock.verify();
    }

    #[test]
    fn test_map_error_recovers_entity_errors() {
        let boxed = FrameworkError::EntityError(Box::new(OrderError::Validation("no plates".into())));
        assert_eq!(
            OrderClient::map_error(boxed),
            OrderError::Validation("no plates".into())
        );
        assert_eq!(
            OrderClient::map_error(FrameworkError::NotFound("order_3".into())),
            OrderError::NotFound("order_3".into())
        );
    }
}
