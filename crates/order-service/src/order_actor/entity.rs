//! [`ActorEntity`] implementation for [`Order`].
//!
//! The store keeps orders in a [`ResourceActor`](actor_framework::ResourceActor); this impl
//! decides how they are built, edited and how status writes are applied.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = ();
    type Error = OrderError;

    /// Builds the order, rejecting one without plates.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.plates.is_empty() {
            return Err(OrderError::Validation(
                "incomplete order data: no plates".to_string(),
            ));
        }
        if !params.total_value.is_finite() || params.total_value < 0.0 {
            return Err(OrderError::Validation(format!(
                "invalid total value: {}",
                params.total_value
            )));
        }
        Ok(Order::new(id, params))
    }

    /// Applies whichever fields are present. Status membership is checked by the caller.
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(details) = update.details {
            self.details = details;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::SetStatus(status) => {
                let previous = std::mem::replace(&mut self.status, status);
                Ok(OrderActionResult::Written { previous })
            }
            OrderAction::CompareAndSetStatus { expected, status } => {
                if self.status != expected {
                    return Ok(OrderActionResult::Conflict {
                        actual: self.status,
                    });
                }
                let previous = std::mem::replace(&mut self.status, status);
                Ok(OrderActionResult::Written { previous })
            }
        }
    }
}
