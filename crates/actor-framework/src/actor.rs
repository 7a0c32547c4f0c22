//! # Generic Actor Server
//!
//! `ResourceActor` owns every record of one entity type and answers requests one at a time.
//! Because the loop is sequential, the actor is also the serialization point for writes:
//! two writers racing on the same record are applied in arrival order, last write wins.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// **Concurrency Model**: each actor processes its own messages sequentially, so the
/// `store` needs no `Mutex`. Many actors run in parallel, one Tokio task each.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Ticket { id: u32, open: bool }
/// #[derive(Debug)] struct TicketCreate;
/// #[derive(Debug)] struct TicketUpdate { open: bool }
/// #[derive(Debug)] enum TicketAction {}
/// #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
///
/// #[async_trait]
/// impl ActorEntity for Ticket {
///     type Id = u32; type Create = TicketCreate; type Update = TicketUpdate;
///     type Action = TicketAction; type ActionResult = (); type Context = (); type Error = TicketError;
///     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, open: true })
///     }
///     async fn on_update(&mut self, u: TicketUpdate, _: &()) -> Result<(), Self::Error> {
///         self.open = u.open;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Ticket>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(TicketCreate).await.unwrap();
///     assert!(client.exists(id).await.unwrap());
///     client.update(id, TicketUpdate { open: false }).await.unwrap();
///     assert_eq!(client.list().await.unwrap().len(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client calls
    /// wait for room.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` is handed by reference to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Order" instead of "order_service::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg, &context, entity_type).await;
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle(&mut self, msg: ResourceRequest<T>, context: &T::Context, entity_type: &str) {
        match msg {
            ResourceRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let id = T::Id::from(self.next_id);
                self.next_id += 1;

                let mut item = match T::from_create_params(id.clone(), params) {
                    Ok(item) => item,
                    Err(e) => {
                        warn!(entity_type, error = %e, "Create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        return;
                    }
                };
                if let Err(e) = item.on_create(context).await {
                    warn!(entity_type, error = %e, "on_create failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                self.store.insert(id.clone(), item);
                info!(entity_type, %id, size = self.store.len(), "Created");
                let _ = respond_to.send(Ok(id));
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.get(&id).cloned();
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::Exists { id, respond_to } => {
                let found = self.store.contains_key(&id);
                debug!(entity_type, %id, found, "Exists");
                let _ = respond_to.send(Ok(found));
            }
            ResourceRequest::List { respond_to } => {
                debug!(entity_type, size = self.store.len(), "List");
                let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
            }
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            } => {
                debug!(entity_type, %id, ?update, "Update");
                let Some(item) = self.store.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                if let Err(e) = item.on_update(update, context).await {
                    warn!(entity_type, %id, error = %e, "Update failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                info!(entity_type, %id, "Updated");
                let _ = respond_to.send(Ok(item.clone()));
            }
            ResourceRequest::Delete { id, respond_to } => {
                debug!(entity_type, %id, "Delete");
                let Some(item) = self.store.get(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                if let Err(e) = item.on_delete(context).await {
                    warn!(entity_type, %id, error = %e, "on_delete failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                self.store.remove(&id);
                info!(entity_type, %id, size = self.store.len(), "Deleted");
                let _ = respond_to.send(Ok(()));
            }
            ResourceRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(entity_type, %id, ?action, "Action");
                let Some(item) = self.store.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                let result = item
                    .handle_action(action, context)
                    .await
                    .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                match &result {
                    Ok(_) => info!(entity_type, %id, "Action ok"),
                    Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                }
                let _ = respond_to.send(result);
            }
        }
    }
}
