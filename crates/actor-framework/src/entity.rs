//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a record type implements to be stored and
//! served by a [`ResourceActor`](crate::ResourceActor). The actor owns every instance of the
//! type; callers only ever see clones handed back through a
//! [`ResourceClient`](crate::ResourceClient).
//!
//! # Associated Types
//! Each entity names its own id, creation payload, update payload, custom actions and error.
//! An `Order` store takes an `OrderCreate`, and the compiler refuses anything else.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any record type must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they can call other actors. The `Context` type is handed to
/// `ResourceActor::run` and passed by reference into every hook.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    ///
    /// Ids are allocated by the actor from a `u32` counter, and ordered so that listings
    /// come back in creation order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations that don't fit CRUD.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor. Use `()` if none.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per entity rather than one per message: clients match on a single
    /// type for every operation of the resource.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the allocated id and the creation payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction, before the entity is inserted into the store.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed. Returning an error keeps it.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
