//! # ActorClient Trait
//!
//! Domain clients wrap a [`ResourceClient`] and translate [`FrameworkError`] into their own
//! error type. Implementing `inner` and `map_error` is enough to inherit `get`, `exists` and
//! `delete`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the read and delete operations.
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Plate { id: u32 }
/// #[derive(Debug)] struct PlateCreate;
/// #[derive(Debug)] struct PlateUpdate;
/// #[derive(Debug)] enum PlateAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct PlateError(String);
///
/// impl From<String> for PlateError {
///     fn from(s: String) -> Self { PlateError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Plate {
///     type Id = u32; type Create = PlateCreate; type Update = PlateUpdate;
///     type Action = PlateAction; type ActionResult = (); type Context = (); type Error = PlateError;
///     fn from_create_params(id: u32, _: PlateCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: PlateUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: PlateAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct PlateClient { inner: ResourceClient<Plate> }
///
/// #[async_trait]
/// impl ActorClient<Plate> for PlateClient {
///     type Error = PlateError;
///     fn inner(&self) -> &ResourceClient<Plate> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { PlateError(e.to_string()) }
/// }
///
/// async fn usage(client: PlateClient) {
///     let _ = client.get(1).await;
///     let _ = client.exists(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Check whether an entity is stored under `id`.
    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: T::Id) -> Result<bool, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().exists(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
