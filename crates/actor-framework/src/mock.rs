//! # Mock Clients
//!
//! Two ways to stand in for a live [`ResourceActor`](crate::ResourceActor) in tests:
//!
//! | | [`MockClient`] | [`create_mock_client`] |
//! |---|---|---|
//! | **Style** | Queue of scripted replies | Test drives the receiver by hand |
//! | **Best for** | Injecting store failures into code that issues many requests | Asserting the exact payload a client sends |
//! | **Checks** | `verify()` fails on leftovers, kind or id mismatches | Whatever the test asserts |
//!
//! ## Scripted replies
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Order { id: u32, status: u32 }
//! #[derive(Debug)] struct OrderCreate;
//! #[derive(Debug)] struct OrderUpdate;
//! #[derive(Debug)] enum OrderAction {}
//! #[derive(Debug, thiserror::Error)] #[error("order error")] struct OrderError;
//!
//! #[async_trait]
//! impl ActorEntity for Order {
//!     type Id = u32; type Create = OrderCreate; type Update = OrderUpdate;
//!     type Action = OrderAction; type ActionResult = (); type Context = (); type Error = OrderError;
//!     fn from_create_params(id: u32, _: OrderCreate) -> Result<Self, Self::Error> { Ok(Self { id, status: 1 }) }
//!     async fn on_update(&mut self, _: OrderUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: OrderAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Order>::new();
//!     mock.expect_get(7).return_err(FrameworkError::ActorClosed);
//!     mock.expect_get(7).return_ok(Some(Order { id: 7, status: 2 }));
//!
//!     let client = mock.client();
//!     assert!(client.get(7).await.is_err());
//!     assert_eq!(client.get(7).await.unwrap().unwrap().status, 2);
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

/// One scripted reply, consumed in FIFO order.
enum Expectation<T: ActorEntity> {
    Create(Result<T::Id, FrameworkError>),
    Get(T::Id, Result<Option<T>, FrameworkError>),
    Exists(T::Id, Result<bool, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(T::Id, Result<T, FrameworkError>),
    Delete(T::Id, Result<(), FrameworkError>),
    Action(T::Id, Result<T::ActionResult, FrameworkError>),
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: ActorEntity>(state: &Shared<T>) -> MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::Exists { .. } => "exists",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
    }
}

fn reply<T: ActorEntity, R>(
    failures: &mut Vec<String>,
    kind: &str,
    expected: &T::Id,
    got: &T::Id,
    respond_to: Response<R>,
    response: Result<R, FrameworkError>,
) {
    if expected != got {
        failures.push(format!("{kind}: expected id {expected}, got {got}"));
    }
    let _ = respond_to.send(response);
}

/// A mock resource client answering from a queue of scripted replies.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut guard = lock(&task_state);
                let state = &mut *guard;
                let kind = request_kind(&request);
                let failures = &mut state.failures;

                match (request, state.expectations.pop_front()) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get(want, r))) => {
                        reply::<T, _>(failures, kind, &want, &id, respond_to, r);
                    }
                    (
                        ResourceRequest::Exists { id, respond_to },
                        Some(Expectation::Exists(want, r)),
                    ) => {
                        reply::<T, _>(failures, kind, &want, &id, respond_to, r);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(want, r)),
                    ) => {
                        reply::<T, _>(failures, kind, &want, &id, respond_to, r);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete(want, r)),
                    ) => {
                        reply::<T, _>(failures, kind, &want, &id, respond_to, r);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action(want, r)),
                    ) => {
                        reply::<T, _>(failures, kind, &want, &id, respond_to, r);
                    }
                    (_, None) => failures.push(format!("unexpected {kind} request")),
                    (_, Some(_)) => failures.push(format!("{kind} request out of order")),
                }
                // Unanswered requests drop their responder; the caller sees `ActorDropped`.
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Reply<T, R> {
        Reply {
            state: self.state.clone(),
            make: Box::new(make),
        }
    }

    pub fn expect_create(&mut self) -> Reply<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> Reply<T, Option<T>> {
        self.builder(move |r| Expectation::Get(id, r))
    }

    pub fn expect_exists(&mut self, id: T::Id) -> Reply<T, bool> {
        self.builder(move |r| Expectation::Exists(id, r))
    }

    pub fn expect_list(&mut self) -> Reply<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> Reply<T, T> {
        self.builder(move |r| Expectation::Update(id, r))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Reply<T, ()> {
        self.builder(move |r| Expectation::Delete(id, r))
    }

    pub fn expect_action(&mut self, id: T::Id) -> Reply<T, T::ActionResult> {
        self.builder(move |r| Expectation::Action(id, r))
    }

    /// Number of scripted replies not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.state).expectations.len()
    }

    /// Panics if any expectation is left over or any request didn't match its script.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.failures.is_empty() {
            panic!("Mock received mismatched requests: {:?}", state.failures);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Finishes an expectation with the reply the mock should send.
pub struct Reply<T: ActorEntity, R> {
    state: Shared<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> Reply<T, R> {
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.state).expectations.push_back(expectation);
    }

    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.make)(Err(error));
        lock(&self.state).expectations.push_back(expectation);
    }
}

// =============================================================================
// RECEIVER-DRIVEN HELPERS
// =============================================================================

/// Creates a client and hands back the raw request receiver.
///
/// The test reads requests off the receiver and answers through their `respond_to`
/// senders, which lets it assert on payloads the scripted mock ignores.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u32,
        title: String,
    }

    #[derive(Debug)]
    struct TicketCreate {
        title: String,
    }

    #[derive(Debug)]
    struct TicketUpdate {
        title: String,
    }

    #[derive(Debug)]
    enum TicketAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("ticket error")]
    struct TicketError;

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = u32;
        type Create = TicketCreate;
        type Update = TicketUpdate;
        type Action = TicketAction;
        type ActionResult = ();
        type Context = ();
        type Error = TicketError;

        fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                title: params.title,
            })
        }

        async fn on_update(&mut self, update: TicketUpdate, _: &()) -> Result<(), Self::Error> {
            self.title = update.title;
            Ok(())
        }

        async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_receiver_driven_update() {
        let (client, mut receiver) = create_mock_client::<Ticket>(10);

        let task = tokio::spawn(async move {
            client
                .update(
                    3,
                    TicketUpdate {
                        title: "renamed".into(),
                    },
                )
                .await
        });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, 3);
        assert_eq!(update.title, "renamed");
        responder
            .send(Ok(Ticket {
                id: 3,
                title: update.title,
            }))
            .unwrap();

        let ticket = task.await.unwrap().unwrap();
        assert_eq!(ticket.title, "renamed");
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mut mock = MockClient::<Ticket>::new();
        mock.expect_create().return_ok(1);
        mock.expect_exists(1).return_ok(true);
        mock.expect_list().return_ok(vec![Ticket {
            id: 1,
            title: "first".into(),
        }]);
        mock.expect_delete(1).return_err(FrameworkError::NotFound("1".into()));

        let client = mock.client();
        let id = client
            .create(TicketCreate {
                title: "first".into(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert!(client.exists(1).await.unwrap());
        assert_eq!(client.list().await.unwrap().len(), 1);
        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::NotFound(_))
        ));

        assert_eq!(mock.remaining(), 0);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "mismatched requests")]
    async fn test_verify_reports_wrong_id() {
        let mut mock = MockClient::<Ticket>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let _ = client.get(2).await;

        mock.verify();
    }

    #[tokio::test]
    async fn test_unscripted_request_is_dropped() {
        let mock = MockClient::<Ticket>::new();
        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
