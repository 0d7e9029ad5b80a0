//! # Mock Store & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running [`ResourceActor`](crate::framework::ResourceActor).
//! It is the tool for exercising code *around* a store, most importantly the failure paths
//! that are hard to provoke against the real actor (a parent update that fails half-way
//! through a merge, a store that has gone away).
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, answers are scripted | Real keyed map |
//! | **Error Injection** | `return_err` on any step | Only through entity validation |
//! | **Use Case** | Workflow logic, failure safety | Store semantics, end-to-end flows |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Order>::new();
//! mock.expect_get(OrderKey(1)).return_ok(Some(order));
//! mock.expect_update(OrderKey(1)).return_err(FrameworkError::ActorClosed);
//!
//! let client = OrderClient::new(mock.client());
//! // ... drive the code under test ...
//! mock.verify(); // every expectation consumed, no unexpected request seen
//! ```
//!
//! A request that does not match the next expectation is recorded (and its caller receives
//! `ActorDropped`); [`MockClient::verify`] panics on any such request, so tests can assert
//! that an operation was *not* issued.
//!
//! The lower-level [`create_mock_client`] plus `expect_*` helpers give direct access to the
//! request channel when a test needs to inspect payloads.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request of a given kind.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Delete {
        response: Result<(), FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    unexpected: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let unexpected = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let misses = unexpected.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        // Dropping the request drops its responder: the caller sees ActorDropped.
                        misses.lock().unwrap().push(format!(
                            "{} (expected {})",
                            describe(&request),
                            expectation.map(|e| e.kind()).unwrap_or("nothing"),
                        ));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|response| Expectation::Get { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Update { response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, _id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(|response| Expectation::Delete { response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(|response| Expectation::Action { response })
    }

    fn builder<R>(
        &mut self,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let misses = self.unexpected.lock().unwrap();
        if !misses.is_empty() {
            panic!("Unexpected requests: {}", misses.join(", "));
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "Get",
            Expectation::Create { .. } => "Create",
            Expectation::List { .. } => "List",
            Expectation::Update { .. } => "Update",
            Expectation::Delete { .. } => "Delete",
            Expectation::Action { .. } => "Action",
        }
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { .. } => "Create".to_string(),
        ResourceRequest::Get { id, .. } => format!("Get {id}"),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Subscribe { .. } => "Subscribe".to_string(),
        ResourceRequest::Update { id, .. } => format!("Update {id}"),
        ResourceRequest::Delete { id, .. } => format!("Delete {id}"),
        ResourceRequest::Action { id, .. } => format!("Action {id}"),
    }
}

/// Builder that queues the scripted answer for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiving end of its request channel.
///
/// Tests read requests off the receiver with the `expect_*` helpers below, inspect the
/// payload, and answer through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an Update.
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

/// Returns the next request if it is a Delete.
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an Action.
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
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    struct NoteError;

    #[async_trait]
    impl ActorEntity for Note {
        type Id = u32;
        type Create = NoteCreate;
        type Update = String;
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = NoteError;

        fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                text: params.text,
            })
        }

        async fn on_update(&mut self, text: String, _: &()) -> Result<(), Self::Error> {
            self.text = text;
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_channel_level_mock() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(NoteCreate {
                    text: "ít đá".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.text, "ít đá");
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_scripted_expectations_in_order() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Note {
            id: 1,
            text: "x".into(),
        }));
        mock.expect_delete(1).return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        assert_eq!(client.create(NoteCreate { text: "x".into() }).await.unwrap(), 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().text, "x");
        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::ActorClosed)
        ));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests: Delete 7")]
    async fn test_verify_flags_unexpected_request() {
        let mock = MockClient::<Note>::new();
        let client = mock.client();

        assert!(matches!(
            client.delete(7).await,
            Err(FrameworkError::ActorDropped)
        ));
        mock.verify();
    }
}
