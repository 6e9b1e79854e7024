//! Request state holder.
//!
//! [`RequestStateHolder`] sits between the screen and a [`ModelGateway`]. It tracks the
//! most recent submission through [`RequestState`] and turns every gateway failure into
//! an `Error` state instead of returning it.

use super::request_state::RequestState;
use super::state_store::{StateStream, StateStore, SubscriptionId};
use crate::llm::gateway::ModelGateway;
use crate::llm::models::{Bitmap, PendingRequest};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

/// Holds the lifecycle of the latest prompt submission
///
/// Overlapping submissions are not cancelled or ordered: each call publishes its
/// result when it resolves, so the one that resolves last decides the final state.
///
/// # Examples
///
/// ```ignore
/// use aiviewer::prelude::*;
///
/// let holder = RequestStateHolder::new(Arc::new(GeminiGateway::new()?));
/// let mut states = holder.observe_state();
/// holder.submit(bitmap, "What is in this photo?");
/// while let Some(state) = states.next().await {
///     println!("{}", state);
/// }
/// ```
pub struct RequestStateHolder {
    gateway: Arc<dyn ModelGateway>,
    store: Arc<StateStore>,
}

impl RequestStateHolder {
    /// Create a new holder in the `Idle` state
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            store: Arc::new(StateStore::default()),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> RequestState {
        self.store.current()
    }

    /// Stream of states, starting with the current one
    pub fn observe_state(&self) -> StateStream {
        self.store.observe()
    }

    /// Callback form of [`observe_state`](Self::observe_state)
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&RequestState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Submit an image and prompt to the model
    ///
    /// Publishes `Loading` before returning, then runs the model call on the tokio
    /// runtime. The returned handle completes once the result has been published;
    /// callers are free to drop it. Must be called from within a tokio runtime.
    pub fn submit(&self, image: Bitmap, prompt: impl Into<String>) -> JoinHandle<()> {
        let request = PendingRequest::new(image, prompt);
        let request_id = Uuid::new_v4();

        let loading = self.store.current().on_submit();
        self.store.publish(loading);
        info!(
            request_id = %request_id,
            prompt_chars = request.prompt.chars().count(),
            "Submitted prompt"
        );

        let gateway = self.gateway.clone();
        let store = self.store.clone();

        tokio::spawn(async move {
            let started = Instant::now();
            let outcome = gateway.generate(&request.image, &request.prompt).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &outcome {
                Ok(text) => info!(
                    request_id = %request_id,
                    elapsed_ms,
                    output_chars = text.chars().count(),
                    "Model request succeeded"
                ),
                Err(err) => warn!(
                    request_id = %request_id,
                    elapsed_ms,
                    error = %err,
                    "Model request failed"
                ),
            }

            let next = store.current().on_complete(outcome);
            store.publish(next);
        })
    }
}
