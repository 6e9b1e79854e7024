//! Current-value state container with subscribers
//!
//! This module provides a thread-safe slot holding the latest [`RequestState`] and a
//! set of subscribers notified on every transition. Subscribing replays the current
//! value immediately, so every observer sees the same sequence from the point it joined.

use super::request_state::RequestState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::debug;

/// Type alias for state callback functions
pub type StateCallback = Arc<dyn Fn(&RequestState) + Send + Sync>;

/// Handle returned by [`StateStore::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone)]
enum Subscriber {
    Callback(StateCallback),
    Channel(mpsc::UnboundedSender<RequestState>),
}

impl Subscriber {
    fn notify(&self, state: &RequestState) {
        match self {
            Subscriber::Callback(callback) => callback(state),
            Subscriber::Channel(tx) => {
                let _ = tx.send(state.clone());
            }
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Subscriber::Callback(_) => false,
            Subscriber::Channel(tx) => tx.is_closed(),
        }
    }
}

/// Store for the current request state
///
/// Publishing and subscribing are serialized so that a new subscriber never misses
/// or reorders a transition. Callbacks run on the publishing thread and must not
/// publish or subscribe themselves.
pub struct StateStore {
    current: Mutex<RequestState>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    publish_lock: Mutex<()>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StateStore {
    /// Create a new store holding `initial`
    pub fn new(initial: RequestState) -> Self {
        Self {
            current: Mutex::new(initial),
            subscribers: Mutex::new(Vec::new()),
            publish_lock: Mutex::new(()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub fn current(&self) -> RequestState {
        lock(&self.current).clone()
    }

    /// Replace the current state and notify every subscriber
    pub fn publish(&self, state: RequestState) {
        let _guard = lock(&self.publish_lock);

        debug!(state = %state, "Publishing request state");
        *lock(&self.current) = state.clone();

        let subscribers: Vec<Subscriber> = {
            let mut subscribers = lock(&self.subscribers);
            subscribers.retain(|(_, s)| !s.is_closed());
            subscribers.iter().map(|(_, s)| s.clone()).collect()
        };

        for subscriber in &subscribers {
            subscriber.notify(&state);
        }
    }

    /// Register a callback; it is called with the current state before this returns
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&RequestState) + Send + Sync + 'static,
    {
        self.register(Subscriber::Callback(Arc::new(callback)))
    }

    /// Open a stream of states starting with the current one
    pub fn observe(&self) -> StateStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.register(Subscriber::Channel(tx));
        StateStream { id, rx }
    }

    /// Remove a subscriber; returns false if it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = lock(&self.subscribers);
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = lock(&self.subscribers);
        subscribers.retain(|(_, s)| !s.is_closed());
        subscribers.len()
    }

    fn register(&self, subscriber: Subscriber) -> SubscriptionId {
        let _guard = lock(&self.publish_lock);

        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let current = self.current();
        lock(&self.subscribers).push((id, subscriber.clone()));
        subscriber.notify(&current);

        id
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(RequestState::Idle)
    }
}

/// Receiving end of [`StateStore::observe`]
///
/// Dropping the stream detaches it from the store on the next publish.
pub struct StateStream {
    id: SubscriptionId,
    rx: mpsc::UnboundedReceiver<RequestState>,
}

impl StateStream {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Wait for the next state
    pub async fn next(&mut self) -> Option<RequestState> {
        self.rx.recv().await
    }

    /// Take the next state if one is already queued
    pub fn try_next(&mut self) -> Option<RequestState> {
        self.rx.try_recv().ok()
    }

    /// Drain every queued state
    pub fn drain(&mut self) -> Vec<RequestState> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
