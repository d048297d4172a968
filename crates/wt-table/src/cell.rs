//! Observable value cells.
//!
//! A [`StateCell`] holds one named piece of per-table state and delivers
//! every published value to its subscribers synchronously, in publish
//! order. Subscribers receive every subsequent value, not just changes;
//! deduplication, if wanted, is the subscriber's business.
//!
//! Re-entrancy: a `put` issued from inside a subscriber callback is
//! queued and delivered after the current notification round completes,
//! so idempotent subscribers cannot recurse into an infinite cycle.
//!
//! Unsubscription is explicit: dropping a [`SubscriptionHandle`] does
//! NOT detach the observer — call [`SubscriptionHandle::unsubscribe`]
//! (or tear the owning space down) when the view closes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

type Callback<T> = Box<dyn FnMut(&T) + Send>;

struct Subscriber<T> {
    id: u64,
    callback: Mutex<Callback<T>>,
}

struct CellState<T> {
    value: Option<T>,
    subscribers: Vec<Arc<Subscriber<T>>>,
    queue: VecDeque<T>,
    notifying: bool,
    next_id: u64,
}

/// One observable state cell.
pub struct StateCell<T> {
    state: Arc<Mutex<CellState<T>>>,
}

impl<T> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> StateCell<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CellState {
                value: None,
                subscribers: Vec::new(),
                queue: VecDeque::new(),
                notifying: false,
                next_id: 0,
            })),
        }
    }
}

impl<T: Clone + Send + 'static> StateCell<T> {
    fn lock(&self) -> std::sync::MutexGuard<'_, CellState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current value, if one was ever published.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.lock().value.clone()
    }

    /// The current value, or `default` when the cell is pristine.
    #[must_use]
    pub fn value_or(&self, default: T) -> T {
        self.lock().value.clone().unwrap_or(default)
    }

    /// Whether a value has ever been published.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.lock().value.is_some()
    }

    /// Publish a value: store it and notify every subscriber
    /// synchronously, in registration order.
    ///
    /// When called from inside a subscriber callback, the value is
    /// queued and delivered once the in-progress notification round has
    /// finished.
    pub fn put(&self, value: T) {
        {
            let mut state = self.lock();
            state.queue.push_back(value);
            if state.notifying {
                return;
            }
            state.notifying = true;
        }
        self.drain();
    }

    fn drain(&self) {
        loop {
            let (value, subscribers) = {
                let mut state = self.lock();
                let Some(value) = state.queue.pop_front() else {
                    state.notifying = false;
                    return;
                };
                state.value = Some(value.clone());
                (value, state.subscribers.clone())
            };

            // Callbacks run unlocked so they may read, publish, and
            // (un)subscribe without deadlocking.
            for subscriber in subscribers {
                let mut callback = subscriber
                    .callback
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                callback(&value);
            }
        }
    }

    /// Register an observer for every subsequently published value.
    #[must_use = "keep the handle to unsubscribe on teardown"]
    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) -> SubscriptionHandle {
        let subscriber = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            let subscriber = Arc::new(Subscriber {
                id,
                callback: Mutex::new(Box::new(callback) as Callback<T>),
            });
            state.subscribers.push(Arc::clone(&subscriber));
            subscriber
        };

        let state = Arc::downgrade(&self.state);
        let id = subscriber.id;
        SubscriptionHandle {
            detach: Box::new(move || {
                if let Some(state) = state.upgrade() {
                    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                    state.subscribers.retain(|s| s.id != id);
                }
            }),
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Reset the cell: drop the value, pending queue, and every
    /// subscriber. Called on view teardown.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.value = None;
        state.queue.clear();
        state.subscribers.clear();
    }
}

/// Handle for one registered observer. Unsubscription is explicit;
/// dropping the handle leaves the observer attached.
pub struct SubscriptionHandle {
    detach: Box<dyn FnOnce() + Send>,
}

impl SubscriptionHandle {
    /// Detach the observer. Idempotent with respect to teardown: if the
    /// cell was already cleared, this is a no-op.
    pub fn unsubscribe(self) {
        (self.detach)();
    }
}
