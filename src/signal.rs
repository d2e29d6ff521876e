use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

/// The session was torn down after the API rejected the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutEvent;

type Callback = Arc<dyn Fn(LogoutEvent) + Send + Sync>;

struct Inner {
    callbacks: Mutex<Vec<(Uuid, Callback)>>,
    channel: broadcast::Sender<LogoutEvent>,
}

/// Multi-subscriber "unauthenticated" channel. Clones share the same
/// subscriber list.
#[derive(Clone)]
pub struct LogoutSignal {
    inner: Arc<Inner>,
}

impl Default for LogoutSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogoutSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoutSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl LogoutSignal {
    pub fn new() -> Self {
        let (channel, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Inner {
                callbacks: Mutex::new(Vec::new()),
                channel,
            }),
        }
    }

    fn callbacks(&self) -> MutexGuard<'_, Vec<(Uuid, Callback)>> {
        self.inner
            .callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a callback invoked synchronously on every publish.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(LogoutEvent) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        self.callbacks().push((id, Arc::new(callback)));
        Subscription {
            id,
            signal: self.clone(),
        }
    }

    /// Async receiver for consumers running on their own task.
    pub fn listen(&self) -> broadcast::Receiver<LogoutEvent> {
        self.inner.channel.subscribe()
    }

    /// Callback subscribers currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.callbacks().len()
    }

    /// Fire-and-forget. A panicking subscriber is logged and skipped.
    pub fn publish(&self) {
        // snapshot so callbacks may (un)subscribe without deadlocking
        let snapshot: Vec<(Uuid, Callback)> = self.callbacks().clone();
        debug!("publishing logout to {} subscribers", snapshot.len());

        for (id, callback) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| callback(LogoutEvent))).is_err() {
                warn!("logout subscriber {} panicked", id);
            }
        }

        // no listeners is not an error
        let _ = self.inner.channel.send(LogoutEvent);
    }

    fn remove(&self, id: Uuid) -> bool {
        let mut callbacks = self.callbacks();
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }
}

/// Handle returned by [`LogoutSignal::subscribe`]. Dropping it keeps the
/// callback registered; call [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    signal: LogoutSignal,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn unsubscribe(self) -> bool {
        self.signal.remove(self.id)
    }
}
