//! # Notifier: synchronous, ordered event delivery.
//!
//! [`Notifier`] is the publish/subscribe object owned by one loader. It replaces a
//! page-global event emitter with an explicit list of listeners.
//!
//! ## Rules
//! - **Synchronous**: `emit()` calls every listener before returning.
//! - **Ordered**: listeners run in subscription order.
//! - **No buffering**: a listener added after an event fired never sees it.
//! - **Snapshot delivery**: the listener list is copied before delivery, so a listener
//!   may subscribe or unsubscribe from inside its callback.
//! - **Panic isolation**: a panicking listener is logged and skipped; later listeners
//!   still receive the event.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        │        (snapshot, subscription order)
//!        ├──► on(ScriptLoadRetried, cb1)   (kind filter)
//!        ├──► subscribe(Arc<dyn Subscribe>)  (all kinds)
//!        └──► on(ScriptLoadFailed, cb2)
//! ```

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::event::{Event, EventKind};
use crate::error::panic_message;
use crate::subscribers::Subscribe;

type Callback = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Clone)]
enum Listener {
    Callback { kind: EventKind, f: Callback },
    Subscriber(Arc<dyn Subscribe>),
}

impl Listener {
    fn wants(&self, kind: EventKind) -> bool {
        match self {
            Listener::Callback { kind: k, .. } => *k == kind,
            Listener::Subscriber(_) => true,
        }
    }

    fn name(&self) -> &str {
        match self {
            Listener::Callback { .. } => "callback",
            Listener::Subscriber(s) => s.name(),
        }
    }

    fn deliver(&self, ev: &Event) {
        match self {
            Listener::Callback { f, .. } => f(ev),
            Listener::Subscriber(s) => s.on_event(ev),
        }
    }
}

struct Entry {
    id: u64,
    listener: Listener,
}

#[derive(Default)]
struct Listeners {
    next_id: AtomicU64,
    entries: RwLock<Vec<Entry>>,
}

impl Listeners {
    fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }
}

/// Per-loader event notifier.
#[derive(Default)]
pub struct Notifier {
    inner: Arc<Listeners>,
}

impl Notifier {
    /// Creates a notifier without listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of `kind`.
    pub fn on<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.push(Listener::Callback {
            kind,
            f: Arc::new(callback),
        })
    }

    /// Registers a subscriber for every event kind.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscribe>) -> Subscription {
        self.push(Listener::Subscriber(subscriber))
    }

    fn push(&self, listener: Listener) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.entries.write().push(Entry { id, listener });
        Subscription {
            id,
            listeners: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers `event` to every interested listener, in subscription order.
    pub fn emit(&self, event: &Event) {
        let snapshot: Vec<Listener> = self
            .inner
            .entries
            .read()
            .iter()
            .filter(|e| e.listener.wants(event.kind))
            .map(|e| e.listener.clone())
            .collect();

        for listener in snapshot {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| listener.deliver(event))) {
                tracing::warn!(
                    listener = listener.name(),
                    src = %event.src,
                    kind = ?event.kind,
                    panic = panic_message(panic.as_ref()),
                    "event listener panicked"
                );
            }
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    /// True if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }
}

/// Handle returned by [`Notifier::on`] / [`Notifier::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Removes the listener. Returns `false` if it was already removed or the
    /// notifier is gone.
    pub fn unsubscribe(&self) -> bool {
        match self.listeners.upgrade() {
            Some(listeners) => listeners.remove(self.id),
            None => false,
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.read().len())
            .finish()
    }
}
