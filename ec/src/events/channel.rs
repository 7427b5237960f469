//! Event Channel - typed pub/sub for one editor session
//!
//! Delivery is synchronous: `emit` invokes every listener registered for the
//! event's kind, in registration order, before it returns. `once` awaiters sit
//! in the same ordered list and are removed by the first emission they see, or
//! when the awaiter is dropped.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::debug;

use super::error::EventError;
use super::types::{EditorEvent, EventKind, EventPayload};

type Handler = Arc<dyn Fn(&EditorEvent) + Send + Sync>;
type Resolver = Box<dyn FnOnce(&EditorEvent) + Send>;

enum Listener {
    /// Runs for every emission until unsubscribed
    Every { id: u64, handler: Handler },
    /// Runs for the next emission only
    Next { id: u64, resolve: Resolver },
}

impl Listener {
    fn id(&self) -> u64 {
        match self {
            Listener::Every { id, .. } | Listener::Next { id, .. } => *id,
        }
    }
}

enum Delivery {
    Every { id: u64, handler: Handler },
    Next(Resolver),
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl Registry {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn register(&mut self, kind: EventKind, listener: Listener) {
        self.listeners.entry(kind).or_default().push(listener);
    }

    fn contains(&self, kind: EventKind, id: u64) -> bool {
        self.listeners
            .get(&kind)
            .is_some_and(|listeners| listeners.iter().any(|listener| listener.id() == id))
    }

    /// Detach a listener; the caller drops it once the lock is released
    fn remove(&mut self, kind: EventKind, id: u64) -> Option<Listener> {
        let listeners = self.listeners.get_mut(&kind)?;
        let index = listeners.iter().position(|listener| listener.id() == id)?;
        Some(listeners.remove(index))
    }
}

/// Central event channel for one editor session
///
/// Cheap to clone; all clones share the same listener registry. Pending
/// [`Once`] awaiters resolve with [`EventError::Closed`] when the last clone is
/// dropped.
#[derive(Clone, Default)]
pub struct EventChannel {
    registry: Arc<Mutex<Registry>>,
}

impl EventChannel {
    /// Create an empty channel
    pub fn new() -> Self {
        debug!("EventChannel::new: creating event channel");
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Emit an event to every listener registered for its kind
    ///
    /// The listener set is captured before the first handler runs, so handlers
    /// may subscribe, unsubscribe or emit again without deadlocking. Handlers
    /// added during the emission wait for the next one; handlers removed during
    /// it are skipped. Emitting with no listeners is a no-op.
    pub fn emit(&self, event: impl Into<EditorEvent>) {
        let event = event.into();
        let kind = event.kind();

        let deliveries: Vec<Delivery> = {
            let mut registry = self.registry();
            let Some(listeners) = registry.listeners.get_mut(&kind) else {
                debug!(%kind, listeners = 0, "EventChannel::emit");
                return;
            };

            let mut kept = Vec::with_capacity(listeners.len());
            let mut deliveries = Vec::with_capacity(listeners.len());
            for listener in std::mem::take(listeners) {
                match listener {
                    Listener::Every { id, handler } => {
                        deliveries.push(Delivery::Every {
                            id,
                            handler: Arc::clone(&handler),
                        });
                        kept.push(Listener::Every { id, handler });
                    }
                    Listener::Next { resolve, .. } => deliveries.push(Delivery::Next(resolve)),
                }
            }
            *listeners = kept;
            deliveries
        };

        debug!(%kind, listeners = deliveries.len(), "EventChannel::emit");
        for delivery in deliveries {
            match delivery {
                Delivery::Every { id, handler } => {
                    let registered = self.registry().contains(kind, id);
                    if registered {
                        handler(&event);
                    }
                }
                Delivery::Next(resolve) => resolve(&event),
            }
        }
    }

    /// Register a handler for every future occurrence of `P`
    ///
    /// The handler stays registered until [`Subscription::unsubscribe`] is
    /// called or the channel is cleared.
    pub fn on<P, F>(&self, handler: F) -> Subscription
    where
        P: EventPayload,
        F: Fn(&P) + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(move |event: &EditorEvent| {
            if let Some(payload) = P::from_event(event) {
                handler(payload);
            }
        });
        self.on_kind(P::KIND, handler)
    }

    /// Register a handler for every future event of `kind`, untyped
    ///
    /// Used by observers that want the whole event, e.g. loggers.
    pub fn on_any<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        self.on_kind(kind, Arc::new(handler))
    }

    fn on_kind(&self, kind: EventKind, handler: Handler) -> Subscription {
        let mut registry = self.registry();
        let id = registry.allocate_id();
        registry.register(kind, Listener::Every { id, handler });
        debug!(%kind, id, "EventChannel::on: registered");

        Subscription {
            id,
            kind,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Wait for the next occurrence of `P`
    ///
    /// Only emissions after this call count; nothing is replayed. The first
    /// matching emission resolves the returned future, later ones are ignored.
    /// Dropping the future before then deregisters it.
    pub fn once<P: EventPayload>(&self) -> Once<P> {
        let (tx, rx) = oneshot::channel();
        let resolve: Resolver = Box::new(move |event: &EditorEvent| {
            if let Some(payload) = P::from_event(event) {
                // Receiver may have been dropped by a caller that gave up
                let _ = tx.send(payload.clone());
            }
        });

        let mut registry = self.registry();
        let id = registry.allocate_id();
        registry.register(P::KIND, Listener::Next { id, resolve });
        debug!(kind = %P::KIND, id, "EventChannel::once: registered");

        Once {
            rx,
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Number of listeners (persistent and pending once) for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry().listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Drop every listener; pending [`Once`] awaiters resolve with `Closed`
    pub fn clear_listeners(&self) {
        let removed = std::mem::take(&mut self.registry().listeners);
        debug!(kinds = removed.len(), "EventChannel::clear_listeners");
        drop(removed);
    }
}

/// Handle returned by [`EventChannel::on`]; removes the handler when consumed
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    kind: EventKind,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Kind this subscription listens to
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Remove the handler. No-op if the channel is already gone.
    pub fn unsubscribe(self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(self.kind, self.id);
        drop(removed);
        debug!(kind = %self.kind, id = self.id, "Subscription::unsubscribe");
    }
}

/// Future returned by [`EventChannel::once`]
#[must_use = "a once awaiter does nothing unless awaited"]
pub struct Once<P: EventPayload> {
    rx: oneshot::Receiver<P>,
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl<P: EventPayload> Drop for Once<P> {
    fn drop(&mut self) {
        // Already removed if it fired
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(P::KIND, self.id);
            drop(removed);
        }
    }
}

impl<P: EventPayload> Future for Once<P> {
    type Output = Result<P, EventError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|result| result.map_err(|_| EventError::Closed))
    }
}
