//! Observer registry with drop-guard subscriptions

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

type Callback<E> = Box<dyn FnMut(&E) + Send>;

struct Registry<E> {
    next_id: u64,
    subs: HashMap<u64, Callback<E>>,
    // ids unsubscribed while their callback was checked out by a running emit
    dropped_mid_emit: HashSet<u64>,
}

impl<E> Registry<E> {
    fn new() -> Self {
        Self {
            next_id: 0,
            subs: HashMap::new(),
            dropped_mid_emit: HashSet::new(),
        }
    }
}

/// Event emitter with drop-to-unsubscribe registrations
///
/// Clones share the same registry.
pub struct Emitter<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E> Emitter<E> {
    /// Create an emitter with no subscribers
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Register a callback; it is invoked for every emitted event until the
    /// returned [`Subscription`] is dropped
    pub fn subscribe(&self, callback: impl FnMut(&E) + Send + 'static) -> Subscription
    where
        E: 'static,
    {
        let id = {
            let mut registry = self.registry.lock().expect("event registry poisoned");
            let id = registry.next_id;
            registry.next_id += 1;
            registry.subs.insert(id, Box::new(callback));
            id
        };

        let registry = Arc::clone(&self.registry);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Ok(mut registry) = registry.lock() {
                    if registry.subs.remove(&id).is_none() {
                        registry.dropped_mid_emit.insert(id);
                    }
                }
            })),
        }
    }

    /// Invoke every registered callback with the event
    ///
    /// Callbacks run with the registry unlocked, so a callback may drop its
    /// own subscription or register a new one. A callback registered during
    /// an emit is not invoked for the event being emitted.
    pub fn emit(&self, event: &E) {
        let mut checked_out: Vec<(u64, Callback<E>)> = {
            let mut registry = self.registry.lock().expect("event registry poisoned");
            registry.subs.drain().collect()
        };

        for (_, callback) in &mut checked_out {
            callback(event);
        }

        let mut registry = self.registry.lock().expect("event registry poisoned");
        for (id, callback) in checked_out {
            if !registry.dropped_mid_emit.remove(&id) {
                registry.subs.insert(id, callback);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn count(&self) -> usize {
        self.registry.lock().expect("event registry poisoned").subs.len()
    }
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter").finish_non_exhaustive()
    }
}

/// Guard for one event registration; unsubscribes on drop
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
