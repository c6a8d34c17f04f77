//! Kind-keyed callback registries.
//!
//! Listener registration is a map from a closed kind enumeration to an
//! ordered callback sequence. Every kind is seeded with an empty sequence at
//! construction, so dispatch never hits a missing key; sequences are only
//! ever appended to.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// Ordered collection of callbacks per kind.
///
/// `emit` snapshots the sequence before invoking it, so a callback may
/// register further callbacks for any kind; they take effect from the next
/// dispatch. The lock is released before callbacks run and is never held
/// across an await point.
pub struct CallbackRegistry<K, P> {
    listeners: Mutex<HashMap<K, Vec<Arc<dyn Fn(&P) + Send + Sync>>>>,
}

impl<K, P> CallbackRegistry<K, P>
where
    K: Copy + Eq + Hash,
{
    /// Create a registry seeded with an empty sequence for each kind.
    pub fn new(kinds: &[K]) -> Self {
        let listeners = kinds.iter().map(|kind| (*kind, Vec::new())).collect();
        Self {
            listeners: Mutex::new(listeners),
        }
    }

    /// Append a callback to the sequence for `kind`.
    pub fn register(&self, kind: K, callback: impl Fn(&P) + Send + Sync + 'static) {
        let mut listeners = self.listeners.lock().unwrap();
        listeners
            .entry(kind)
            .or_default()
            .push(Arc::new(callback));
    }

    /// Invoke every callback registered for `kind`, in registration order.
    pub fn emit(&self, kind: K, payload: &P) {
        let snapshot = {
            let listeners = self.listeners.lock().unwrap();
            listeners.get(&kind).cloned().unwrap_or_default()
        };
        for callback in snapshot {
            callback(payload);
        }
    }

    /// Number of callbacks currently registered for `kind`.
    pub fn count(&self, kind: K) -> usize {
        let listeners = self.listeners.lock().unwrap();
        listeners.get(&kind).map_or(0, Vec::len)
    }
}
