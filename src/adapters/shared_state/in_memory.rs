//! In-process shared state backed by a lock-protected map.
//!
//! Each `set` swaps a whole value under the write lock, so a reader sees
//! either the previous value or the new one, never a mix. After the lock is
//! released the store revision is bumped on a `watch` channel, which is what
//! waiting actors block on instead of spinning.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;

use crate::ports::{SharedState, SharedStateError};

/// Shared state for actors living in the same process.
///
/// The map never holds a partially applied write, so a poisoned lock is
/// recovered rather than propagated.
pub struct InMemorySharedState {
    entries: RwLock<HashMap<String, Value>>,
    revision: watch::Sender<u64>,
}

impl InMemorySharedState {
    /// Creates an empty store at revision 0.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            entries: RwLock::new(HashMap::new()),
            revision,
        }
    }

    /// Current revision, i.e. the number of writes so far.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// All keys currently present (for diagnostics and tests).
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for InMemorySharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState for InMemorySharedState {
    fn get(&self, key: &str) -> Result<Option<Value>, SharedStateError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<Value>>, SharedStateError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(keys.iter().map(|k| entries.get(*k).cloned()).collect())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SharedStateError> {
        {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.insert(key.to_string(), value);
        }
        self.revision.send_modify(|rev| *rev += 1);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
