//! Shared State Port - the only medium between the inference worker and
//! the presentation layer.
//!
//! A string-keyed map of structured values. Writes are last-writer-wins and
//! visible to every reader once `set` returns. There is no compare-and-swap;
//! correctness rests on each key having a single writer.

use serde_json::Value;
use tokio::sync::watch;

/// Errors raised by a shared state backend
#[derive(Debug, thiserror::Error)]
pub enum SharedStateError {
    #[error("Shared state unavailable: {0}")]
    Unavailable(String),
}

/// Port for the cross-actor key/value store
pub trait SharedState: Send + Sync {
    /// Returns the current value of `key`, `None` if absent. Never blocks on writers
    /// for longer than a single map access.
    fn get(&self, key: &str) -> Result<Option<Value>, SharedStateError>;

    /// Reads several keys as one consistent view.
    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<Value>>, SharedStateError>;

    /// Replaces the value of `key` and notifies subscribers.
    fn set(&self, key: &str, value: Value) -> Result<(), SharedStateError>;

    /// Receiver of the store revision, bumped after every `set`.
    ///
    /// A fresh receiver treats the current revision as seen, so probing the
    /// store after subscribing and then awaiting `changed()` misses no write.
    fn subscribe(&self) -> watch::Receiver<u64>;
}
