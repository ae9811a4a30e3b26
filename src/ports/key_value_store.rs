//! Key-Value Store Port - Interface for the backing store.
//!
//! The relay keeps no state of its own; everything lives behind this port.
//! The operation set mirrors what the conversation store needs: scalars,
//! append-only lists and field maps, all addressed by string keys.
//!
//! Reads of absent keys are not errors: they return `None` or an empty list.

use async_trait::async_trait;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store command failed: {0}")]
    CommandFailed(String),

    #[error("Wrong value type at key {key}")]
    WrongType { key: String },
}

/// Port for key/value store access.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a scalar value.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites a scalar value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Reads list elements between `start` and `stop`, inclusive.
    ///
    /// Negative indices count from the tail, so `(-1, -1)` is the last
    /// element and `(0, -1)` the whole list.
    async fn list_range(&self, key: &str, start: isize, stop: isize)
        -> Result<Vec<String>, StoreError>;

    /// Appends a value to the tail of a list.
    async fn list_push(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Reads one field of a field map.
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Writes fields into a field map, leaving unnamed fields untouched.
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError>;
}
