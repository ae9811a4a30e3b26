//! Redis-backed key/value store for production deployments.
//!
//! Each operation is a single Redis command on a shared multiplexed
//! connection: GET, SET, LRANGE, RPUSH, HGET and HSET.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, ErrorKind, RedisError};
use std::time::Duration;

use crate::ports::{KeyValueStore, StoreError};

/// Redis implementation of the `KeyValueStore` port.
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    conn: MultiplexedConnection,
}

impl RedisKeyValueStore {
    /// Wraps an established connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Opens a multiplexed connection to `url`, failing after `timeout`.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let conn = tokio::time::timeout(timeout, client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| {
                StoreError::Unavailable(format!(
                    "connection timed out after {}s",
                    timeout.as_secs()
                ))
            })?
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self::new(conn))
    }
}

fn map_err(key: &str, e: RedisError) -> StoreError {
    if e.kind() == ErrorKind::TypeError || e.code() == Some("WRONGTYPE") {
        StoreError::WrongType {
            key: key.to_string(),
        }
    } else if e.is_io_error() || e.is_connection_dropped() || e.is_timeout() {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::CommandFailed(e.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(|e| map_err(key, e))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| map_err(key, e))
    }

    async fn list_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.lrange(key, start, stop)
            .await
            .map_err(|e| map_err(key, e))
    }

    async fn list_push(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(key, value)
            .await
            .map_err(|e| map_err(key, e))
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.hget(key, field).await.map_err(|e| map_err(key, e))
    }

    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        conn.hset_multiple::<_, _, _, ()>(key, fields)
            .await
            .map_err(|e| map_err(key, e))
    }
}

impl std::fmt::Debug for RedisKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKeyValueStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_errors_map_to_wrong_type() {
        let err = RedisError::from((ErrorKind::TypeError, "WRONGTYPE"));
        assert!(matches!(map_err("k", err), StoreError::WrongType { ref key } if key == "k"));
    }

    #[test]
    fn io_errors_map_to_unavailable() {
        let err = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(matches!(map_err("k", err), StoreError::Unavailable(_)));
    }

    #[test]
    fn other_errors_map_to_command_failed() {
        let err = RedisError::from((ErrorKind::ResponseError, "ERR syntax"));
        assert!(matches!(map_err("k", err), StoreError::CommandFailed(_)));
    }

    #[tokio::test]
    async fn invalid_url_is_unavailable() {
        let result = RedisKeyValueStore::connect("not-a-url", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    // Round trips against a live server run separately:
    //
    // #[tokio::test]
    // #[ignore]
    // async fn redis_round_trip() {
    //     let store = RedisKeyValueStore::connect("redis://127.0.0.1/", Duration::from_secs(5))
    //         .await
    //         .unwrap();
    //     ...
    // }
}
