//! Redis adapter for the key/value store port.

mod key_value_store;

pub use key_value_store::RedisKeyValueStore;
