//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `redis` - Key/value store over Redis
//! - `memory` - In-memory key/value store for tests and local runs
//! - `ai` - OpenAI and scripted mock providers
//! - `http` - Axum REST API

pub mod ai;
pub mod http;
pub mod memory;
pub mod redis;
