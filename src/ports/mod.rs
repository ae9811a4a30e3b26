//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `KeyValueStore` - Scalar, list and field-map storage keyed by string
//! - `AIProvider` - Chat completion provider behind the language-model gateway

mod ai_provider;
mod key_value_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, PromptMessage, PromptRole,
    ProviderInfo, TokenUsage,
};
pub use key_value_store::{KeyValueStore, StoreError};
