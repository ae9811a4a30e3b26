//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates context operations and coordinates between the
//! key/value store and language model ports.

mod conversation_store;
mod error;
mod flow_resolver;
mod language_model;

pub mod handlers;

pub use conversation_store::{encode_messages, ConversationStore};
pub use error::ContextError;
pub use flow_resolver::{FlowResolver, ResolvedConversation};
pub use language_model::{
    classification_prompt, persona_prompt, LanguageModelGateway, EMPTY_GENERATION_FALLBACK,
};

pub use handlers::{
    GetContextHandler, GetContextQuery, InitiateCheckInCommand, InitiateCheckInHandler,
    SendMessageCommand, SendMessageHandler, UpdateContextCommand, UpdateContextHandler,
};
