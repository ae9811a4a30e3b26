//! Application handlers.
//!
//! Command and query handlers that orchestrate context operations.

pub mod context;

pub use context::{
    // Commands and queries
    GetContextQuery,
    InitiateCheckInCommand,
    SendMessageCommand,
    UpdateContextCommand,
    // Handlers
    GetContextHandler,
    InitiateCheckInHandler,
    SendMessageHandler,
    UpdateContextHandler,
    // Results
    ConversationTranscript,
    FlowContexts,
    InitiateCheckInResult,
    SendMessageResult,
    UpdateContextResult,
    UserContext,
};
