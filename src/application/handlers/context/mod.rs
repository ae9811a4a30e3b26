//! Context command and query handlers.

mod get_context;
mod initiate_check_in;
mod send_message;
mod update_context;
mod validation;

pub use get_context::{
    ConversationTranscript, FlowContexts, GetContextHandler, GetContextQuery, UserContext,
};
pub use initiate_check_in::{
    InitiateCheckInCommand, InitiateCheckInHandler, InitiateCheckInResult,
};
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
pub use update_context::{UpdateContextCommand, UpdateContextHandler, UpdateContextResult};
