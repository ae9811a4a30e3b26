//! Context domain module.
//!
//! Users hold conversations partitioned by flow; each conversation is an
//! append-only transcript. This module owns the vocabulary of that model
//! and its key-space encoding, with no I/O.

mod flow;
mod keys;
mod message;
mod reply_policy;

pub use flow::Flow;
pub use keys::{ContextKey, MESSAGES_FIELD};
pub use message::{format_transcript, Message, MessageRole};
pub use reply_policy::{ReplyPolicy, CHECK_IN_GREETING, CRISIS_MESSAGE, FAQ_REDIRECT_MESSAGE};
