//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `context` - Flows, transcripts, key space and reply policy

pub mod context;
pub mod foundation;
