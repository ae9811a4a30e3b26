//! Context Relay - flow-aware conversation transcripts with an LLM reply policy
//!
//! Relays user messages into per-user conversations partitioned by flow
//! (`normal` or `check-in`), classifies each message with a language model,
//! picks a reply policy and keeps every transcript in a key/value store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
