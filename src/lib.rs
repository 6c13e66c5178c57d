//! vibescout — a conversational event-recommendation agent runtime.
//!
//! The core is the dialogue controller: a per-turn state machine that
//! decides whether to keep chatting, query the record store, or
//! celebrate completion, while keeping a bounded mutable transcript
//! consistent with nondeterministic, fallible oracle calls and a
//! persisted per-user taste profile.

pub mod agent;
pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod oracle;
pub mod profile;
pub mod retrieval;
pub mod session;
pub mod types;
