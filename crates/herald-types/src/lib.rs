//! Shared domain types for Herald.
//!
//! Transient payloads exchanged with the hosting service, the language model,
//! and the chat webhook, plus run configuration and the error enums.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror, secrecy.

pub mod blocks;
pub mod config;
pub mod error;
pub mod llm;
pub mod release;
pub mod report;
