//! Business logic and port trait definitions for Herald.
//!
//! This crate defines the "ports" (`ReleaseHost`, `LlmProvider`,
//! `ChatNotifier`) that the infrastructure layer implements, plus the pure
//! logic around them: prompt building, markdown to chat blocks, and the
//! pipeline driver. It depends only on `herald-types` -- never on
//! `herald-infra` or any HTTP crate.

pub mod blocks;
pub mod llm;
pub mod notify;
pub mod pipeline;
pub mod release;
pub mod summary;
