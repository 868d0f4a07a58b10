//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait
//! defined in `herald-core`.
//!
//! [`LlmProvider`]: herald_core::llm::provider::LlmProvider

pub mod openai_compat;

pub use openai_compat::OpenAiCompatibleProvider;
