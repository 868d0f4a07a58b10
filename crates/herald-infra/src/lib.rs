//! Infrastructure layer for Herald.
//!
//! Contains implementations of the port traits defined in `herald-core`:
//! the GitHub release API, an OpenAI-compatible chat-completion provider,
//! and a Slack incoming-webhook notifier. Also resolves run configuration
//! from flags, environment, and an optional TOML file.

pub mod config;
pub mod github;
pub mod llm;
pub mod slack;

#[cfg(test)]
pub(crate) mod test_support;
