//! Release-note generation via LLM.
//!
//! `generate_release_notes` sends the release content to the provider with
//! a fixed prompt and returns whatever text comes back. The output is not
//! checked for the expected sections.

pub mod prompt;

use herald_types::llm::{CompletionRequest, LlmError, Message};
use tracing::{info, warn};

use crate::llm::provider::LlmProvider;

use self::prompt::build_release_notes_prompt;

/// Generate user-facing release notes from commit-log text.
///
/// # Arguments
/// * `provider` - The LLM provider for the completion call
/// * `model` - The model to request
/// * `content` - Raw release body / commit log
#[tracing::instrument(
    name = "generate_release_notes",
    skip(provider, content),
    fields(provider = %provider.name(), content_len = content.len())
)]
pub async fn generate_release_notes<P: LlmProvider>(
    provider: &P,
    model: &str,
    content: &str,
) -> Result<String, LlmError> {
    let request = CompletionRequest {
        model: model.to_string(),
        messages: vec![Message::user(build_release_notes_prompt(content))],
    };

    let response = provider.complete(&request).await?;

    if response.content.trim().is_empty() {
        warn!(response_id = %response.id, "Model returned empty release notes");
    }
    info!(
        model = %response.model,
        output_tokens = response.usage.output_tokens,
        "Release notes summarized"
    );

    Ok(response.content)
}
