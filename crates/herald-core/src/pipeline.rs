//! The release announcement pipeline.
//!
//! Runs the four steps once, in order:
//! 1. create the release (fatal on error)
//! 2. generate notes from the release body (fatal on error)
//! 3. write the notes back as the release body (logged on error)
//! 4. announce the release in chat (logged on error)
//!
//! Nothing is retried and nothing is rolled back.

use herald_types::error::HostError;
use herald_types::llm::LlmError;
use herald_types::report::{RunReport, StepStatus};
use thiserror::Error;
use tracing::error;

use crate::llm::provider::LlmProvider;
use crate::notify::notifier::ChatNotifier;
use crate::notify::send_announcement;
use crate::release::host::ReleaseHost;
use crate::release::{create_release_for_tag, update_release_notes};
use crate::summary::generate_release_notes;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to create release for tag '{tag}': {source}")]
    CreateRelease {
        tag: String,
        #[source]
        source: HostError,
    },

    #[error("failed to generate release notes: {0}")]
    Summarize(#[from] LlmError),
}

/// Per-run values the steps need besides the adapters.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub tag: String,
    pub model: String,
    pub product_name: String,
}

/// Wires a release host, an LLM provider, and a chat notifier together.
pub struct Pipeline<H, P, N> {
    host: H,
    provider: P,
    notifier: N,
    settings: PipelineSettings,
}

impl<H, P, N> Pipeline<H, P, N>
where
    H: ReleaseHost,
    P: LlmProvider,
    N: ChatNotifier,
{
    pub fn new(host: H, provider: P, notifier: N, settings: PipelineSettings) -> Self {
        Self {
            host,
            provider,
            notifier,
            settings,
        }
    }

    /// Execute the pipeline once.
    ///
    /// Returns `Err` only when release creation or note generation fails.
    #[tracing::instrument(name = "pipeline", skip_all, fields(tag = %self.settings.tag))]
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        let tag = &self.settings.tag;

        let release = create_release_for_tag(&self.host, tag)
            .await
            .map_err(|source| PipelineError::CreateRelease {
                tag: tag.clone(),
                source,
            })?;

        let notes =
            generate_release_notes(&self.provider, &self.settings.model, release.body_text())
                .await?;

        let updated = match update_release_notes(&self.host, release.id, &notes).await {
            Ok(()) => StepStatus::Succeeded,
            Err(e) => {
                error!(error = %e, release_id = release.id, "Error updating release notes");
                StepStatus::failed(&e)
            }
        };

        let notified =
            match send_announcement(&self.notifier, &self.settings.product_name, &release.html_url)
                .await
            {
                Ok(()) => StepStatus::Succeeded,
                Err(e) => {
                    error!(error = %e, "Error sending release announcement to chat");
                    StepStatus::failed(&e)
                }
            };

        Ok(RunReport {
            release_id: release.id,
            tag: release.tag_name,
            html_url: release.html_url,
            published_at: release.published_at,
            summary_chars: notes.chars().count(),
            updated,
            notified,
        })
    }
}
