//! Outcome of a single Herald run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a recoverable step (release update, chat notification).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Succeeded,
    Failed { error: String },
}

impl StepStatus {
    pub fn failed(error: &impl std::fmt::Display) -> Self {
        StepStatus::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepStatus::Succeeded)
    }
}

/// Summary of what a run did. Produced only when the fatal steps succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub release_id: u64,
    pub tag: String,
    pub html_url: String,
    /// When the host published the release; absent for hosts that omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub summary_chars: usize,
    pub updated: StepStatus,
    pub notified: StepStatus,
}
