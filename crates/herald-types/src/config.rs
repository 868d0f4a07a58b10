//! Run configuration types.
//!
//! [`ConfigSources`] holds raw values gathered from CLI flags and the
//! environment; [`FileConfig`] holds optional settings from `herald.toml`.
//! Both are resolved into a validated [`RunConfig`] in `herald-infra`.

use std::fmt;

use secrecy::SecretString;
use serde::Deserialize;

use crate::release::RepoId;

/// Default chat-completion model.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Environment variable names of the required values, in check order.
pub const REQUIRED_VARS: [&str; 5] = [
    "GITHUB_TOKEN",
    "GITHUB_REPOSITORY",
    "RELEASE_TAG",
    "OPENAI_API_KEY",
    "SLACK_WEBHOOK_URL",
];

/// Raw, unvalidated configuration values.
///
/// Does not derive Debug: three of the fields are secrets.
#[derive(Clone, Default)]
pub struct ConfigSources {
    pub github_token: Option<String>,
    pub repository: Option<String>,
    pub tag: Option<String>,
    pub openai_api_key: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub model: Option<String>,
    pub openai_base_url: Option<String>,
    pub github_api_url: Option<String>,
    pub product_name: Option<String>,
}

/// Optional settings read from a TOML config file.
///
/// Secrets and per-run values (token, tag, webhook) are never read from file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub model: Option<String>,
    pub openai_base_url: Option<String>,
    pub github_api_url: Option<String>,
    pub product_name: Option<String>,
}

/// Fully validated configuration for one run.
pub struct RunConfig {
    pub github_token: SecretString,
    pub repository: RepoId,
    pub tag: String,
    pub openai_api_key: SecretString,
    pub slack_webhook_url: SecretString,
    pub model: String,
    pub openai_base_url: String,
    pub github_api_url: String,
    pub product_name: String,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("github_token", &"[REDACTED]")
            .field("repository", &self.repository)
            .field("tag", &self.tag)
            .field("openai_api_key", &"[REDACTED]")
            .field("slack_webhook_url", &"[REDACTED]")
            .field("model", &self.model)
            .field("openai_base_url", &self.openai_base_url)
            .field("github_api_url", &self.github_api_url)
            .field("product_name", &self.product_name)
            .finish()
    }
}
