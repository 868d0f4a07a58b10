//! CLI argument definitions for the `herald` binary.
//!
//! Every value can come from a flag or from the environment variable CI
//! systems already export; flags win.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use herald_types::config::ConfigSources;

/// Publish a release, summarize its notes with an LLM, and announce it in chat.
#[derive(Parser)]
#[command(name = "herald", version, about, long_about = None)]
pub struct Cli {
    /// GitHub token with permission to write releases.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository as `owner/repo`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Tag to create the release for.
    #[arg(long, env = "RELEASE_TAG")]
    pub tag: Option<String>,

    /// API key for the chat-completion endpoint.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Slack incoming-webhook URL.
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub slack_webhook_url: Option<String>,

    /// Chat-completion model [default: gpt-4].
    #[arg(long, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    /// GitHub REST API base URL (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,

    /// Product name used in the chat announcement [default: repository name].
    #[arg(long, env = "HERALD_PRODUCT_NAME")]
    pub product_name: Option<String>,

    /// Optional TOML file with model, URLs, and product name.
    #[arg(long, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the run report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Export spans to stdout via OpenTelemetry (cannot be combined with --json).
    #[arg(long, conflicts_with = "json")]
    pub otel: bool,

    /// Suppress all log output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Raw configuration values for validation.
    pub fn sources(&self) -> ConfigSources {
        ConfigSources {
            github_token: self.github_token.clone(),
            repository: self.repository.clone(),
            tag: self.tag.clone(),
            openai_api_key: self.openai_api_key.clone(),
            slack_webhook_url: self.slack_webhook_url.clone(),
            model: self.model.clone(),
            openai_base_url: self.openai_base_url.clone(),
            github_api_url: self.github_api_url.clone(),
            product_name: self.product_name.clone(),
        }
    }
}
