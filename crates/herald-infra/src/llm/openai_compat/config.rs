//! Configuration for OpenAI-compatible providers.

use std::time::Duration;

use secrecy::SecretString;

use herald_types::config::DEFAULT_OPENAI_BASE_URL;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Default model identifier (e.g., "gpt-4").
    pub model: String,
    /// Upper bound on one completion call, including client-side backoff.
    pub request_timeout: Duration,
}

/// Longest a single completion call may take before it is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for any endpoint speaking the OpenAI chat completions
/// protocol (Azure proxies, local gateways, mock servers).
pub fn custom_endpoint(api_key: SecretString, model: &str, base_url: &str) -> OpenAiCompatConfig {
    let provider_name = if base_url.trim_end_matches('/') == DEFAULT_OPENAI_BASE_URL {
        "openai"
    } else {
        "openai_compatible"
    };

    OpenAiCompatConfig {
        provider_name: provider_name.into(),
        base_url: base_url.trim_end_matches('/').into(),
        api_key,
        model: model.into(),
        request_timeout: DEFAULT_REQUEST_TIMEOUT,
    }
}
