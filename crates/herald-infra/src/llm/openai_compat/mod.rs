//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenAI and any endpoint that
//! speaks the same chat completions protocol via a configurable base URL.
//!
//! Uses [`async_openai`] for type-safe request/response handling.

pub mod config;

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use herald_core::llm::provider::LlmProvider;
use herald_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage};

use self::config::OpenAiCompatConfig;

/// Provider for any OpenAI-compatible chat completions API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
    request_timeout: Duration,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
            request_timeout: config.request_timeout,
        }
    }

    /// Create a provider for an OpenAI-compatible base URL.
    pub fn with_base_url(api_key: SecretString, model: &str, base_url: &str) -> Self {
        Self::new(config::custom_endpoint(api_key, model, base_url))
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
            })
            .collect();

        // Use the model from the request if set, otherwise fall back to config default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);
        debug!(
            provider = %self.provider_name,
            model = %oai_request.model,
            messages = oai_request.messages.len(),
            timeout_secs = self.request_timeout.as_secs_f64(),
            "Sending chat completion request"
        );

        // The deadline covers the client's own rate-limit backoff as well.
        let response = tokio::time::timeout(
            self.request_timeout,
            self.client.chat().create(oai_request),
        )
        .await
        .map_err(|_| LlmError::Timeout(self.request_timeout))?
        .map_err(map_openai_error)?;

        // Whatever the first choice says is the answer; absent content is empty.
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            usage,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "invalid_api_key"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited
            } else if code == "context_length_exceeded"
                || api_err.message.contains("maximum context length")
            {
                LlmError::ContextLengthExceeded
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited,
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockServer;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use herald_types::config::DEFAULT_OPENAI_BASE_URL;
    use herald_types::llm::Message;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    fn request(model: &str, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages,
        }
    }

    fn provider_with_timeout(base_url: &str, request_timeout: Duration) -> OpenAiCompatibleProvider {
        let mut config =
            config::custom_endpoint(SecretString::from("sk-test"), "gpt-4", base_url);
        config.request_timeout = request_timeout;
        OpenAiCompatibleProvider::new(config)
    }

    #[test]
    fn test_build_request_user_message() {
        let provider = OpenAiCompatibleProvider::with_base_url(
            SecretString::from("sk-test"),
            "gpt-4",
            DEFAULT_OPENAI_BASE_URL,
        );
        assert_eq!(provider.name(), "openai");

        let oai_req = provider.build_request(&request("gpt-4", vec![Message::user("Summarize")]));
        assert_eq!(oai_req.model, "gpt-4");
        assert_eq!(oai_req.messages.len(), 1);
        assert!(matches!(
            &oai_req.messages[0],
            ChatCompletionRequestMessage::User(_)
        ));
        assert!(oai_req.max_completion_tokens.is_none());
        assert!(oai_req.stream.is_none());
    }

    #[test]
    fn test_build_request_empty_model_uses_default() {
        let provider = OpenAiCompatibleProvider::with_base_url(
            SecretString::from("sk-test"),
            "gpt-4o",
            DEFAULT_OPENAI_BASE_URL,
        );
        let oai_req = provider.build_request(&request("", vec![]));
        assert_eq!(oai_req.model, "gpt-4o");
    }

    #[tokio::test]
    async fn test_slow_endpoint_hits_deadline() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                StatusCode::OK
            }),
        );
        let server = MockServer::start(app).await;
        let provider = provider_with_timeout(
            &format!("{}/v1", server.base_url()),
            Duration::from_millis(100),
        );

        let err = provider
            .complete(&request("gpt-4", vec![Message::user("x")]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Timeout(d) if d == Duration::from_millis(100)));
    }

    #[tokio::test]
    async fn test_rate_limit_is_bounded_by_deadline() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": {
                            "message": "Rate limit reached for gpt-4.",
                            "type": "requests",
                            "param": null,
                            "code": "rate_limit_exceeded"
                        }
                    })),
                )
            }),
        );
        let server = MockServer::start(app).await;
        let provider = provider_with_timeout(
            &format!("{}/v1", server.base_url()),
            Duration::from_millis(300),
        );

        let started = std::time::Instant::now();
        let err = provider
            .complete(&request("gpt-4", vec![Message::user("x")]))
            .await
            .unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(
            err,
            LlmError::RateLimited | LlmError::Timeout(_)
        ));
    }

    #[tokio::test]
    async fn test_complete_against_mock_server() {
        let seen: Arc<Mutex<Vec<(Option<String>, Value)>>> = Arc::default();
        let seen_handler = seen.clone();

        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = seen_handler.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.lock().unwrap().push((auth, body));
                    Json(json!({
                        "id": "chatcmpl-123",
                        "object": "chat.completion",
                        "created": 1677652288,
                        "model": "gpt-4-0613",
                        "choices": [{
                            "index": 0,
                            "message": {"role": "assistant", "content": "# What's New"},
                            "finish_reason": "stop",
                            "logprobs": null
                        }],
                        "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
                    }))
                }
            }),
        );
        let server = MockServer::start(app).await;

        let provider = OpenAiCompatibleProvider::with_base_url(
            SecretString::from("sk-test"),
            "gpt-4",
            &format!("{}/v1", server.base_url()),
        );
        assert_eq!(provider.name(), "openai_compatible");

        let response = provider
            .complete(&request("gpt-4", vec![Message::user("fix: crash on startup")]))
            .await
            .unwrap();

        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.content, "# What's New");
        assert_eq!(response.usage.input_tokens, 42);
        assert_eq!(response.usage.output_tokens, 7);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("Bearer sk-test"));
        assert_eq!(seen[0].1["model"], "gpt-4");
        assert_eq!(seen[0].1["messages"][0]["role"], "user");
        assert_eq!(seen[0].1["messages"][0]["content"], "fix: crash on startup");
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_string() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                Json(json!({
                    "id": "chatcmpl-empty",
                    "object": "chat.completion",
                    "created": 1677652288,
                    "model": "gpt-4",
                    "choices": []
                }))
            }),
        );
        let server = MockServer::start(app).await;

        let provider = OpenAiCompatibleProvider::with_base_url(
            SecretString::from("sk-test"),
            "gpt-4",
            &format!("{}/v1", server.base_url()),
        );
        let response = provider
            .complete(&request("gpt-4", vec![Message::user("x")]))
            .await
            .unwrap();
        assert_eq!(response.content, "");
        assert_eq!(response.usage.output_tokens, 0);
    }

    #[tokio::test]
    async fn test_invalid_key_maps_to_auth_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": {
                            "message": "Incorrect API key provided: sk-test.",
                            "type": "invalid_request_error",
                            "param": null,
                            "code": "invalid_api_key"
                        }
                    })),
                )
            }),
        );
        let server = MockServer::start(app).await;

        let provider = OpenAiCompatibleProvider::with_base_url(
            SecretString::from("sk-test"),
            "gpt-4",
            &format!("{}/v1", server.base_url()),
        );
        let err = provider
            .complete(&request("gpt-4", vec![Message::user("x")]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }
}
