use thiserror::Error;

/// Errors raised while assembling run configuration.
///
/// Always raised before any network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid repository '{0}': expected 'owner/repo'")]
    InvalidRepository(String),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("failed to load config file {path}: {reason}")]
    File { path: String, reason: String },
}

/// Errors from the source-hosting release API.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("authentication failed (HTTP {status})")]
    AuthenticationFailed { status: u16 },

    #[error("release or repository not found")]
    NotFound,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from posting to the chat webhook.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("webhook rejected payload (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("payload encoding error: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_every_name() {
        let err = ConfigError::Missing(vec!["GITHUB_TOKEN", "RELEASE_TAG"]);
        assert_eq!(
            err.to_string(),
            "missing required configuration: GITHUB_TOKEN, RELEASE_TAG"
        );
    }

    #[test]
    fn test_host_status_display() {
        let err = HostError::Status {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 422: Validation Failed");
    }

    #[test]
    fn test_notify_rejected_display() {
        let err = NotifyError::Rejected {
            status: 400,
            body: "invalid_blocks".to_string(),
        };
        assert!(err.to_string().contains("invalid_blocks"));
        assert!(err.to_string().contains("400"));
    }
}
