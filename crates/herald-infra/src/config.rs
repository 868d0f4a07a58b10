//! Run configuration loader for Herald.
//!
//! Required values come from CLI flags or the environment (clap merges the
//! two). Optional settings may also come from a `herald.toml` file; flags
//! and environment win over the file, and built-in defaults fill the rest.
//!
//! Everything here runs before any network call.

use std::path::Path;

use secrecy::SecretString;

use herald_types::config::{
    ConfigSources, DEFAULT_GITHUB_API_URL, DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL, FileConfig,
    RunConfig,
};
use herald_types::error::ConfigError;
use herald_types::release::RepoId;

/// Load optional settings from a TOML file.
///
/// The file is only read when a path was given explicitly, so a missing
/// file is an error here rather than a silent default.
pub async fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::File {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let config = toml::from_str::<FileConfig>(&content).map_err(|e| ConfigError::File {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Validate raw sources into a [`RunConfig`].
///
/// Every missing required value is reported at once, in the order of
/// [`herald_types::config::REQUIRED_VARS`].
pub fn resolve_run_config(
    sources: ConfigSources,
    file: FileConfig,
) -> Result<RunConfig, ConfigError> {
    let github_token = present(sources.github_token);
    let repository = present(sources.repository);
    let tag = present(sources.tag);
    let openai_api_key = present(sources.openai_api_key);
    let slack_webhook_url = present(sources.slack_webhook_url);

    let mut missing = Vec::new();
    if github_token.is_none() {
        missing.push("GITHUB_TOKEN");
    }
    if repository.is_none() {
        missing.push("GITHUB_REPOSITORY");
    }
    if tag.is_none() {
        missing.push("RELEASE_TAG");
    }
    if openai_api_key.is_none() {
        missing.push("OPENAI_API_KEY");
    }
    if slack_webhook_url.is_none() {
        missing.push("SLACK_WEBHOOK_URL");
    }

    let (
        Some(github_token),
        Some(repository),
        Some(tag),
        Some(openai_api_key),
        Some(slack_webhook_url),
    ) = (github_token, repository, tag, openai_api_key, slack_webhook_url)
    else {
        return Err(ConfigError::Missing(missing));
    };

    let repository: RepoId = repository.parse()?;

    validate_url("SLACK_WEBHOOK_URL", &slack_webhook_url)?;

    let model = present(sources.model)
        .or(present(file.model))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let openai_base_url = present(sources.openai_base_url)
        .or(present(file.openai_base_url))
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
    validate_url("OPENAI_BASE_URL", &openai_base_url)?;

    let github_api_url = present(sources.github_api_url)
        .or(present(file.github_api_url))
        .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());
    validate_url("GITHUB_API_URL", &github_api_url)?;

    let product_name = present(sources.product_name)
        .or(present(file.product_name))
        .unwrap_or_else(|| repository.repo.clone());

    Ok(RunConfig {
        github_token: SecretString::from(github_token),
        repository,
        tag,
        openai_api_key: SecretString::from(openai_api_key),
        slack_webhook_url: SecretString::from(slack_webhook_url),
        model,
        openai_base_url,
        github_api_url,
        product_name,
    })
}

/// Treat blank values the same as absent ones.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(value).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid {
            name,
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_types::config::REQUIRED_VARS;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    fn full_sources() -> ConfigSources {
        ConfigSources {
            github_token: Some("ghp_token".to_string()),
            repository: Some("acme/widgets".to_string()),
            tag: Some("v1.2.3".to_string()),
            openai_api_key: Some("sk-key".to_string()),
            slack_webhook_url: Some("https://hooks.slack.com/services/T/B/X".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn all_absent_reports_every_required_name() {
        let err = resolve_run_config(ConfigSources::default(), FileConfig::default()).unwrap_err();
        match err {
            ConfigError::Missing(names) => assert_eq!(names, REQUIRED_VARS.to_vec()),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let sources = ConfigSources {
            tag: Some("   ".to_string()),
            openai_api_key: Some(String::new()),
            ..full_sources()
        };
        let err = resolve_run_config(sources, FileConfig::default()).unwrap_err();
        match err {
            ConfigError::Missing(names) => assert_eq!(names, vec!["RELEASE_TAG", "OPENAI_API_KEY"]),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let config = resolve_run_config(full_sources(), FileConfig::default()).unwrap();
        assert_eq!(config.repository.to_string(), "acme/widgets");
        assert_eq!(config.tag, "v1.2.3");
        assert_eq!(config.github_token.expose_secret(), "ghp_token");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.github_api_url, DEFAULT_GITHUB_API_URL);
        assert_eq!(config.product_name, "widgets");
    }

    #[test]
    fn flags_override_file_and_file_overrides_defaults() {
        let sources = ConfigSources {
            model: Some("gpt-4o".to_string()),
            ..full_sources()
        };
        let file = FileConfig {
            model: Some("gpt-3.5-turbo".to_string()),
            product_name: Some("AIChat".to_string()),
            ..Default::default()
        };
        let config = resolve_run_config(sources, file).unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.product_name, "AIChat");
    }

    #[test]
    fn malformed_repository_is_rejected() {
        let sources = ConfigSources {
            repository: Some("widgets".to_string()),
            ..full_sources()
        };
        assert!(matches!(
            resolve_run_config(sources, FileConfig::default()),
            Err(ConfigError::InvalidRepository(_))
        ));
    }

    #[test]
    fn non_http_webhook_is_rejected() {
        let sources = ConfigSources {
            slack_webhook_url: Some("ftp://hooks.example/x".to_string()),
            ..full_sources()
        };
        assert!(matches!(
            resolve_run_config(sources, FileConfig::default()),
            Err(ConfigError::Invalid { name: "SLACK_WEBHOOK_URL", .. })
        ));
    }

    #[tokio::test]
    async fn load_file_config_reads_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("herald.toml");
        tokio::fs::write(
            &path,
            r#"
model = "gpt-4o-mini"
github_api_url = "https://github.example.com/api/v3"
"#,
        )
        .await
        .unwrap();

        let config = load_file_config(&path).await.unwrap();
        assert_eq!(config.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(
            config.github_api_url.as_deref(),
            Some("https://github.example.com/api/v3")
        );
    }

    #[tokio::test]
    async fn load_file_config_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_file_config(&tmp.path().join("nope.toml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::File { .. }));
    }

    #[tokio::test]
    async fn load_file_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("herald.toml");
        tokio::fs::write(&path, "model = [").await.unwrap();
        assert!(matches!(
            load_file_config(&path).await,
            Err(ConfigError::File { .. })
        ));
    }
}
