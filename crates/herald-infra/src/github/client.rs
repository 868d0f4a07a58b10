//! GitHubReleaseHost -- concrete [`ReleaseHost`] for the GitHub REST API.
//!
//! Creates releases with `POST /repos/{owner}/{repo}/releases` and rewrites
//! their body with `PATCH /repos/{owner}/{repo}/releases/{id}`.
//!
//! The token is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use herald_core::release::host::ReleaseHost;
use herald_types::config::DEFAULT_GITHUB_API_URL;
use herald_types::error::HostError;
use herald_types::release::{NewRelease, Release, ReleaseUpdate, RepoId};

/// GitHub API version pinned in every request.
const API_VERSION: &str = "2022-11-28";

/// GitHub release host bound to one repository.
///
/// Does NOT derive Debug: the token must never reach logs.
pub struct GitHubReleaseHost {
    client: reqwest::Client,
    token: SecretString,
    api_url: String,
    repo: RepoId,
}

/// Error body returned by the GitHub API.
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

impl GitHubReleaseHost {
    /// Create a host for `repo` against `https://api.github.com`.
    pub fn new(token: SecretString, repo: RepoId) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("herald/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HostError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            repo,
        })
    }

    /// Override the API base URL (GitHub Enterprise, tests).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url, self.repo.owner, self.repo.repo
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(self.token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Send a prepared request and decode the release in the response.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Release, HostError> {
        let response = builder
            .send()
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status.as_u16(), &body));
        }

        response
            .json::<Release>()
            .await
            .map_err(|e| HostError::Deserialization(format!("failed to parse release: {e}")))
    }
}

impl ReleaseHost for GitHubReleaseHost {
    async fn create_release(&self, release: &NewRelease) -> Result<Release, HostError> {
        let url = self.releases_url();
        debug!(repo = %self.repo, tag = %release.tag_name, "POST {url}");

        self.send(self.request(reqwest::Method::POST, &url).json(release))
            .await
    }

    async fn update_release_body(&self, release_id: u64, body: &str) -> Result<Release, HostError> {
        let url = format!("{}/{release_id}", self.releases_url());
        debug!(repo = %self.repo, release_id, "PATCH {url}");

        let update = ReleaseUpdate {
            body: body.to_string(),
        };
        self.send(self.request(reqwest::Method::PATCH, &url).json(&update))
            .await
    }
}

/// Map a non-success status and its body to a [`HostError`].
fn map_status(status: u16, body: &str) -> HostError {
    let message = serde_json::from_str::<GitHubErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        401 | 403 => HostError::AuthenticationFailed { status },
        404 => HostError::NotFound,
        _ => HostError::Status { status, message },
    }
}
