use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, StatusCode, header::ACCEPT};

use super::repo::GitHubRepo;
use super::types::RawRelease;
use crate::error::{PeekError, classify_status, classify_transport};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_JSON: &str = "application/vnd.github+json";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Check that both the account and the repository exist.
    async fn validate(&self, repo: &GitHubRepo) -> Result<(), PeekError>;

    /// Fetch the latest release. Must only be called after `validate` succeeds.
    /// An empty asset list is still a success. The result is unannotated;
    /// callers turn it into a `ReleaseInfo` with `ReleaseInfo::from_raw`.
    async fn fetch_latest_release(&self, repo: &GitHubRepo) -> Result<RawRelease, PeekError>;

    fn api_url(&self) -> &str;
}

pub struct GitHub {
    pub client: Client,
    pub api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { client, api_url }
    }

    /// GET `url` and return the status, mapping transport failures.
    async fn status_of(&self, url: &str) -> Result<StatusCode, PeekError> {
        debug!("Checking {}...", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;
        Ok(response.status())
    }
}

#[async_trait]
impl ReleaseSource for GitHub {
    #[tracing::instrument(skip(self))]
    async fn validate(&self, repo: &GitHubRepo) -> Result<(), PeekError> {
        let user_url = format!("{}/users/{}", self.api_url, repo.owner);
        let status = self.status_of(&user_url).await?;
        if !status.is_success() {
            debug!("User lookup for {} returned {}", repo.owner, status);
            return Err(classify_status(status, PeekError::UserNotFound));
        }

        let repo_url = format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.repo);
        let status = self.status_of(&repo_url).await?;
        if !status.is_success() {
            debug!("Repository lookup for {} returned {}", repo, status);
            return Err(classify_status(status, PeekError::RepoNotFound));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_latest_release(&self, repo: &GitHubRepo) -> Result<RawRelease, PeekError> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, repo.owner, repo.repo
        );

        debug!("Fetching latest release from {}...", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(
                status,
                PeekError::UnexpectedStatus(status.as_u16()),
            ));
        }

        let release = response.json::<RawRelease>().await.map_err(|e| {
            debug!("Failed to parse release JSON: {}", e);
            PeekError::ConnectionFailed
        })?;

        info!(
            "Latest release of {} is {} with {} asset(s)",
            repo,
            release.tag_name,
            release.assets.len()
        );

        Ok(release)
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }
}
