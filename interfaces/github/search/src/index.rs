use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_MIN_STARS: u64 = 10_000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// GitHub caps a search page at 100 items.
const PER_PAGE: &str = "100";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// One item of the `items` array returned by `/search/repositories`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubRepository {
    pub full_name: String,
    pub owner: Owner,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub stargazers_count: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<GitHubRepository>,
}

/// Repositories fetched for a language, in the order GitHub ranked them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRepositories {
    pub language_name: String,
    pub items: Vec<GitHubRepository>,
}

#[derive(Debug, Clone)]
pub struct GitHubSearchSettings {
    pub api_url: String,
    pub token: Option<String>,
    pub min_stars: u64,
    pub timeout: Duration,
}

impl Default for GitHubSearchSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            min_stars: DEFAULT_MIN_STARS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildClientError {
    #[error("BuildClient: {source}")]
    BuildClient { source: reqwest::Error },
}

#[derive(Debug, Error)]
pub enum FetchRepositoriesError {
    #[error("RequestSend: {source}")]
    RequestSend { source: reqwest::Error },

    #[error("fetchRepositories: external service responded with status {status}")]
    UnexpectedStatus { status: StatusCode },

    #[error("ResponseRead: {source}")]
    ResponseRead { source: reqwest::Error },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody { source: serde_json::Error },
}

impl FetchRepositoriesError {
    /// True when the request never produced a usable response (network, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::RequestSend { .. } | Self::ResponseRead { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::RequestSend { source } | Self::ResponseRead { source } => source.is_timeout(),
            _ => false,
        }
    }
}

pub struct GitHubSearchClient {
    client: Client,
    api_url: String,
    token: Option<String>,
    min_stars: u64,
}

impl GitHubSearchClient {
    pub fn new(settings: GitHubSearchSettings) -> Result<Self, BuildClientError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent("rust-client")
            .build()
            .map_err(|source| BuildClientError::BuildClient { source })?;

        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.token,
            min_stars: settings.min_stars,
        })
    }

    pub async fn fetch_repositories(
        &self,
        language_name: &str,
    ) -> Result<LanguageRepositories, FetchRepositoriesError> {
        let url = format!("{}/search/repositories", self.api_url);
        let query = format!("stars:>={} language:{}", self.min_stars, language_name);

        let mut request = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .query(&[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", PER_PAGE),
            ]);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| FetchRepositoriesError::RequestSend { source })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchRepositoriesError::UnexpectedStatus { status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchRepositoriesError::ResponseRead { source })?;

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|source| FetchRepositoriesError::DeserializeResponseBody { source })?;

        debug!(
            language = language_name,
            count = parsed.items.len(),
            "fetched repositories from GitHub"
        );

        Ok(LanguageRepositories {
            language_name: language_name.to_string(),
            items: parsed.items,
        })
    }
}
