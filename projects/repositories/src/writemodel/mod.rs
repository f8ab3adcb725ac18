//! Write path: fetch a language's repositories from GitHub and persist them.

use async_trait::async_trait;
use interfaces_github_search::index::{
    FetchRepositoriesError, GitHubSearchClient, LanguageRepositories,
};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::storage::{PersistLanguageRepositories, PersistLanguageRepositoriesError};
use crate::types::{LanguageId, SupportedLanguage};

#[async_trait]
pub trait FetchLanguageRepositories: Send + Sync {
    async fn fetch(
        &self,
        language: SupportedLanguage,
    ) -> Result<LanguageRepositories, FetchRepositoriesError>;
}

#[async_trait]
impl FetchLanguageRepositories for GitHubSearchClient {
    async fn fetch(
        &self,
        language: SupportedLanguage,
    ) -> Result<LanguageRepositories, FetchRepositoriesError> {
        self.fetch_repositories(language.as_str()).await
    }
}

#[async_trait]
pub trait HandleRepositories: Send + Sync {
    async fn handle_repositories(
        &self,
        language: SupportedLanguage,
    ) -> Result<LanguageId, HandleRepositoriesError>;
}

/// Either stage's error, unchanged.
#[derive(Debug, Error)]
pub enum HandleRepositoriesError {
    #[error(transparent)]
    Fetch {
        #[from]
        source: FetchRepositoriesError,
    },

    #[error(transparent)]
    Persist {
        #[from]
        source: PersistLanguageRepositoriesError,
    },
}

pub struct WriteLanguageRepositoriesCommandHandler<F, P> {
    fetcher: F,
    store: P,
}

impl<F, P> WriteLanguageRepositoriesCommandHandler<F, P>
where
    F: FetchLanguageRepositories,
    P: PersistLanguageRepositories,
{
    pub fn new(fetcher: F, store: P) -> Self {
        Self { fetcher, store }
    }
}

#[async_trait]
impl<F, P> HandleRepositories for WriteLanguageRepositoriesCommandHandler<F, P>
where
    F: FetchLanguageRepositories,
    P: PersistLanguageRepositories,
{
    #[instrument(skip(self))]
    async fn handle_repositories(
        &self,
        language: SupportedLanguage,
    ) -> Result<LanguageId, HandleRepositoriesError> {
        let fetched = self.fetcher.fetch(language).await.map_err(|source| {
            warn!(
                transport = source.is_transport(),
                timeout = source.is_timeout(),
                "fetching repositories failed: {source}"
            );
            HandleRepositoriesError::Fetch { source }
        })?;

        let count = fetched.items.len();
        let language_id = self.store.persist(fetched).await?;

        info!(%language_id, count, "stored repositories for {language}");
        Ok(language_id)
    }
}
