//! Storage capabilities, one trait per operation.
//!
//! Consumers depend on the narrow trait they use; `postgres` provides the
//! diesel-backed implementations.

pub mod postgres;

use async_trait::async_trait;
use interfaces_github_search::index::LanguageRepositories;
use thiserror::Error;
use tokio::task::JoinError;

use crate::db::{
    language::queries::UpsertLanguageError,
    repository::{
        models::LanguageRepository,
        queries::{DeleteRepositoryError, GetRepositoriesForLanguageError, UpsertRepositoryError},
    },
    stats::{
        models::{LanguageStarSum, LanguageWithRepositories, TopRepository},
        queries::{
            GetLanguagesWithRepositoriesError, GetStarSumPerLanguageError,
            GetTopRepositoryPerLanguageError,
        },
    },
};
use crate::types::{LanguageId, RepositoryId, SupportedLanguage};

#[async_trait]
pub trait PersistLanguageRepositories: Send + Sync {
    /// Upserts the language and all fetched repositories atomically.
    async fn persist(
        &self,
        fetched: LanguageRepositories,
    ) -> Result<LanguageId, PersistLanguageRepositoriesError>;
}

#[async_trait]
pub trait RemoveRepository: Send + Sync {
    async fn remove(&self, repository_id: RepositoryId)
        -> Result<RepositoryId, RemoveRepositoryError>;
}

#[async_trait]
pub trait ReadRepositoriesForLanguage: Send + Sync {
    async fn repositories_for_language(
        &self,
        language: SupportedLanguage,
    ) -> Result<Vec<LanguageRepository>, ReadStoreError>;
}

#[async_trait]
pub trait ReadTopRepositoryPerLanguage: Send + Sync {
    async fn top_repository_per_language(&self) -> Result<Vec<TopRepository>, ReadStoreError>;
}

#[async_trait]
pub trait ReadStarSumPerLanguage: Send + Sync {
    async fn star_sum_per_language(&self) -> Result<Vec<LanguageStarSum>, ReadStoreError>;
}

#[async_trait]
pub trait ReadLanguagesWithRepositories: Send + Sync {
    async fn languages_with_repositories(
        &self,
    ) -> Result<Vec<LanguageWithRepositories>, ReadStoreError>;
}

#[derive(Debug, Error)]
pub enum PersistLanguageRepositoriesError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error(transparent)]
    UpsertLanguage {
        #[from]
        source: UpsertLanguageError,
    },

    #[error("{full_name} (language {language_id}): {source}")]
    UpsertRepository {
        language_id: LanguageId,
        full_name: String,
        #[source]
        source: UpsertRepositoryError,
    },

    #[error("InvalidStarCount: {full_name} reported {stars} stars")]
    InvalidStarCount { full_name: String, stars: i64 },

    #[error("Transaction: {source}")]
    Transaction {
        #[from]
        source: diesel::result::Error,
    },

    #[error("Blocking: {source}")]
    Blocking {
        #[from]
        source: JoinError,
    },
}

#[derive(Debug, Error)]
pub enum RemoveRepositoryError {
    #[error("repository not found")]
    NotFound { repository_id: RepositoryId },

    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error(transparent)]
    DeleteRepository {
        #[from]
        source: DeleteRepositoryError,
    },

    #[error("Blocking: {source}")]
    Blocking {
        #[from]
        source: JoinError,
    },
}

impl RemoveRepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoveRepositoryError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum ReadStoreError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error(transparent)]
    GetRepositoriesForLanguage {
        #[from]
        source: GetRepositoriesForLanguageError,
    },

    #[error(transparent)]
    GetTopRepositoryPerLanguage {
        #[from]
        source: GetTopRepositoryPerLanguageError,
    },

    #[error(transparent)]
    GetStarSumPerLanguage {
        #[from]
        source: GetStarSumPerLanguageError,
    },

    #[error(transparent)]
    GetLanguagesWithRepositories {
        #[from]
        source: GetLanguagesWithRepositoriesError,
    },

    #[error("Blocking: {source}")]
    Blocking {
        #[from]
        source: JoinError,
    },
}
