use std::sync::Arc;

use interfaces_github_search::index::GitHubSearchClient;

use crate::config::Config;
use crate::db::PgPool;
use crate::endpoints::auth::Credentials;
use crate::storage::{
    postgres::{PgReadStore, PgWriteStore},
    ReadLanguagesWithRepositories, ReadRepositoriesForLanguage, ReadStarSumPerLanguage,
    ReadTopRepositoryPerLanguage, RemoveRepository,
};
use crate::writemodel::{HandleRepositories, WriteLanguageRepositoriesCommandHandler};

/// Handler dependencies, one capability per field.
#[derive(Clone)]
pub struct AppState {
    pub command_handler: Arc<dyn HandleRepositories>,
    pub remover: Arc<dyn RemoveRepository>,
    pub repositories_for_language: Arc<dyn ReadRepositoriesForLanguage>,
    pub top_repository_per_language: Arc<dyn ReadTopRepositoryPerLanguage>,
    pub star_sum_per_language: Arc<dyn ReadStarSumPerLanguage>,
    pub languages_with_repositories: Arc<dyn ReadLanguagesWithRepositories>,
    pub credentials: Credentials,
}

impl AppState {
    pub fn postgres(config: &Config, pool: PgPool, github: GitHubSearchClient) -> Self {
        let write_store = Arc::new(PgWriteStore::new(pool.clone()));
        let read_store = Arc::new(PgReadStore::new(pool.clone()));

        Self {
            command_handler: Arc::new(WriteLanguageRepositoriesCommandHandler::new(
                github,
                PgWriteStore::new(pool),
            )),
            remover: write_store,
            repositories_for_language: read_store.clone(),
            top_repository_per_language: read_store.clone(),
            star_sum_per_language: read_store.clone(),
            languages_with_repositories: read_store,
            credentials: Credentials::from_config(config),
        }
    }
}
