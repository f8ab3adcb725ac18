use async_trait::async_trait;
use diesel::{Connection, PgConnection};
use interfaces_github_search::index::LanguageRepositories;
use tokio::task::JoinError;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{
    PersistLanguageRepositories, PersistLanguageRepositoriesError, ReadLanguagesWithRepositories,
    ReadRepositoriesForLanguage, ReadStarSumPerLanguage, ReadStoreError,
    ReadTopRepositoryPerLanguage, RemoveRepository, RemoveRepositoryError,
};
use crate::db::{
    language::{models::NewProgrammingLanguage, queries::upsert_language},
    repository::{
        models::{LanguageRepository, NewRepository},
        queries::{delete_repository, get_repositories_for_language, upsert_repository},
    },
    stats::{
        models::{LanguageStarSum, LanguageWithRepositories, TopRepository},
        queries::{
            get_languages_with_repositories, get_star_sum_per_language,
            get_top_repository_per_language,
        },
    },
    PgPool,
};
use crate::types::{LanguageId, RepositoryId, SupportedLanguage};

/// Persists the language and its repositories in one transaction.
/// Nothing is written when any row fails.
pub fn persist_language_repositories(
    conn: &mut PgConnection,
    fetched: &LanguageRepositories,
) -> Result<LanguageId, PersistLanguageRepositoriesError> {
    conn.transaction(|conn| {
        let language_id = LanguageId(upsert_language(
            conn,
            &NewProgrammingLanguage {
                id: Uuid::new_v4(),
                name: &fetched.language_name,
            },
        )?);

        for item in &fetched.items {
            if item.stargazers_count < 0 {
                return Err(PersistLanguageRepositoriesError::InvalidStarCount {
                    full_name: item.full_name.clone(),
                    stars: item.stargazers_count,
                });
            }

            let new = NewRepository {
                id: Uuid::new_v4(),
                language_id: language_id.0,
                full_name: &item.full_name,
                stars: item.stargazers_count,
                description: item.description.as_deref(),
                created_at: item.created_at.naive_utc(),
                owner: &item.owner.login,
            };

            upsert_repository(conn, &new).map_err(|source| {
                PersistLanguageRepositoriesError::UpsertRepository {
                    language_id,
                    full_name: item.full_name.clone(),
                    source,
                }
            })?;
        }

        Ok(language_id)
    })
}

/// Deletes one repository; zero affected rows is `NotFound`.
pub fn remove_repository(
    conn: &mut PgConnection,
    repository_id: RepositoryId,
) -> Result<RepositoryId, RemoveRepositoryError> {
    match delete_repository(conn, repository_id.0)? {
        0 => Err(RemoveRepositoryError::NotFound { repository_id }),
        _ => Ok(repository_id),
    }
}

/// Runs a blocking diesel operation on the blocking pool with a pooled connection.
async fn with_connection<T, E, F>(pool: &PgPool, operation: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<r2d2::Error> + From<JoinError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        operation(&mut *conn)
    })
    .await?
}

#[derive(Clone)]
pub struct PgWriteStore {
    pool: PgPool,
}

impl PgWriteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersistLanguageRepositories for PgWriteStore {
    #[instrument(skip_all, fields(language = %fetched.language_name, items = fetched.items.len()))]
    async fn persist(
        &self,
        fetched: LanguageRepositories,
    ) -> Result<LanguageId, PersistLanguageRepositoriesError> {
        let language_id =
            with_connection(&self.pool, move |conn| persist_language_repositories(conn, &fetched))
                .await?;
        debug!(%language_id, "persisted language repositories");
        Ok(language_id)
    }
}

#[async_trait]
impl RemoveRepository for PgWriteStore {
    #[instrument(skip(self))]
    async fn remove(
        &self,
        repository_id: RepositoryId,
    ) -> Result<RepositoryId, RemoveRepositoryError> {
        with_connection(&self.pool, move |conn| remove_repository(conn, repository_id)).await
    }
}

#[derive(Clone)]
pub struct PgReadStore {
    pool: PgPool,
}

impl PgReadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadRepositoriesForLanguage for PgReadStore {
    async fn repositories_for_language(
        &self,
        language: SupportedLanguage,
    ) -> Result<Vec<LanguageRepository>, ReadStoreError> {
        with_connection(&self.pool, move |conn| {
            get_repositories_for_language(conn, language.as_str()).map_err(ReadStoreError::from)
        })
        .await
    }
}

#[async_trait]
impl ReadTopRepositoryPerLanguage for PgReadStore {
    async fn top_repository_per_language(&self) -> Result<Vec<TopRepository>, ReadStoreError> {
        with_connection(&self.pool, |conn| {
            get_top_repository_per_language(conn).map_err(ReadStoreError::from)
        })
        .await
    }
}

#[async_trait]
impl ReadStarSumPerLanguage for PgReadStore {
    async fn star_sum_per_language(&self) -> Result<Vec<LanguageStarSum>, ReadStoreError> {
        with_connection(&self.pool, |conn| {
            get_star_sum_per_language(conn).map_err(ReadStoreError::from)
        })
        .await
    }
}

#[async_trait]
impl ReadLanguagesWithRepositories for PgReadStore {
    async fn languages_with_repositories(
        &self,
    ) -> Result<Vec<LanguageWithRepositories>, ReadStoreError> {
        with_connection(&self.pool, |conn| {
            get_languages_with_repositories(conn).map_err(ReadStoreError::from)
        })
        .await
    }
}
