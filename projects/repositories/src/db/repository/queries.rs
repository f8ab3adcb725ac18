use diesel::{prelude::*, upsert::excluded};
use uuid::Uuid;
use crate::db::{
    repository::models::*,
    schema::{programming_languages, repositories},
};

/// Upper bound on rows returned for a single language.
pub const REPOSITORIES_PER_LANGUAGE_LIMIT: i64 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum UpsertRepositoryError {
    #[error("UpsertRepository: {source}")]
    UpsertRepository {
        #[from]
        source: diesel::result::Error,
    },
}

/// Inserts the repository, or refreshes `stars` and `description` when the
/// `(language_id, full_name)` pair is already stored. Returns the stored id.
pub fn upsert_repository(
    conn: &mut PgConnection,
    new: &NewRepository
) -> Result<Uuid, UpsertRepositoryError> {
    diesel::insert_into(repositories::table)
        .values(new)
        .on_conflict((repositories::language_id, repositories::full_name))
        .do_update()
        .set((
            repositories::stars.eq(excluded(repositories::stars)),
            repositories::description.eq(excluded(repositories::description)),
        ))
        .returning(repositories::id)
        .get_result(conn)
        .map_err(|source| UpsertRepositoryError::UpsertRepository { source })
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteRepositoryError {
    #[error("DeleteRepository: {source}")]
    DeleteRepository {
        #[from]
        source: diesel::result::Error,
    },
}

/// Returns the number of deleted rows.
pub fn delete_repository(
    conn: &mut PgConnection,
    repository_id: Uuid
) -> Result<usize, DeleteRepositoryError> {
    diesel::delete(repositories::table.filter(repositories::id.eq(repository_id)))
        .execute(conn)
        .map_err(|source| DeleteRepositoryError::DeleteRepository { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetRepositoryByNameError {
    #[error("GetRepositoryByName: {source}")]
    GetRepositoryByName {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_repository_by_name(
    conn: &mut PgConnection,
    language_id_val: Uuid,
    full_name_val: &str
) -> Result<Option<Repository>, GetRepositoryByNameError> {
    repositories::table
        .filter(repositories::language_id.eq(language_id_val))
        .filter(repositories::full_name.eq(full_name_val))
        .select(Repository::as_select())
        .first(conn)
        .optional()
        .map_err(|source| GetRepositoryByNameError::GetRepositoryByName { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetRepositoriesForLanguageError {
    #[error("GetRepositoriesForLanguage: {source}")]
    GetRepositoriesForLanguage {
        #[from]
        source: diesel::result::Error,
    },
}

/// Repositories of one language, most starred first.
pub fn get_repositories_for_language(
    conn: &mut PgConnection,
    language_name: &str
) -> Result<Vec<LanguageRepository>, GetRepositoriesForLanguageError> {
    repositories::table
        .inner_join(programming_languages::table)
        .filter(programming_languages::name.eq(language_name))
        .order((repositories::stars.desc(), repositories::full_name.asc()))
        .limit(REPOSITORIES_PER_LANGUAGE_LIMIT)
        .select((
            repositories::full_name,
            repositories::stars,
            repositories::description,
        ))
        .load::<LanguageRepository>(conn)
        .map_err(|source| GetRepositoriesForLanguageError::GetRepositoriesForLanguage { source })
}
