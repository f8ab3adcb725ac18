use diesel::{dsl::now, prelude::*};
use uuid::Uuid;
use crate::db::{language::models::*, schema::programming_languages::dsl::*};

#[derive(Debug, thiserror::Error)]
pub enum UpsertLanguageError {
    #[error("UpsertLanguage: {source}")]
    UpsertLanguage {
        #[from]
        source: diesel::result::Error,
    },
}

/// Inserts the language or touches `updated_at` when the name already exists.
/// Returns the id of the stored row either way.
pub fn upsert_language(
    conn: &mut PgConnection,
    new: &NewProgrammingLanguage
) -> Result<Uuid, UpsertLanguageError> {
    diesel::insert_into(programming_languages)
        .values(new)
        .on_conflict(name)
        .do_update()
        .set(updated_at.eq(now))
        .returning(id)
        .get_result(conn)
        .map_err(|source| UpsertLanguageError::UpsertLanguage { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetLanguageByNameError {
    #[error("GetLanguageByName: {source}")]
    GetLanguageByName {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_language_by_name(
    conn: &mut PgConnection,
    name_val: &str
) -> Result<Option<ProgrammingLanguage>, GetLanguageByNameError> {
    programming_languages
        .filter(name.eq(name_val))
        .select(ProgrammingLanguage::as_select())
        .first(conn)
        .optional()
        .map_err(|source| GetLanguageByNameError::GetLanguageByName { source })
}
