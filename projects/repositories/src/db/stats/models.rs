use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable, Text, Uuid as SqlUuid};
use serde::Serialize;
use uuid::Uuid;

/// Most starred repository of one language.
#[derive(Debug, Clone, PartialEq, Eq, QueryableByName, Serialize)]
pub struct TopRepository {
    #[diesel(sql_type = Text)]
    pub language_name: String,
    #[diesel(sql_type = Text)]
    pub full_name: String,
    #[diesel(sql_type = BigInt)]
    pub stars: i64,
}

/// Star total of one language and its distance to the next larger total.
#[derive(Debug, Clone, PartialEq, Eq, QueryableByName, Serialize)]
pub struct LanguageStarSum {
    #[diesel(sql_type = Text)]
    pub language_name: String,
    #[diesel(sql_type = BigInt)]
    pub stars_sum: i64,
    #[diesel(sql_type = BigInt)]
    pub stars_difference: i64,
}

/// Flat row of the language/repository left join. Repository columns are
/// null for languages without repositories.
#[derive(Debug, Clone, PartialEq, Eq, QueryableByName)]
pub struct LanguageRepositoryRow {
    #[diesel(sql_type = SqlUuid)]
    pub language_id: Uuid,
    #[diesel(sql_type = Text)]
    pub language_name: String,
    #[diesel(sql_type = Nullable<SqlUuid>)]
    pub repository_id: Option<Uuid>,
    #[diesel(sql_type = Nullable<Text>)]
    pub repository_name: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub stars: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageWithRepositories {
    #[serde(rename = "languageId")]
    pub language_id: Uuid,
    pub language_name: String,
    pub repositories: Vec<RepositorySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub repository_id: Uuid,
    pub repository_name: String,
    pub stars: i64,
}

/// Folds ordered join rows into one entry per language, keeping row order.
pub fn group_languages(rows: Vec<LanguageRepositoryRow>) -> Vec<LanguageWithRepositories> {
    let mut languages: Vec<LanguageWithRepositories> = Vec::new();

    for row in rows {
        let starts_new_language = languages
            .last()
            .map_or(true, |current| current.language_id != row.language_id);

        if starts_new_language {
            languages.push(LanguageWithRepositories {
                language_id: row.language_id,
                language_name: row.language_name,
                repositories: Vec::new(),
            });
        }

        if let (Some(repository_id), Some(repository_name), Some(stars), Some(current)) = (
            row.repository_id,
            row.repository_name,
            row.stars,
            languages.last_mut(),
        ) {
            current.repositories.push(RepositorySummary {
                repository_id,
                repository_name,
                stars,
            });
        }
    }

    languages
}
