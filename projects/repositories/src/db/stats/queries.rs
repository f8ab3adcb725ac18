use diesel::prelude::*;
use crate::db::stats::models::*;

const TOP_REPOSITORY_PER_LANGUAGE: &str = r#"
WITH ranked_repositories AS (
    SELECT pl.name AS language_name,
           r.full_name,
           r.stars,
           ROW_NUMBER() OVER (
               PARTITION BY r.language_id
               ORDER BY r.stars DESC, r.full_name ASC
           ) AS position
    FROM repositories r
             JOIN programming_languages pl ON pl.id = r.language_id
)
SELECT language_name, full_name, stars
FROM ranked_repositories
WHERE position = 1
ORDER BY stars DESC, language_name ASC
"#;

const STAR_SUM_PER_LANGUAGE: &str = r#"
WITH language_star_sums AS (
    SELECT pl.name               AS language_name,
           SUM(r.stars)::BIGINT  AS stars_sum
    FROM programming_languages pl
             JOIN repositories r ON r.language_id = pl.id
    GROUP BY pl.id, pl.name
)
SELECT language_name,
       stars_sum,
       (stars_sum - COALESCE(
           LAG(stars_sum) OVER (ORDER BY stars_sum DESC, language_name ASC),
           stars_sum
       ))::BIGINT AS stars_difference
FROM language_star_sums
ORDER BY stars_sum DESC, language_name ASC
"#;

const LANGUAGES_WITH_REPOSITORIES: &str = r#"
SELECT pl.id        AS language_id,
       pl.name      AS language_name,
       r.id         AS repository_id,
       r.full_name  AS repository_name,
       r.stars      AS stars
FROM programming_languages pl
         LEFT JOIN repositories r ON r.language_id = pl.id
ORDER BY pl.name ASC, r.full_name ASC
"#;

#[derive(Debug, thiserror::Error)]
pub enum GetTopRepositoryPerLanguageError {
    #[error("GetTopRepositoryPerLanguage: {source}")]
    GetTopRepositoryPerLanguage {
        #[from]
        source: diesel::result::Error,
    },
}

/// One repository per language: the most starred, `full_name` ascending on ties.
pub fn get_top_repository_per_language(
    conn: &mut PgConnection
) -> Result<Vec<TopRepository>, GetTopRepositoryPerLanguageError> {
    diesel::sql_query(TOP_REPOSITORY_PER_LANGUAGE)
        .load(conn)
        .map_err(|source| GetTopRepositoryPerLanguageError::GetTopRepositoryPerLanguage { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetStarSumPerLanguageError {
    #[error("GetStarSumPerLanguage: {source}")]
    GetStarSumPerLanguage {
        #[from]
        source: diesel::result::Error,
    },
}

/// Star totals ordered by sum descending. The first row's difference is 0.
pub fn get_star_sum_per_language(
    conn: &mut PgConnection
) -> Result<Vec<LanguageStarSum>, GetStarSumPerLanguageError> {
    diesel::sql_query(STAR_SUM_PER_LANGUAGE)
        .load(conn)
        .map_err(|source| GetStarSumPerLanguageError::GetStarSumPerLanguage { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetLanguagesWithRepositoriesError {
    #[error("GetLanguagesWithRepositories: {source}")]
    GetLanguagesWithRepositories {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_languages_with_repositories(
    conn: &mut PgConnection
) -> Result<Vec<LanguageWithRepositories>, GetLanguagesWithRepositoriesError> {
    let rows: Vec<LanguageRepositoryRow> = diesel::sql_query(LANGUAGES_WITH_REPOSITORIES)
        .load(conn)
        .map_err(|source| GetLanguagesWithRepositoriesError::GetLanguagesWithRepositories { source })?;

    Ok(group_languages(rows))
}
