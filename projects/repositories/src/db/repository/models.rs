use chrono::NaiveDateTime;
use uuid::Uuid;
use diesel::prelude::*;
use serde::Serialize;
use crate::db::schema::repositories;
use crate::db::language::models::ProgrammingLanguage;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(ProgrammingLanguage, foreign_key = language_id))]
#[diesel(table_name = repositories)]
pub struct Repository {
    pub id: Uuid,
    pub language_id: Uuid,
    pub full_name: String,
    pub stars: i64,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub owner: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = repositories)]
pub struct NewRepository<'a> {
    pub id: Uuid,
    pub language_id: Uuid,
    pub full_name: &'a str,
    pub stars: i64,
    pub description: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub owner: &'a str,
}

/// Row of `GET /languages/{language_name}`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Serialize)]
pub struct LanguageRepository {
    pub full_name: String,
    pub stars: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
