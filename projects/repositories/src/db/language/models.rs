use chrono::NaiveDateTime;
use uuid::Uuid;
use diesel::prelude::*;
use crate::db::schema::programming_languages;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = programming_languages)]
pub struct ProgrammingLanguage {
    pub id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = programming_languages)]
pub struct NewProgrammingLanguage<'a> {
    pub id: Uuid,
    pub name: &'a str,
}
