use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::{
    db::repository::models::LanguageRepository,
    endpoints::{error_response, state::AppState},
    storage::ReadStoreError,
    types::{SupportedLanguage, ValidateLanguageError},
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    InvalidLanguage {
        #[from]
        source: ValidateLanguageError,
    },
    #[error(transparent)]
    ReadRepositoriesForLanguage {
        #[from]
        source: ReadStoreError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::InvalidLanguage { source } => {
                error_response(StatusCode::BAD_REQUEST, source.to_string())
            }
            HandlerError::ReadRepositoriesForLanguage { source } => {
                error!("reading repositories for language failed: {source}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, source.to_string())
            }
        }
    }
}

/// Axum handler: GET /languages/{language_name}
pub async fn handler(
    State(state): State<AppState>,
    Path(language_name): Path<String>,
) -> Result<Json<Vec<LanguageRepository>>, HandlerError> {
    let language = SupportedLanguage::parse(&language_name)?;
    let repositories = state
        .repositories_for_language
        .repositories_for_language(language)
        .await?;

    Ok(Json(repositories))
}
