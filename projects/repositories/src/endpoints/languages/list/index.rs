use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;
use tracing::error;

use crate::{
    db::stats::models::LanguageWithRepositories,
    endpoints::{error_response, state::AppState},
    storage::ReadStoreError,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    ReadLanguagesWithRepositories {
        #[from]
        source: ReadStoreError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::ReadLanguagesWithRepositories { source } => {
                error!("reading languages with repositories failed: {source}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, source.to_string())
            }
        }
    }
}

/// Axum handler: GET /languages
pub async fn handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LanguageWithRepositories>>, HandlerError> {
    let languages = state
        .languages_with_repositories
        .languages_with_repositories()
        .await?;

    Ok(Json(languages))
}
