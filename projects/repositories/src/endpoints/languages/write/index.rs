use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::{
    endpoints::{error_response, state::AppState},
    types::{LanguageId, SupportedLanguage, ValidateLanguageError},
    writemodel::HandleRepositoriesError,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    InvalidLanguage {
        #[from]
        source: ValidateLanguageError,
    },
    #[error(transparent)]
    HandleRepositories {
        #[from]
        source: HandleRepositoriesError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::InvalidLanguage { source } => {
                error_response(StatusCode::BAD_REQUEST, source.to_string())
            }
            HandlerError::HandleRepositories { source } => {
                let status = match &source {
                    HandleRepositoriesError::Fetch { .. } => StatusCode::BAD_GATEWAY,
                    HandleRepositoriesError::Persist { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                error!("writing language repositories failed: {source}");
                error_response(status, source.to_string())
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WriteLanguageResponse {
    pub language_id: LanguageId,
    pub message: String,
}

/// Axum handler: POST /languages/{language_name}
pub async fn handler(
    State(state): State<AppState>,
    Path(language_name): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let language = SupportedLanguage::parse(&language_name)?;
    let language_id = state.command_handler.handle_repositories(language).await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteLanguageResponse {
            language_id,
            message: format!("Language {language} was successfully created with id {language_id}"),
        }),
    ))
}
