use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::{
    endpoints::{error_response, state::AppState},
    storage::RemoveRepositoryError,
    types::RepositoryId,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing or invalid repository id provided")]
    InvalidRepositoryId {
        #[source]
        source: uuid::Error,
    },
    #[error(transparent)]
    RemoveRepository {
        #[from]
        source: RemoveRepositoryError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::InvalidRepositoryId { .. } => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            HandlerError::RemoveRepository { source } if source.is_not_found() => {
                error_response(StatusCode::NOT_FOUND, source.to_string())
            }
            HandlerError::RemoveRepository { source } => {
                error!("removing repository failed: {source}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, source.to_string())
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RemoveRepositoryResponse {
    pub repository_id: RepositoryId,
    pub message: String,
}

/// Axum handler: POST|DELETE /repositories/{repository_id}
pub async fn handler(
    State(state): State<AppState>,
    Path(repository_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let repository_id = Uuid::parse_str(&repository_id)
        .map(RepositoryId)
        .map_err(|source| HandlerError::InvalidRepositoryId { source })?;

    let removed = state.remover.remove(repository_id).await?;

    Ok((
        StatusCode::OK,
        Json(RemoveRepositoryResponse {
            repository_id: removed,
            message: format!("successfully deleted repository {removed}"),
        }),
    ))
}
