use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;
use tracing::error;

use crate::{
    db::stats::models::TopRepository,
    endpoints::{error_response, state::AppState},
    storage::ReadStoreError,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    ReadTopRepositoryPerLanguage {
        #[from]
        source: ReadStoreError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::ReadTopRepositoryPerLanguage { source } => {
                error!("reading top repositories failed: {source}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, source.to_string())
            }
        }
    }
}

/// Axum handler: GET /stats/top-list
pub async fn handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopRepository>>, HandlerError> {
    let top = state
        .top_repository_per_language
        .top_repository_per_language()
        .await?;

    Ok(Json(top))
}
