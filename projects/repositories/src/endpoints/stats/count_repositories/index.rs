use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;
use tracing::error;

use crate::{
    db::stats::models::LanguageStarSum,
    endpoints::{error_response, state::AppState},
    storage::ReadStoreError,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    ReadStarSumPerLanguage {
        #[from]
        source: ReadStoreError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::ReadStarSumPerLanguage { source } => {
                error!("reading star sums failed: {source}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, source.to_string())
            }
        }
    }
}

/// Axum handler: GET /stats/count-repositories
pub async fn handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LanguageStarSum>>, HandlerError> {
    let sums = state.star_sum_per_language.star_sum_per_language().await?;

    Ok(Json(sums))
}
