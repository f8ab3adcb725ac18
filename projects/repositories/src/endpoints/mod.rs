pub mod auth;
pub mod health;
pub mod languages;
pub mod repositories;
pub mod state;
pub mod stats;


use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::endpoints::state::AppState;

/// Builds the service router. Read and statistics routes sit behind basic auth.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/languages", get(languages::list::index::handler))
        .route("/languages/{language_name}", get(languages::read::index::handler))
        .route(
            "/stats/count-repositories",
            get(stats::count_repositories::index::handler),
        )
        .route("/stats/top-list", get(stats::top_list::index::handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/health", get(health::index::handler))
        .route("/languages/{language_name}", post(languages::write::index::handler))
        .route(
            "/repositories/{repository_id}",
            post(repositories::remove::index::handler)
                .delete(repositories::remove::index::handler),
        )
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON error body shared by all handlers: `{"error": "<message>"}`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}
