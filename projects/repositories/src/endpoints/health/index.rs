use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

/// Axum handler: GET /health
pub async fn handler() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus { status: "OK" }))
}
