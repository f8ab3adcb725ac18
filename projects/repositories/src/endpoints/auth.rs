use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::warn;

use crate::config::Config;
use crate::endpoints::state::AppState;

/// Fixed username/password pair guarding the read endpoints.
#[derive(Clone)]
pub struct Credentials {
    user: String,
    pass: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.auth_user.clone(), config.auth_pass.clone())
    }

    fn matches(&self, user: &str, pass: &str) -> bool {
        self.user == user && self.pass == pass
    }
}

/// Axum middleware: rejects requests without matching basic credentials.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(decode_basic)
        .is_some_and(|(user, pass)| state.credentials.matches(&user, &pass));

    if authorized {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "rejected request with missing or invalid credentials");
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"repositories\"")],
        "Unauthorized",
    )
        .into_response()
}

fn decode_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}
