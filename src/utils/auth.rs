// src/utils/auth.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::Config;

/// Header carrying the secret shared with the transport bridge.
pub const SECRET_HEADER: &str = "x-bot-secret";

/// Compares without short-circuiting on the first differing byte.
fn secrets_match(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Axum Middleware: Bridge Authentication.
///
/// Only the transport bridge may deliver updates. Requests without the
/// `X-Bot-Secret` header, or with a wrong value, get 401 Unauthorized.
pub async fn bridge_auth_middleware(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let given = req
        .headers()
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    match given {
        Some(secret) if secrets_match(secret.as_bytes(), config.webhook_secret.as_bytes()) => {
            Ok(next.run(req).await)
        }
        _ => {
            tracing::warn!("Rejected update with missing or invalid bridge secret");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
