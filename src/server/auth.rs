//! Admin guard for the lookup routes.

use crate::server::handlers::ErrorBody;
use crate::server::AppState;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";
pub const ADMIN_REQUIRED: &str = "Admin privileges required";

/// Reject requests that do not carry the admin bearer token.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return reject(StatusCode::UNAUTHORIZED, AUTHENTICATION_REQUIRED);
    };

    if !constant_time_eq(token.as_bytes(), state.admin_token()) {
        warn!(path = %request.uri().path(), "Rejected non-admin request");
        return reject(StatusCode::FORBIDDEN, ADMIN_REQUIRED);
    }

    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn reject(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
        .into_response()
}
