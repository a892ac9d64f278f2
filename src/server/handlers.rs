//! Request handlers and the JSON error mapping.

use crate::error::HandlerError;
use crate::metrics::MetricsSummary;
use crate::models::{LookupQuery, LookupResponse};
use crate::server::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Message returned when the user directory cannot be read.
pub const DIRECTORY_UNAVAILABLE: &str = "User directory unavailable";

/// Message returned when the query string cannot be decoded.
pub const INVALID_QUERY: &str = "Invalid query string";

/// Body of every error response: `{ "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HandlerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            // Detail was already logged by the service.
            HandlerError::Directory(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                DIRECTORY_UNAVAILABLE.to_string(),
            ),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// `GET .../users/by-phone?number=&region=`
pub async fn by_phone(
    State(state): State<AppState>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<LookupResponse>, HandlerError> {
    let Query(query) = query.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejecting malformed query string");
        HandlerError::BadRequest(INVALID_QUERY.to_string())
    })?;

    let response = state.lookup.lookup(query).await?;
    Ok(Json(response))
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSummary> {
    Json(state.metrics.summary())
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
