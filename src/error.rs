use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::fmt::Display;
use thiserror::Error;

/// Everything that can terminate a request. No variant is retried; each maps
/// to exactly one HTTP status and a `{"detail": ...}` body.
#[derive(Debug, Error)]
pub enum Error {
    #[error("MapQuest API key not configured on backend (MAPQUEST_API_KEY).")]
    MissingApiKey,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Error contacting MapQuest: {0}")]
    UpstreamUnreachable(String),

    /// MapQuest answered with a non-2xx status. `detail` carries the
    /// provider's JSON error body when it was parseable.
    #[error("MapQuest returned an error (status {status})")]
    Upstream { status: u16, detail: Option<Value> },

    #[error("No route data returned by MapQuest")]
    NoRouteFound,

    #[error("Internal server error")]
    Internal(String),
}

impl Error {
    pub fn internal<E: Display>(err: E) -> Self {
        Error::Internal(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Error::MissingApiKey => (StatusCode::INTERNAL_SERVER_ERROR, json!(self.to_string())),
            Error::InvalidArgument(_) => (StatusCode::BAD_REQUEST, json!(self.to_string())),
            Error::UpstreamUnreachable(_) => (StatusCode::BAD_GATEWAY, json!(self.to_string())),
            Error::NoRouteFound => (StatusCode::NOT_FOUND, json!(self.to_string())),
            Error::Upstream { status, ref detail } => {
                let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                match detail {
                    Some(body) => (code, body.clone()),
                    None => (code, json!(self.to_string())),
                }
            }
            Error::Internal(ref detail) => {
                tracing::error!(%detail, "unhandled internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!(self.to_string()))
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
