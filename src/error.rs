//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Startup failures. Any of these keeps the service from serving traffic.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("datastore connect: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("datastore ping: {0}")]
    Ping(#[source] sqlx::Error),
}

/// Identifier generation failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdError {
    #[error("system clock is before the unix epoch")]
    ClockBeforeEpoch,
    #[error("timestamp {0}ms does not fit in 48 bits")]
    TimestampOverflow(u128),
}

/// Failures while serving or shutting down. Both end the process with a nonzero status.
#[derive(Error, Debug)]
pub enum ShutdownError {
    #[error("server: {0}")]
    Serve(#[source] std::io::Error),
    #[error("closing datastore: {0}")]
    Close(#[source] AppError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("identifier: {0}")]
    Id(#[from] IdError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("serialize: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => {
                tracing::warn!(reason = %msg, "rejected request");
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            _ => {
                // Cause stays in the log; the client only sees a generic message.
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };
        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}
