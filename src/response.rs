//! JSON response helpers.

use crate::error::AppError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `200` with `value` as the JSON body. Serialization failures surface as
/// `AppError::Serialize` instead of a partially written body.
pub fn json_ok<T: Serialize>(value: &T) -> Result<Response, AppError> {
    let bytes = serde_json::to_vec(value).map_err(AppError::Serialize)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response())
}
