//! User resource handlers: lookup by name, create, and the catch-all for other methods.

use crate::error::AppError;
use crate::model::CreateUser;
use crate::response::json_ok;
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::Method,
    response::Response,
};
/// GET /user?name=… → JSON array of matching users (possibly `[]`).
/// Only the first `name` parameter counts.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let name = params
        .iter()
        .find(|(k, _)| k == "name")
        .map(|(_, v)| v)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("name query parameter is required".into()))?;
    let users = UserService::find_by_name(state.store.as_ref(), name).await?;
    json_ok(&users)
}

/// POST /user with `{name, age}` → the new id as a JSON string.
///
/// Decoded by hand: a malformed body is `AppError::Decode` (500), not an axum rejection.
pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let candidate = CreateUser::from_json(&body).map_err(AppError::Decode)?;
    let id = UserService::create(state.store.as_ref(), candidate).await?;
    json_ok(&id)
}

pub async fn unsupported(method: Method) -> AppError {
    AppError::BadRequest(format!("method {} not supported", method))
}
