//! User resource route. Methods other than GET and POST answer 400, HEAD included.

use crate::handlers::user::{create, list, unsupported};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/user", get(list).post(create).head(unsupported).fallback(unsupported))
        .with_state(state)
}
