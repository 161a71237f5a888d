//! Router assembly.

mod common;
mod user;

pub use common::common_routes_with_ready;
pub use user::user_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Upper bound on request bodies; a user record is a few dozen bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application router: user resource plus health, readiness, and version.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(user_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
}
