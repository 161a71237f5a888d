//! User service: a single `/user` resource over a MySQL `user` table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod id;
pub mod lifecycle;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{DatastoreConfig, ServiceConfig};
pub use error::{AppError, ConfigError, IdError, ShutdownError};
pub use lifecycle::{Lifecycle, Phase};
pub use model::{CreateUser, NewUser, User};
pub use routes::{app, common_routes_with_ready, user_routes};
pub use service::UserService;
pub use state::AppState;
pub use store::{MySqlStore, UserStore};
