//! Service configuration types.

use sqlx::mysql::MySqlConnectOptions;
use std::fmt;
use std::time::Duration;

/// MySQL listens on the default port; only the host is configurable.
pub const MYSQL_PORT: u16 = 3306;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub const DEFAULT_SHUTDOWN_DRAIN: Duration = Duration::from_secs(5);

/// Datastore connection settings.
#[derive(Clone)]
pub struct DatastoreConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub database: String,
    pub max_connections: u32,
}

impl DatastoreConfig {
    /// Connect options for `user:password@tcp(host:3306)/database`.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(MYSQL_PORT)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

// Never print the password.
impl fmt::Debug for DatastoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatastoreConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl fmt::Display for DatastoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mysql://{}:***@{}:{}/{}",
            self.user, self.host, MYSQL_PORT, self.database
        )
    }
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub datastore: DatastoreConfig,
    /// Port the HTTP listener binds on `0.0.0.0`.
    pub port: u16,
    /// How long in-flight requests may run after a shutdown signal before the pool is closed.
    pub shutdown_drain: Duration,
}
