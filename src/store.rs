//! Datastore connector: the shared MySQL pool behind the `user` table.

use crate::config::DatastoreConfig;
use crate::error::{AppError, ConfigError};
use crate::model::{NewUser, User};
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::{Connection, MySql, Transaction};

pub const SELECT_USERS_BY_NAME: &str = "SELECT id, name, age FROM user WHERE name = ?";

pub const INSERT_USER: &str = "INSERT INTO user (id, name, age) VALUES (?, ?, ?)";

/// Persistence operations the user handlers depend on. Implementations must be
/// safe for concurrent use; callers add no locking of their own.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users named `name`, in the order the datastore returns them.
    async fn find_by_name(&self, name: &str) -> Result<Vec<User>, AppError>;

    /// Insert one user inside a transaction. Rolls back on exec failure.
    async fn insert(&self, user: &NewUser) -> Result<(), AppError>;

    /// Reachability check.
    async fn ping(&self) -> Result<(), AppError>;

    /// Release the underlying connections.
    async fn close(&self) -> Result<(), AppError>;
}

#[derive(Clone, Debug)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Connect to MySQL and verify the connection with a ping. Either failure
    /// means the service must not start.
    pub async fn open(config: &DatastoreConfig) -> Result<Self, ConfigError> {
        tracing::info!(datastore = %config, "connecting");
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await
            .map_err(ConfigError::Connect)?;
        let store = MySqlStore { pool };
        store.ping_pool().await.map_err(ConfigError::Ping)?;
        Ok(store)
    }

    /// Wrap an existing pool. No ping is issued.
    pub fn from_pool(pool: MySqlPool) -> Self {
        MySqlStore { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub async fn begin(&self) -> Result<Transaction<'static, MySql>, sqlx::Error> {
        self.pool.begin().await
    }

    async fn ping_pool(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await
    }
}

#[async_trait]
impl UserStore for MySqlStore {
    async fn find_by_name(&self, name: &str) -> Result<Vec<User>, AppError> {
        tracing::debug!(sql = %SELECT_USERS_BY_NAME, name = %name, "query");
        // A row that fails to decode fails the whole fetch; partial results are dropped.
        let users = sqlx::query_as::<_, User>(SELECT_USERS_BY_NAME)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn insert(&self, user: &NewUser) -> Result<(), AppError> {
        tracing::debug!(sql = %INSERT_USER, id = %user.id, "exec");
        let mut tx = self.begin().await?;
        let exec = sqlx::query(INSERT_USER)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(user.age)
            .execute(&mut *tx)
            .await;
        if let Err(e) = exec {
            if let Err(rollback) = tx.rollback().await {
                tracing::error!(error = %rollback, id = %user.id, "rollback failed");
            }
            return Err(e.into());
        }
        // A failed commit leaves the row's durability unknown to the caller.
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.ping_pool().await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), AppError> {
        self.pool.close().await;
        tracing::info!("datastore pool closed");
        Ok(())
    }
}
