//! In-memory `UserStore` used by handler, service, and lifecycle tests.

use crate::error::AppError;
use crate::model::{NewUser, User};
use crate::store::UserStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<User>>,
    pub queries: AtomicUsize,
    pub inserts: AtomicUsize,
    pub closes: AtomicUsize,
    pub fail_query: AtomicBool,
    pub fail_insert: AtomicBool,
    pub fail_ping: AtomicBool,
    pub fail_close: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<User>) -> Self {
        MemoryStore {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<User> {
        self.rows.lock().unwrap().clone()
    }
}

fn injected(what: &str) -> AppError {
    AppError::Db(sqlx::Error::Protocol(format!("injected {what} failure")))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Vec<User>, AppError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(injected("query"));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.name == name)
            .cloned()
            .collect())
    }

    async fn insert(&self, user: &NewUser) -> Result<(), AppError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(injected("insert"));
        }
        let mut rows = self.rows.lock().unwrap();
        let id = user.id.to_string();
        if rows.iter().any(|u| u.id == id) {
            return Err(AppError::Db(sqlx::Error::Protocol(format!("duplicate id {id}"))));
        }
        rows.push(user.clone().into());
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(injected("ping"));
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), AppError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(injected("close"));
        }
        Ok(())
    }
}
