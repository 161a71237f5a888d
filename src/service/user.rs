//! Read and write protocols for the user resource.

use crate::error::AppError;
use crate::id;
use crate::model::{CreateUser, NewUser, User};
use crate::service::UserValidator;
use crate::store::UserStore;
use ulid::Ulid;

pub struct UserService;

impl UserService {
    /// Users matching `name` exactly. An empty result is not an error.
    pub async fn find_by_name(store: &dyn UserStore, name: &str) -> Result<Vec<User>, AppError> {
        store.find_by_name(name).await
    }

    /// Validate, assign an id, then insert. Nothing reaches the store unless
    /// validation and id generation both succeed.
    pub async fn create(store: &dyn UserStore, candidate: CreateUser) -> Result<Ulid, AppError> {
        let (name, age) = UserValidator::validate(candidate)?;
        let id = id::generate()?;
        store.insert(&NewUser { id, name, age }).await?;
        tracing::info!(%id, "user created");
        Ok(id)
    }
}
