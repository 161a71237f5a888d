//! UserService: validation and persistence for the user resource.

mod user;
mod validation;
pub use user::UserService;
pub use validation::{UserValidator, AGE_RANGE, NAME_MAX_CHARS};
