//! Request validation for user writes.

use crate::error::AppError;
use crate::model::CreateUser;
use std::ops::RangeInclusive;

pub const NAME_MAX_CHARS: usize = 50;

pub const AGE_RANGE: RangeInclusive<i64> = 20..=80;

pub struct UserValidator;

impl UserValidator {
    /// Check name and age bounds. Returns the validated name and age.
    pub fn validate(candidate: CreateUser) -> Result<(String, i32), AppError> {
        let CreateUser { name, age } = candidate;

        let name_len = name.chars().count();
        if name_len == 0 || name_len > NAME_MAX_CHARS {
            return Err(AppError::BadRequest(format!(
                "name must be 1 to {} characters, got {}",
                NAME_MAX_CHARS, name_len
            )));
        }

        if !AGE_RANGE.contains(&age) {
            return Err(AppError::BadRequest(format!(
                "age must be between {} and {}, got {}",
                AGE_RANGE.start(),
                AGE_RANGE.end(),
                age
            )));
        }
        let age = i32::try_from(age)
            .map_err(|_| AppError::BadRequest(format!("age out of range: {}", age)))?;

        Ok((name, age))
    }
}
