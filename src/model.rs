//! User records as they cross the HTTP and SQL boundaries.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

/// A persisted user, as returned by the read path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: i32,
}

/// Candidate record decoded from a POST body. Missing fields default so that
/// validation, not decoding, rejects them. Any `id` in the body is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub age: i64,
}

impl CreateUser {
    /// Decode the first JSON value in `body`; anything after it is ignored.
    ///
    /// Field names match case-insensitively and `null` leaves a field at its
    /// zero value. A top-level `null` yields an empty candidate.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next()
            .unwrap_or_else(|| Err(serde_json::Error::custom("empty request body")))?;

        let fields = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(fields) => fields,
            other => return Err(serde_json::Error::invalid_type(unexpected(&other), &"a JSON object")),
        };

        let mut candidate = Self::default();
        for (key, value) in fields {
            if key.eq_ignore_ascii_case("name") {
                match value {
                    Value::Null => {}
                    Value::String(s) => candidate.name = s,
                    other => return Err(serde_json::Error::invalid_type(unexpected(&other), &"a string")),
                }
            } else if key.eq_ignore_ascii_case("age") {
                match &value {
                    Value::Null => {}
                    Value::Number(n) => {
                        candidate.age = n
                            .as_i64()
                            .ok_or_else(|| serde_json::Error::invalid_value(unexpected(&value), &"an integer"))?;
                    }
                    other => return Err(serde_json::Error::invalid_type(unexpected(other), &"an integer")),
                }
            }
        }
        Ok(candidate)
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Unexpected::Signed(i),
            (None, Some(u)) => Unexpected::Unsigned(u),
            _ => Unexpected::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// A validated user with its assigned identifier, ready to insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub id: Ulid,
    pub name: String,
    pub age: i32,
}

impl From<NewUser> for User {
    fn from(u: NewUser) -> Self {
        User {
            id: u.id.to_string(),
            name: u.name,
            age: u.age,
        }
    }
}
