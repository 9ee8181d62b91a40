use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A backend user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Body of `POST /api/v1/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Throwaway guest account, unique per millisecond timestamp.
    pub fn guest(timestamp_millis: i64) -> Self {
        Self {
            username: format!("guest_{}", timestamp_millis),
            email: format!("guest_{}@khojai.local", timestamp_millis),
            password: GUEST_PASSWORD.to_string(),
        }
    }
}

/// Password shared by all guest accounts.
pub const GUEST_PASSWORD: &str = "guest_password";

/// Body of `PUT /api/v1/users/{id}`. A missing password keeps the old one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
