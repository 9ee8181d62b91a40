//! Transport DTOs mirroring the backend's REST records.
//!
//! Field names follow the backend's camelCase JSON. Timestamps are
//! offset-less `LocalDateTime` values and map to [`chrono::NaiveDateTime`].

mod ai;
mod auth;
mod conversation;
mod document;
mod message;
mod user;

pub use ai::{AiResponse, PromptRequest};
pub use auth::{LoginRequest, LoginResponse};
pub use conversation::{title_from_prompt, ConversationDto, CreateConversationRequest, DEFAULT_TITLE};
pub use document::DocumentDto;
pub use message::{CreateMessageRequest, MessageDto, Role, UpdateMessageRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, UserDto, GUEST_PASSWORD};

use serde::{Deserialize, Deserializer};

/// Helper to deserialize a nullable string as an empty string.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}
