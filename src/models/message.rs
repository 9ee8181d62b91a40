use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::deserialize_nullable_string;

/// Author of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Ai,
}

impl Role {
    /// Label used when printing a transcript.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Ai => "Khoj",
        }
    }
}

/// A single message of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: Uuid,
    pub role: Role,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    #[serde(default)]
    pub sent_at: Option<NaiveDateTime>,
}

/// Body of `POST /api/v1/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub conv_id: Uuid,
    pub role: Role,
    pub content: String,
}

impl CreateMessageRequest {
    pub fn new(conv_id: Uuid, role: Role, content: impl Into<String>) -> Self {
        Self {
            conv_id,
            role,
            content: content.into(),
        }
    }
}

/// Body of `PUT /api/v1/messages/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateMessageRequest {
    pub content: String,
}
