use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{deserialize_nullable_string, MessageDto};

/// Title used when a prompt yields no words.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Number of prompt words kept in a derived title.
const TITLE_WORDS: usize = 5;

/// A conversation and its messages in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: Uuid,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub messages: Vec<MessageDto>,
}

impl ConversationDto {
    /// Content of the most recent AI message, if any.
    pub fn last_answer(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == super::Role::Ai)
            .map(|m| m.content.as_str())
    }
}

/// Body of `POST /api/v1/conversations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    pub user_id: Uuid,
    pub title: String,
}

/// Derive a conversation title from the first words of a prompt.
pub fn title_from_prompt(prompt: &str) -> String {
    let words: Vec<&str> = prompt.split_whitespace().take(TITLE_WORDS).collect();
    if words.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_title_from_long_prompt() {
        assert_eq!(
            title_from_prompt("What is the capital city of France today?"),
            "What is the capital city"
        );
    }

    #[test]
    fn test_title_from_short_prompt() {
        assert_eq!(title_from_prompt("  hello   world "), "hello world");
    }

    #[test]
    fn test_title_from_blank_prompt() {
        assert_eq!(title_from_prompt("   "), DEFAULT_TITLE);
    }

    #[test]
    fn test_conversation_deserialize() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-0000000000aa",
            "title": "Rust",
            "createdAt": "2024-05-01T10:15:30",
            "messages": [
                {"id":"00000000-0000-0000-0000-000000000001","role":"USER","content":"q","sentAt":"2024-05-01T10:15:31"},
                {"id":"00000000-0000-0000-0000-000000000002","role":"AI","content":"a","sentAt":"2024-05-01T10:15:32"}
            ]
        }"#;
        let conv: ConversationDto = serde_json::from_str(json).unwrap();
        assert_eq!(conv.title, "Rust");
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[0].role, Role::User);
        assert_eq!(conv.last_answer(), Some("a"));
    }

    #[test]
    fn test_conversation_without_messages() {
        let json = r#"{"id":"00000000-0000-0000-0000-0000000000aa","title":null}"#;
        let conv: ConversationDto = serde_json::from_str(json).unwrap();
        assert!(conv.messages.is_empty());
        assert_eq!(conv.last_answer(), None);
    }
}
