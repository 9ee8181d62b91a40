//! Untyped chat endpoints kept by the backend for older clients.
//!
//! They return raw entities, so replies stay as JSON values.

use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

use super::KhojClient;
use crate::error::ApiResult;
use crate::models::Role;

impl KhojClient {
    /// POST /api/chat/conversation
    pub async fn legacy_start_conversation(&self, user_id: Uuid, title: &str) -> ApiResult<Value> {
        let body = serde_json::json!({
            "userId": user_id.to_string(),
            "title": title,
        });
        self.send_json(Method::POST, "/api/chat/conversation", Some(&body))
            .await
    }

    /// POST /api/chat/message
    pub async fn legacy_send_message(
        &self,
        conversation_id: Uuid,
        role: Role,
        content: &str,
    ) -> ApiResult<Value> {
        let body = serde_json::json!({
            "convId": conversation_id.to_string(),
            "role": role,
            "content": content,
        });
        self.send_json(Method::POST, "/api/chat/message", Some(&body))
            .await
    }
}
