use reqwest::Method;
use uuid::Uuid;

use super::KhojClient;
use crate::error::ApiResult;
use crate::models::{ConversationDto, CreateMessageRequest, MessageDto, Role, UpdateMessageRequest};

impl KhojClient {
    /// Append a message; the backend answers with the whole conversation.
    ///
    /// POST /api/v1/messages
    pub async fn create_message(
        &self,
        conversation_id: Uuid,
        role: Role,
        content: &str,
    ) -> ApiResult<ConversationDto> {
        let request = CreateMessageRequest::new(conversation_id, role, content);
        self.send_json(Method::POST, "/api/v1/messages", Some(&request))
            .await
    }

    /// PUT /api/v1/messages/{id}
    pub async fn update_message(&self, id: Uuid, content: &str) -> ApiResult<MessageDto> {
        let request = UpdateMessageRequest {
            content: content.to_string(),
        };
        self.send_json(Method::PUT, &format!("/api/v1/messages/{}", id), Some(&request))
            .await
    }

    /// DELETE /api/v1/messages/{id}
    pub async fn delete_message(&self, id: Uuid) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/api/v1/messages/{}", id))
            .await
    }
}
