use reqwest::Method;
use uuid::Uuid;

use super::KhojClient;
use crate::error::ApiResult;
use crate::models::{ConversationDto, CreateConversationRequest};

impl KhojClient {
    /// POST /api/v1/conversations
    pub async fn create_conversation(&self, user_id: Uuid, title: &str) -> ApiResult<ConversationDto> {
        let request = CreateConversationRequest {
            user_id,
            title: title.to_string(),
        };
        self.send_json(Method::POST, "/api/v1/conversations", Some(&request))
            .await
    }

    /// Fetch a conversation with all of its messages.
    ///
    /// GET /api/v1/conversations/{id}
    pub async fn get_conversation(&self, id: Uuid) -> ApiResult<ConversationDto> {
        self.send_json::<(), _>(Method::GET, &format!("/api/v1/conversations/{}", id), None)
            .await
    }

    /// PUT /api/v1/conversations/{id}/title
    pub async fn rename_conversation(&self, id: Uuid, title: &str) -> ApiResult<ConversationDto> {
        let body = serde_json::json!({ "title": title });
        self.send_json(
            Method::PUT,
            &format!("/api/v1/conversations/{}/title", id),
            Some(&body),
        )
        .await
    }

    /// DELETE /api/v1/conversations/{id}
    pub async fn delete_conversation(&self, id: Uuid) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/api/v1/conversations/{}", id))
            .await
    }
}
