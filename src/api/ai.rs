use reqwest::Method;

use super::{check_status, KhojClient};
use crate::error::ApiResult;
use crate::models::{AiResponse, PromptRequest};
use crate::sse::{event_stream, EventStream};

/// Path of the streaming search pipeline.
pub const STREAM_SEARCH_PATH: &str = "/api/v1/ai/stream-search";

impl KhojClient {
    /// POST /api/v1/ai/analyze
    pub async fn analyze(&self, prompt: &str) -> ApiResult<AiResponse> {
        self.send_json(Method::POST, "/api/v1/ai/analyze", Some(&PromptRequest::new(prompt)))
            .await
    }

    /// One-shot answer without the search pipeline.
    ///
    /// POST /api/v1/ai/generate-response
    pub async fn generate_response(&self, prompt: &str) -> ApiResult<AiResponse> {
        self.send_json(
            Method::POST,
            "/api/v1/ai/generate-response",
            Some(&PromptRequest::new(prompt)),
        )
        .await
    }

    /// Run the search pipeline for a prompt and stream its progress.
    ///
    /// Fails only if the stream cannot be opened; failures after that arrive
    /// as the stream's terminal [`StreamItem::Error`](crate::sse::StreamItem).
    /// No timeout is applied to the body.
    pub async fn stream_search(&self, prompt: &str) -> ApiResult<EventStream> {
        let response = self
            .request(Method::POST, STREAM_SEARCH_PATH)
            .header("Accept", "text/event-stream")
            .json(&PromptRequest::new(prompt))
            .send()
            .await?;
        let response = check_status(response).await?;
        tracing::info!("Search stream opened ({})", response.status());

        Ok(event_stream(response.bytes_stream()))
    }
}
