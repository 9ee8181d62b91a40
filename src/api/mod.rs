//! HTTP client for the Khoj backend.
//!
//! [`KhojClient`] wraps one pooled `reqwest::Client` and is cheap to clone.
//! Each backend resource lives in its own submodule as an `impl KhojClient`
//! block; the streaming search endpoint is in [`ai`].

mod ai;
mod auth;
mod conversations;
mod documents;
mod legacy;
mod messages;
mod users;

pub use ai::STREAM_SEARCH_PATH;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Client for the Khoj REST and streaming API.
#[derive(Debug, Clone)]
pub struct KhojClient {
    config: ClientConfig,
    client: Client,
    auth_token: Option<String>,
}

impl KhojClient {
    /// Create a client for the configured backend.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            auth_token: None,
        }
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: impl AsRef<str>) -> Self {
        Self::new(ClientConfig::new(base_url))
    }

    /// Set the authentication token for Bearer auth.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Set the authentication token on an existing client.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    /// Get the current authentication token, if set.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Start a request against an API path, with the auth header when logged in.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        tracing::debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.auth_token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request with an optional JSON body and decode a JSON reply.
    async fn send_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = check_status(builder.send().await?).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send a request whose successful reply carries no body.
    async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        let response = self.request(method, path).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`ApiError::ServerError`] carrying the body.
pub(crate) async fn check_status(response: Response) -> ApiResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .filter(|body| !body.trim().is_empty())
        .map(|body| error_message(&body))
        .unwrap_or_else(|| "Unknown error".to_string());
    tracing::warn!("Backend returned {}: {}", status, message);
    Err(ApiError::ServerError { status, message })
}

/// Pull `message` out of a JSON error body; other bodies are kept verbatim.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
