use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::{check_status, KhojClient};
use crate::error::ApiResult;
use crate::models::DocumentDto;

impl KhojClient {
    /// GET /api/v1/documents/user/{userId}
    pub async fn list_documents(&self, user_id: &str) -> ApiResult<Vec<DocumentDto>> {
        self.send_json::<(), _>(
            Method::GET,
            &format!("/api/v1/documents/user/{}", user_id),
            None,
        )
        .await
    }

    /// Upload raw bytes as a named document.
    ///
    /// POST /api/v1/documents/upload (multipart `file` + `userId`)
    pub async fn upload_document(
        &self,
        user_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<DocumentDto> {
        let size = bytes.len();
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("userId", user_id.to_string());

        tracing::info!("Uploading {} ({} bytes)", file_name, size);
        let response = self
            .request(Method::POST, "/api/v1/documents/upload")
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read a local file and upload it under its file name.
    pub async fn upload_document_file(&self, user_id: &str, path: &Path) -> ApiResult<DocumentDto> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        self.upload_document(user_id, &file_name, bytes).await
    }

    /// DELETE /api/v1/documents/{id}
    pub async fn delete_document(&self, id: i64) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/api/v1/documents/{}", id))
            .await
    }
}
