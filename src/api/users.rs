use reqwest::Method;
use uuid::Uuid;

use super::KhojClient;
use crate::error::ApiResult;
use crate::models::{CreateUserRequest, UpdateUserRequest, UserDto};

impl KhojClient {
    /// Register a new account.
    ///
    /// POST /api/v1/users
    pub async fn create_user(&self, request: &CreateUserRequest) -> ApiResult<UserDto> {
        self.send_json(Method::POST, "/api/v1/users", Some(request)).await
    }

    /// GET /api/v1/users/{id}
    pub async fn get_user(&self, id: Uuid) -> ApiResult<UserDto> {
        self.send_json::<(), _>(Method::GET, &format!("/api/v1/users/{}", id), None)
            .await
    }

    /// PUT /api/v1/users/{id}
    pub async fn update_user(&self, id: Uuid, request: &UpdateUserRequest) -> ApiResult<UserDto> {
        self.send_json(Method::PUT, &format!("/api/v1/users/{}", id), Some(request))
            .await
    }

    /// DELETE /api/v1/users/{id}
    pub async fn delete_user(&self, id: Uuid) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/api/v1/users/{}", id))
            .await
    }
}
