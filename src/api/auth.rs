use reqwest::Method;

use super::KhojClient;
use crate::error::ApiResult;
use crate::models::{LoginRequest, LoginResponse};

impl KhojClient {
    /// Exchange credentials for a bearer token.
    ///
    /// POST /api/v1/auth/login
    ///
    /// The returned token is not installed on this client; callers decide
    /// whether to keep it.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/api/v1/auth/login", Some(&request))
            .await
    }
}
