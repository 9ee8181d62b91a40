//! Account flows: sign up, guest access, login.
//!
//! Each flow talks to the backend, then persists the resulting [`Session`]
//! so later commands run as that user.

use uuid::Uuid;

use super::session::{Session, SessionStore};
use crate::api::KhojClient;
use crate::error::{ApiError, ApiResult};
use crate::models::CreateUserRequest;

/// Log in and store the session.
pub async fn login(
    client: &KhojClient,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> ApiResult<Session> {
    let response = client.login(username, password).await?;
    let user_id = Uuid::parse_str(&response.user_id).map_err(|e| ApiError::InvalidResponse {
        message: format!("user id '{}' is not a UUID: {}", response.user_id, e),
    })?;

    let session = Session::new(user_id, response.username, Some(response.token));
    store.save(&session)?;
    tracing::info!("Logged in as {}", session.username);
    Ok(session)
}

/// Create an account, then log into it.
pub async fn signup(
    client: &KhojClient,
    store: &SessionStore,
    request: &CreateUserRequest,
) -> ApiResult<Session> {
    let user = client.create_user(request).await?;
    tracing::info!("Created account {} ({})", user.username, user.id);
    login(client, store, &request.username, &request.password).await
}

/// Create a throwaway guest account and log into it.
pub async fn guest(client: &KhojClient, store: &SessionStore) -> ApiResult<Session> {
    let request = CreateUserRequest::guest(chrono::Utc::now().timestamp_millis());
    signup(client, store, &request).await
}

/// Forget the stored session.
pub fn logout(store: &SessionStore) -> ApiResult<Option<Session>> {
    let previous = store.load();
    store.clear()?;
    Ok(previous)
}

/// Load the stored session, failing if nobody is logged in.
pub fn require_session(store: &SessionStore) -> ApiResult<Session> {
    store.load().ok_or(ApiError::NotAuthenticated)
}

/// A client carrying the session's bearer token, if any.
pub fn authorized_client(client: &KhojClient, session: &Session) -> KhojClient {
    let mut client = client.clone();
    client.set_auth_token(session.token.clone());
    client
}
