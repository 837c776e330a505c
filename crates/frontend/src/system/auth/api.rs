//! Auth endpoints
//!
//! Login, refresh and logout talk to the transport directly: a 401 from them
//! is an answer, not a reason to refresh.

use contracts::system::auth::{LoginRequest, LoginResponse};
use contracts::system::users::UserProfile;

use super::session;
use crate::shared::api_error::ApiError;
use crate::shared::api_utils::api_url;
use crate::shared::http::{decode, send_raw, Method};

pub async fn login(username: String, password: String) -> Result<LoginResponse, ApiError> {
    let body = serde_json::to_value(LoginRequest { username, password })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    let text = send_raw(Method::Post, api_url("/token/"), Some(body)).await?;
    decode(&text)
}

/// Ask the server to rotate the session cookies
pub async fn refresh() -> Result<(), ApiError> {
    send_raw(Method::Post, api_url("/token/refresh/"), None).await?;
    Ok(())
}

pub async fn logout() -> Result<(), ApiError> {
    send_raw(Method::Post, api_url("/logout/"), None).await?;
    Ok(())
}

/// Current user; goes through the session gateway so an expired access
/// cookie is refreshed transparently
pub async fn me() -> Result<UserProfile, ApiError> {
    session::get("/me/").await
}
