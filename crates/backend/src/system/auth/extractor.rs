use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;

use crate::shared::error::ApiError;

/// Claims of the authenticated caller, set by `require_auth`.
/// Usage in handlers: `async fn handler(user: CurrentUser) -> ...`
pub struct CurrentUser(pub TokenClaims);

impl CurrentUser {
    pub fn user_id(&self) -> Result<i64, ApiError> {
        self.0
            .sub
            .parse()
            .map_err(|_| ApiError::Unauthorized("El token no es válido o ha expirado.".to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(ApiError::unauthenticated)
    }
}
