use axum::{body::Body, extract::Request, http::header, middleware::Next, response::Response};
use contracts::system::auth::{TokenType, ACCESS_COOKIE};

use super::cookies::read_cookie;
use crate::shared::error::ApiError;

/// Access token from the cookie, or from `Authorization: Bearer` for API clients
fn access_token(req: &Request<Body>) -> Option<String> {
    read_cookie(req.headers(), ACCESS_COOKIE).or_else(|| {
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}

/// Middleware that requires a valid access token
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = access_token(&req).ok_or_else(ApiError::unauthenticated)?;

    let claims = super::jwt::validate_token(&token, TokenType::Access)
        .await
        .map_err(|e| {
            tracing::debug!("Rejected access token: {:#}", e);
            ApiError::Unauthorized("El token no es válido o ha expirado.".to_string())
        })?;

    // handlers read it back through CurrentUser
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
