use axum::{
    extract::Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use contracts::system::auth::{
    LoginRequest, LoginResponse, MessageResponse, TokenType, ACCESS_COOKIE, REFRESH_COOKIE,
};
use contracts::system::users::UserProfile;

use crate::shared::config;
use crate::shared::error::{ApiError, ApiResult};
use crate::system::auth::cookies::{append_cookies, build_cookie, clear_cookie, read_cookie};
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, refresh_tokens};
use crate::system::users::service as user_service;

fn invalid_refresh() -> ApiError {
    ApiError::Unauthorized("El token no es válido o ha expirado.".to_string())
}

/// Access cookie plus a freshly stored refresh cookie
async fn session_cookies(user: &UserProfile) -> ApiResult<Vec<String>> {
    let auth = &config::global().auth;
    let (access, _) = jwt::issue_token(user.id, &user.username, TokenType::Access).await?;
    let (refresh, claims) = jwt::issue_token(user.id, &user.username, TokenType::Refresh).await?;
    refresh_tokens::store(user.id, &claims.jti, &refresh, claims.exp).await?;

    Ok(vec![
        build_cookie(
            ACCESS_COOKIE,
            &access,
            auth.access_token_minutes * 60,
            auth.cookie_secure,
        ),
        build_cookie(
            REFRESH_COOKIE,
            &refresh,
            auth.refresh_token_days * 24 * 60 * 60,
            auth.cookie_secure,
        ),
    ])
}

fn with_cookies<T: IntoResponse>(cookies: &[String], body: T) -> Response {
    let mut response = body.into_response();
    append_cookies(response.headers_mut(), cookies);
    response
}

/// `POST /api/token/`
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<Response> {
    let user = user_service::verify_credentials(&request.username, &request.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Failed login attempt for '{}'", request.username);
            ApiError::Unauthorized(
                "No se encontró una cuenta activa con las credenciales proporcionadas."
                    .to_string(),
            )
        })?;

    let cookies = session_cookies(&user).await?;
    tracing::info!("User '{}' logged in", user.username);

    Ok(with_cookies(
        &cookies,
        Json(LoginResponse {
            message: "Login exitoso. Cookies establecidas".to_string(),
            username: user.username,
        }),
    ))
}

/// `POST /api/token/refresh/`.
/// The refresh token rotates: the presented one is revoked and a new pair is set.
pub async fn refresh(headers: HeaderMap) -> ApiResult<Response> {
    let token = read_cookie(&headers, REFRESH_COOKIE).ok_or_else(|| {
        ApiError::BadRequest("No se encontró la cookie 'refresh_token'.".to_string())
    })?;

    let claims = jwt::validate_token(&token, TokenType::Refresh)
        .await
        .map_err(|_| invalid_refresh())?;
    let user_id = refresh_tokens::find_active(&token)
        .await?
        .ok_or_else(invalid_refresh)?;
    if claims.sub != user_id.to_string() {
        return Err(invalid_refresh());
    }

    let user = user_service::get_by_id(user_id)
        .await
        .map_err(|_| invalid_refresh())?;
    if !user.is_active {
        return Err(invalid_refresh());
    }

    refresh_tokens::revoke(&token).await?;
    let cookies = session_cookies(&user).await?;
    tracing::debug!("Session refreshed for '{}'", user.username);

    Ok(with_cookies(
        &cookies,
        Json(MessageResponse {
            message: "Sesión renovada".to_string(),
        }),
    ))
}

/// `POST /api/logout/`; works without a session so a stale client can always clear cookies
pub async fn logout(headers: HeaderMap) -> ApiResult<Response> {
    if let Some(token) = read_cookie(&headers, REFRESH_COOKIE) {
        refresh_tokens::revoke(&token).await?;
    }
    let secure = config::global().auth.cookie_secure;
    let cookies = [
        clear_cookie(ACCESS_COOKIE, secure),
        clear_cookie(REFRESH_COOKIE, secure),
    ];
    Ok(with_cookies(
        &cookies,
        (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Logout exitoso".to_string(),
            }),
        ),
    ))
}

/// `GET|POST /api/me/`
pub async fn me(user: CurrentUser) -> ApiResult<Json<UserProfile>> {
    let profile = user_service::get_by_id(user.user_id()?)
        .await
        .map_err(|_| ApiError::unauthenticated())?;
    Ok(Json(profile))
}
