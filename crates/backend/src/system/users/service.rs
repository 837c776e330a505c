use contracts::shared::pagination::{Page, PAGE_SIZE};
use contracts::system::users::{CreateUserDto, UserProfile};

use super::repository;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::listing::{page_offset, ListContext};
use crate::system::auth::password;

/// Profile of an active user whose password matches
pub async fn verify_credentials(username: &str, password_text: &str) -> ApiResult<Option<UserProfile>> {
    let Some((user, hash)) = repository::get_credentials(username.trim()).await? else {
        return Ok(None);
    };
    if !user.is_active || !password::verify_password(password_text, &hash) {
        return Ok(None);
    }
    if let Err(e) = repository::touch_last_login(user.id).await {
        tracing::warn!("Could not update last login for {}: {}", user.username, e);
    }
    Ok(Some(user))
}

pub async fn create(dto: CreateUserDto) -> ApiResult<UserProfile> {
    dto.validate()?;
    if repository::exists_username(&dto.username).await? {
        return Err(ApiError::field(
            "username",
            "Ya existe un usuario con este nombre.",
        ));
    }
    let hash = password::hash_password(&dto.password)?;
    let id = repository::create_with_password(&dto, &hash).await?;
    tracing::info!("User {} created with id {}", dto.username.trim(), id);
    get_by_id(id).await
}

pub async fn get_by_id(id: i64) -> ApiResult<UserProfile> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)
}

pub async fn list_page(ctx: &ListContext) -> ApiResult<Page<UserProfile>> {
    let count = repository::count_users().await?;
    let page = ctx.page_number(count)?;
    let users = repository::list_page(page_offset(page), PAGE_SIZE).await?;
    Ok(ctx.page(users, count, page))
}
