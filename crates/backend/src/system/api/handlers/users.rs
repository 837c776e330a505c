use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::shared::pagination::Page;
use contracts::system::users::{CreateUserDto, UserProfile};

use crate::shared::error::ApiResult;
use crate::shared::listing::ListContext;
use crate::system::users::service;

/// `GET /api/usuarios/`
pub async fn list(ctx: ListContext) -> ApiResult<Json<Page<UserProfile>>> {
    Ok(Json(service::list_page(&ctx).await?))
}

/// `GET /api/usuarios/:id/`
pub async fn get_by_id(Path(id): Path<i64>) -> ApiResult<Json<UserProfile>> {
    Ok(Json(service::get_by_id(id).await?))
}

/// `POST /api/usuarios/`
pub async fn create(Json(dto): Json<CreateUserDto>) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let user = service::create(dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
