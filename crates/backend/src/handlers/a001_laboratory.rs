use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_laboratory::aggregate::Laboratory;
use contracts::shared::pagination::Page;

use crate::domain::a001_laboratory::service::{self, LaboratoryFilter};
use crate::shared::error::ApiResult;
use crate::shared::listing::ListContext;
use crate::shared::patch::parse_body;

/// GET /api/laboratorios/
pub async fn list(
    ctx: ListContext,
    Query(filter): Query<LaboratoryFilter>,
) -> ApiResult<Json<Page<Laboratory>>> {
    Ok(Json(service::list_page(&filter, &ctx).await?))
}

/// GET /api/laboratorios/simple_list/
pub async fn simple_list() -> ApiResult<Json<Vec<Laboratory>>> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/laboratorios/:id/
pub async fn get_by_id(Path(id): Path<i64>) -> ApiResult<Json<Laboratory>> {
    Ok(Json(service::get_by_id(id).await?))
}

/// POST /api/laboratorios/
pub async fn create(
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Laboratory>)> {
    let lab = service::create(parse_body(body)?).await?;
    Ok((StatusCode::CREATED, Json(lab)))
}

/// PUT /api/laboratorios/:id/
pub async fn update(
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Laboratory>> {
    Ok(Json(service::update(id, parse_body(body)?).await?))
}

/// PATCH /api/laboratorios/:id/
pub async fn partial_update(
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Laboratory>> {
    Ok(Json(service::partial_update(id, body).await?))
}

/// DELETE /api/laboratorios/:id/
pub async fn delete(Path(id): Path<i64>) -> ApiResult<StatusCode> {
    service::delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
