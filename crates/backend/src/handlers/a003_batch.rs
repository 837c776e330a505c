use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a003_batch::aggregate::Batch;
use contracts::shared::pagination::Page;

use crate::domain::a003_batch::service::{self, BatchFilter};
use crate::shared::error::ApiResult;
use crate::shared::listing::ListContext;
use crate::shared::patch::parse_body;

/// GET /api/lotes/
pub async fn list(
    ctx: ListContext,
    Query(filter): Query<BatchFilter>,
) -> ApiResult<Json<Page<Batch>>> {
    Ok(Json(service::list_page(&filter, &ctx).await?))
}

/// GET /api/lotes/simple_list/
pub async fn simple_list() -> ApiResult<Json<Vec<Batch>>> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/lotes/:id/
pub async fn get_by_id(Path(id): Path<i64>) -> ApiResult<Json<Batch>> {
    Ok(Json(service::get_by_id(id).await?))
}

/// POST /api/lotes/
pub async fn create(
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Batch>)> {
    let batch = service::create(parse_body(body)?).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

/// PUT /api/lotes/:id/
pub async fn update(
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Batch>> {
    Ok(Json(service::update(id, parse_body(body)?).await?))
}

/// PATCH /api/lotes/:id/
pub async fn partial_update(
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Batch>> {
    Ok(Json(service::partial_update(id, body).await?))
}

/// DELETE /api/lotes/:id/
pub async fn delete(Path(id): Path<i64>) -> ApiResult<StatusCode> {
    service::delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
