use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_product::aggregate::Product;
use contracts::shared::pagination::Page;

use crate::domain::a002_product::service::{self, ProductFilter};
use crate::shared::error::ApiResult;
use crate::shared::listing::ListContext;
use crate::shared::patch::parse_body;

/// GET /api/productos/
pub async fn list(
    ctx: ListContext,
    Query(filter): Query<ProductFilter>,
) -> ApiResult<Json<Page<Product>>> {
    Ok(Json(service::list_page(&filter, &ctx).await?))
}

/// GET /api/productos/simple_list/
pub async fn simple_list() -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/productos/:id/
pub async fn get_by_id(Path(id): Path<i64>) -> ApiResult<Json<Product>> {
    Ok(Json(service::get_by_id(id).await?))
}

/// POST /api/productos/
pub async fn create(
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = service::create(parse_body(body)?).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/productos/:id/
pub async fn update(
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Product>> {
    Ok(Json(service::update(id, parse_body(body)?).await?))
}

/// PATCH /api/productos/:id/
pub async fn partial_update(
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Product>> {
    Ok(Json(service::partial_update(id, body).await?))
}

/// DELETE /api/productos/:id/
pub async fn delete(Path(id): Path<i64>) -> ApiResult<StatusCode> {
    service::delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
