use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a004_sale::aggregate::Sale;
use contracts::shared::pagination::Page;

use crate::domain::a004_sale::service::{self, SaleFilter};
use crate::shared::error::ApiResult;
use crate::shared::listing::ListContext;
use crate::shared::patch::parse_body;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/ventas/
pub async fn list(ctx: ListContext, Query(filter): Query<SaleFilter>) -> ApiResult<Json<Page<Sale>>> {
    Ok(Json(service::list_page(&filter, &ctx).await?))
}

/// GET /api/ventas/:id/
pub async fn get_by_id(Path(id): Path<uuid::Uuid>) -> ApiResult<Json<Sale>> {
    Ok(Json(service::get_by_id(&id.to_string()).await?))
}

/// POST /api/ventas/; the seller is the authenticated user
pub async fn create(
    user: CurrentUser,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Sale>)> {
    let sale = service::create(user.user_id()?, parse_body(body)?).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
