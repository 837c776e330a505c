use axum::{extract::Query, Json};
use contracts::shared::search::GlobalSearchResponse;
use serde::Deserialize;

use crate::shared::error::ApiResult;
use crate::usecases::u101_global_search::service;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// GET /api/global-search/?q=
pub async fn global_search(Query(params): Query<SearchParams>) -> ApiResult<Json<GlobalSearchResponse>> {
    Ok(Json(service::global_search(&params.q).await?))
}
