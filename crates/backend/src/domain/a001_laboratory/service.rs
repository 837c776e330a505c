use contracts::domain::a001_laboratory::aggregate::{Laboratory, LaboratoryDto};
use contracts::shared::pagination::{Page, PAGE_SIZE};
use serde::Deserialize;

use super::repository;
use crate::domain::a002_product;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::listing::{page_offset, search_term, ListContext};
use crate::shared::patch::merge_patch;

/// Query parameters of the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LaboratoryFilter {
    pub search: Option<String>,
}

pub async fn list_page(filter: &LaboratoryFilter, ctx: &ListContext) -> ApiResult<Page<Laboratory>> {
    let search = search_term(&filter.search);
    let count = repository::count(search.as_deref()).await?;
    let page = ctx.page_number(count)?;
    let items = repository::list_page(search.as_deref(), page_offset(page), PAGE_SIZE).await?;
    Ok(ctx.page(items, count, page))
}

pub async fn list_all() -> ApiResult<Vec<Laboratory>> {
    Ok(repository::list_all().await?)
}

pub async fn get_by_id(id: i64) -> ApiResult<Laboratory> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)
}

/// Create a laboratory; names are unique case-insensitively
pub async fn create(dto: LaboratoryDto) -> ApiResult<Laboratory> {
    dto.validate()?;
    ensure_unique_name(&dto.name, None).await?;
    let created = repository::insert(&dto).await?;
    tracing::info!("Laboratory {} created: {}", created.id, created.name);
    Ok(created)
}

pub async fn update(id: i64, dto: LaboratoryDto) -> ApiResult<Laboratory> {
    let current = get_by_id(id).await?;
    dto.validate()?;
    ensure_unique_name(&dto.name, Some(id)).await?;

    // name is frozen once products reference the laboratory
    if dto.name.trim() != current.name
        && a002_product::repository::count_by_laboratory(id).await? > 0
    {
        return Err(ApiError::field(
            "nombre",
            "No se puede cambiar el nombre de un laboratorio que tiene productos asociados.",
        ));
    }

    Ok(repository::update(id, &dto).await?)
}

pub async fn partial_update(id: i64, patch: serde_json::Value) -> ApiResult<Laboratory> {
    let current = get_by_id(id).await?;
    let dto = merge_patch(&LaboratoryDto::from(&current), patch)?;
    update(id, dto).await
}

pub async fn delete(id: i64) -> ApiResult<()> {
    let lab = get_by_id(id).await?;
    let products = a002_product::repository::count_by_laboratory(id).await?;
    if products > 0 {
        return Err(ApiError::Forbidden(format!(
            "No se puede eliminar el laboratorio \"{}\": tiene {} producto(s) asociado(s).",
            lab.name, products
        )));
    }
    if !repository::delete(id).await? {
        return Err(ApiError::not_found());
    }
    tracing::info!("Laboratory {} deleted", id);
    Ok(())
}

async fn ensure_unique_name(name: &str, except_id: Option<i64>) -> ApiResult<()> {
    if let Some(existing) = repository::find_by_name(name).await? {
        if Some(existing.id) != except_id {
            return Err(ApiError::field(
                "nombre",
                "Ya existe un laboratorio con este nombre.",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::testing::test_database;
    use contracts::domain::a002_product::aggregate::ProductDto;
    use serde_json::json;

    fn lab(name: &str) -> LaboratoryDto {
        LaboratoryDto {
            name: name.into(),
            address: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_name_is_unique_ignoring_case() {
        let _db = test_database().await;
        create(lab("Laboratorio Chile")).await.unwrap();
        let err = create(lab("LABORATORIO CHILE")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.contains("nombre")));
    }

    #[tokio::test]
    async fn test_laboratory_with_products_is_frozen() {
        let _db = test_database().await;
        let created = create(lab("Saval")).await.unwrap();
        a002_product::service::create(ProductDto {
            laboratory_id: created.id,
            name: "Losartan".into(),
            dosage_mg: 50,
            serial_code: "LAB-SAVAL-01".into(),
            ..Default::default()
        })
        .await
        .unwrap();

        let err = partial_update(created.id, json!({"nombre": "Saval SA"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.contains("nombre")));

        let updated = partial_update(created.id, json!({"telefono": "224445566"}))
            .await
            .unwrap();
        assert_eq!(updated.phone.as_deref(), Some("224445566"));
        assert_eq!(updated.name, "Saval");

        assert!(matches!(delete(created.id).await, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_unreferenced_laboratory_is_renamed_and_deleted() {
        let _db = test_database().await;
        let created = create(lab("Recalcine")).await.unwrap();
        let renamed = partial_update(created.id, json!({"nombre": "Recalcine Chile"}))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Recalcine Chile");

        delete(created.id).await.unwrap();
        assert!(matches!(get_by_id(created.id).await, Err(ApiError::NotFound(_))));
    }
}
