use contracts::domain::a002_product::aggregate::{Product, ProductDto};
use contracts::shared::pagination::{Page, PAGE_SIZE};
use serde::Deserialize;

use super::repository::{self, Model, ProductQuery};
use crate::domain::{a001_laboratory, a003_batch, a004_sale};
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::listing::{
    bool_param, id_param, page_offset, parse_ordering, search_term, ListContext,
};
use crate::shared::patch::merge_patch;

pub const ORDERING_FIELDS: &[&str] = &["nombre", "precio_venta", "cantidad_mg"];

/// Query parameters of the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub laboratorio: Option<String>,
    pub activo: Option<String>,
    pub es_bioequivalente: Option<String>,
    pub ordering: Option<String>,
}

impl ProductFilter {
    fn resolve(&self) -> ApiResult<ProductQuery> {
        Ok(ProductQuery {
            search: search_term(&self.search),
            laboratory_id: id_param("laboratorio", &self.laboratorio)?,
            active: bool_param("activo", &self.activo)?,
            bioequivalent: bool_param("es_bioequivalente", &self.es_bioequivalente)?,
        })
    }
}

/// Attach laboratory names and computed stock
pub async fn decorate(models: Vec<Model>) -> ApiResult<Vec<Product>> {
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let lab_ids: Vec<i64> = models.iter().map(|m| m.laboratorio_id).collect();
    let labs = a001_laboratory::repository::names_by_ids(&lab_ids).await?;
    let stock = a003_batch::repository::stock_by_products(&ids).await?;
    Ok(models
        .into_iter()
        .map(|m| {
            let lab_name = labs.get(&m.laboratorio_id).cloned().unwrap_or_default();
            let units = stock.get(&m.id).copied().unwrap_or(0);
            m.into_product(lab_name, units)
        })
        .collect())
}

pub async fn list_page(filter: &ProductFilter, ctx: &ListContext) -> ApiResult<Page<Product>> {
    let query = filter.resolve()?;
    let ordering = parse_ordering(filter.ordering.as_deref(), ORDERING_FIELDS);
    let count = repository::count(&query).await?;
    let page = ctx.page_number(count)?;
    let models =
        repository::list_page(&query, ordering.as_ref(), page_offset(page), PAGE_SIZE).await?;
    Ok(ctx.page(decorate(models).await?, count, page))
}

pub async fn list_all() -> ApiResult<Vec<Product>> {
    decorate(repository::list_all().await?).await
}

pub async fn get_by_id(id: i64) -> ApiResult<Product> {
    let model = repository::get_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    decorate(vec![model])
        .await?
        .pop()
        .ok_or_else(ApiError::not_found)
}

async fn check_references(dto: &ProductDto, except_id: Option<i64>) -> ApiResult<()> {
    if a001_laboratory::repository::get_by_id(dto.laboratory_id)
        .await?
        .is_none()
    {
        return Err(ApiError::field(
            "laboratorio",
            "El laboratorio seleccionado no existe.",
        ));
    }
    if let Some(existing) = repository::get_by_serial_code(&dto.serial_code).await? {
        if Some(existing.id) != except_id {
            return Err(ApiError::field(
                "codigo_serie",
                "Ya existe un producto con este código de serie.",
            ));
        }
    }
    Ok(())
}

pub async fn create(dto: ProductDto) -> ApiResult<Product> {
    dto.validate()?;
    check_references(&dto, None).await?;
    let model = repository::insert(&dto).await?;
    tracing::info!("Product {} created: {}", model.id, model.nombre);
    get_by_id(model.id).await
}

pub async fn update(id: i64, dto: ProductDto) -> ApiResult<Product> {
    let current = repository::get_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    dto.validate()?;
    check_references(&dto, Some(id)).await?;

    // identity of the product is frozen once batches exist
    if a003_batch::repository::count_by_product(id).await? > 0 {
        let mut errors = contracts::shared::validation::FieldErrors::new();
        if dto.serial_code.trim() != current.codigo_serie {
            errors.add(
                "codigo_serie",
                "No se puede modificar el código de serie de un producto con lotes.",
            );
        }
        if dto.dosage_mg as i64 != current.cantidad_mg {
            errors.add(
                "cantidad_mg",
                "No se puede modificar la concentración de un producto con lotes.",
            );
        }
        if dto.capsule_count as i64 != current.cantidad_capsulas {
            errors.add(
                "cantidad_capsulas",
                "No se puede modificar la cantidad de cápsulas de un producto con lotes.",
            );
        }
        errors.into_result()?;
    }

    repository::update(id, &dto).await?;
    get_by_id(id).await
}

pub async fn partial_update(id: i64, patch: serde_json::Value) -> ApiResult<Product> {
    let current = get_by_id(id).await?;
    let dto = merge_patch(&ProductDto::from(&current), patch)?;
    update(id, dto).await
}

pub async fn delete(id: i64) -> ApiResult<()> {
    let product = get_by_id(id).await?;
    let batches = a003_batch::repository::count_by_product(id).await?;
    if batches > 0 {
        return Err(ApiError::Forbidden(format!(
            "No se puede eliminar el producto \"{}\": tiene {} lote(s) asociado(s).",
            product.name, batches
        )));
    }
    if a004_sale::repository::count_lines_by_product(id).await? > 0 {
        return Err(ApiError::Forbidden(format!(
            "No se puede eliminar el producto \"{}\": tiene ventas registradas.",
            product.name
        )));
    }
    if !repository::delete(id).await? {
        return Err(ApiError::not_found());
    }
    tracing::info!("Product {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::testing::test_database;
    use chrono::NaiveDate;
    use contracts::domain::a001_laboratory::aggregate::LaboratoryDto;
    use contracts::domain::a003_batch::aggregate::BatchDto;
    use serde_json::json;

    async fn lab(name: &str) -> i64 {
        a001_laboratory::service::create(LaboratoryDto {
            name: name.into(),
            address: None,
            phone: None,
        })
        .await
        .unwrap()
        .id
    }

    fn product(laboratory_id: i64, serial: &str) -> ProductDto {
        ProductDto {
            laboratory_id,
            name: "Paracetamol".into(),
            dosage_mg: 500,
            capsule_count: 16,
            serial_code: serial.into(),
            sale_price: 1990,
            ..Default::default()
        }
    }

    fn batch(product_id: i64, code: &str, quantity: u32) -> BatchDto {
        BatchDto {
            product_id,
            lot_code: code.into(),
            created_on: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            expires_on: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            quantity,
            defective: false,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_serial_code_is_unique() {
        let _db = test_database().await;
        let lab_id = lab("Lab Serie Unica").await;
        create(product(lab_id, "7800001000011")).await.unwrap();
        let err = create(product(lab_id, "7800001000011")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.contains("codigo_serie")));
    }

    #[tokio::test]
    async fn test_unknown_laboratory_is_rejected() {
        let _db = test_database().await;
        let err = create(product(987_654, "7800001000028")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.contains("laboratorio")));
    }

    #[tokio::test]
    async fn test_stock_counts_only_sellable_batches() {
        let _db = test_database().await;
        let lab_id = lab("Lab Stock").await;
        let p = create(product(lab_id, "7800001000035")).await.unwrap();
        assert_eq!(p.stock_total, 0);

        a003_batch::service::create(batch(p.id, "S-1", 10)).await.unwrap();
        a003_batch::service::create(batch(p.id, "S-2", 3)).await.unwrap();
        a003_batch::service::create(BatchDto {
            active: false,
            ..batch(p.id, "S-3", 5)
        })
        .await
        .unwrap();
        a003_batch::service::create(BatchDto {
            defective: true,
            ..batch(p.id, "S-4", 7)
        })
        .await
        .unwrap();

        assert_eq!(get_by_id(p.id).await.unwrap().stock_total, 13);
    }

    #[tokio::test]
    async fn test_product_with_batches_keeps_its_identity() {
        let _db = test_database().await;
        let lab_id = lab("Lab Identidad").await;
        let p = create(product(lab_id, "7800001000042")).await.unwrap();
        a003_batch::service::create(batch(p.id, "I-1", 4)).await.unwrap();

        let err = partial_update(
            p.id,
            json!({"codigo_serie": "7800001000059", "cantidad_mg": 750, "cantidad_capsulas": 20}),
        )
        .await
        .unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected a validation error");
        };
        assert!(errors.contains("codigo_serie"));
        assert!(errors.contains("cantidad_mg"));
        assert!(errors.contains("cantidad_capsulas"));

        let repriced = partial_update(p.id, json!({"precio_venta": 2490, "activo": false}))
            .await
            .unwrap();
        assert_eq!(repriced.sale_price, 2490);
        assert!(!repriced.active);

        assert!(matches!(delete(p.id).await, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_product_without_batches_is_editable_and_deletable() {
        let _db = test_database().await;
        let lab_id = lab("Lab Libre").await;
        let p = create(product(lab_id, "7800001000066")).await.unwrap();
        let changed = partial_update(p.id, json!({"cantidad_mg": 1000}))
            .await
            .unwrap();
        assert_eq!(changed.dosage_mg, 1000);

        delete(p.id).await.unwrap();
        assert!(matches!(get_by_id(p.id).await, Err(ApiError::NotFound(_))));
    }
}
