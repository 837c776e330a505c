use contracts::domain::a003_batch::aggregate::{Batch, BatchDto};
use contracts::shared::pagination::{Page, PAGE_SIZE};
use contracts::shared::validation::FieldErrors;
use serde::Deserialize;

use super::repository::{self, BatchQuery, Model};
use crate::domain::{a002_product, a004_sale};
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::listing::{
    bool_param, date_param, id_param, page_offset, parse_ordering, search_term, ListContext,
};
use crate::shared::patch::merge_patch;

pub const ORDERING_FIELDS: &[&str] = &["fecha_vencimiento", "fecha_creacion"];

/// Query parameters of the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct BatchFilter {
    pub search: Option<String>,
    pub producto: Option<String>,
    pub defectuoso: Option<String>,
    pub activo: Option<String>,
    #[serde(rename = "fecha_vencimiento__gte")]
    pub expires_from: Option<String>,
    #[serde(rename = "fecha_vencimiento__lte")]
    pub expires_to: Option<String>,
    pub ordering: Option<String>,
}

impl BatchFilter {
    fn resolve(&self) -> ApiResult<BatchQuery> {
        Ok(BatchQuery {
            search: search_term(&self.search),
            product_id: id_param("producto", &self.producto)?,
            defective: bool_param("defectuoso", &self.defectuoso)?,
            active: bool_param("activo", &self.activo)?,
            expires_from: date_param("fecha_vencimiento__gte", &self.expires_from)?,
            expires_to: date_param("fecha_vencimiento__lte", &self.expires_to)?,
        })
    }
}

/// Attach product names
pub async fn decorate(models: Vec<Model>) -> ApiResult<Vec<Batch>> {
    let product_ids: Vec<i64> = models.iter().map(|m| m.producto_id).collect();
    let names = a002_product::repository::names_by_ids(&product_ids).await?;
    Ok(models
        .into_iter()
        .map(|m| {
            let name = names
                .get(&m.producto_id)
                .map(|(name, _)| name.clone())
                .unwrap_or_default();
            m.into_batch(name)
        })
        .collect())
}

pub async fn list_page(filter: &BatchFilter, ctx: &ListContext) -> ApiResult<Page<Batch>> {
    let query = filter.resolve()?;
    let ordering = parse_ordering(filter.ordering.as_deref(), ORDERING_FIELDS);
    let count = repository::count(&query).await?;
    let page = ctx.page_number(count)?;
    let models =
        repository::list_page(&query, ordering.as_ref(), page_offset(page), PAGE_SIZE).await?;
    Ok(ctx.page(decorate(models).await?, count, page))
}

pub async fn list_all() -> ApiResult<Vec<Batch>> {
    decorate(repository::list_all().await?).await
}

pub async fn get_by_id(id: i64) -> ApiResult<Batch> {
    let model = repository::get_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    decorate(vec![model])
        .await?
        .pop()
        .ok_or_else(ApiError::not_found)
}

pub async fn create(dto: BatchDto) -> ApiResult<Batch> {
    let dto = dto.normalized();
    dto.validate_new()?;
    if a002_product::repository::get_by_id(dto.product_id)
        .await?
        .is_none()
    {
        return Err(ApiError::field("producto", "El producto seleccionado no existe."));
    }
    if repository::find_by_product_and_code(dto.product_id, &dto.lot_code)
        .await?
        .is_some()
    {
        return Err(ApiError::field(
            "codigo_lote",
            "Ya existe un lote con este código para el producto.",
        ));
    }
    let model = repository::insert(&dto).await?;
    tracing::info!(
        "Batch {} created for product {} (expires {})",
        model.id,
        model.producto_id,
        model.fecha_vencimiento
    );
    get_by_id(model.id).await
}

/// Fields that may not change once the batch exists
pub fn immutable_changes(current: &Model, dto: &BatchDto) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if dto.product_id != current.producto_id {
        errors.add("producto", "No se puede cambiar el producto de un lote existente.");
    }
    if dto.lot_code.trim() != current.codigo_lote {
        errors.add("codigo_lote", "No se puede cambiar el código de un lote existente.");
    }
    if dto.created_on != current.fecha_creacion {
        errors.add(
            "fecha_creacion",
            "No se puede cambiar la fecha de creación de un lote existente.",
        );
    }
    if dto.expires_on != current.fecha_vencimiento {
        errors.add(
            "fecha_vencimiento",
            "No se puede cambiar la fecha de vencimiento de un lote existente.",
        );
    }
    errors
}

pub async fn update(id: i64, dto: BatchDto) -> ApiResult<Batch> {
    let current = repository::get_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    let dto = dto.normalized();
    dto.validate()?;
    immutable_changes(&current, &dto).into_result()?;
    repository::update(id, &dto).await?;
    get_by_id(id).await
}

pub async fn partial_update(id: i64, patch: serde_json::Value) -> ApiResult<Batch> {
    let current = get_by_id(id).await?;
    let dto = merge_patch(&BatchDto::from(&current), patch)?;
    update(id, dto).await
}

pub async fn delete(id: i64) -> ApiResult<()> {
    let batch = get_by_id(id).await?;
    if a004_sale::repository::count_lines_by_batch(id).await? > 0 {
        return Err(ApiError::Forbidden(format!(
            "No se puede eliminar el lote \"{}\": tiene ventas registradas.",
            batch.lot_code
        )));
    }
    if !repository::delete(id).await? {
        return Err(ApiError::not_found());
    }
    tracing::info!("Batch {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_laboratory;
    use crate::shared::data::db::{get_connection, testing::test_database};
    use chrono::NaiveDate;
    use contracts::domain::a001_laboratory::aggregate::LaboratoryDto;
    use contracts::domain::a002_product::aggregate::ProductDto;
    use serde_json::json;

    fn model() -> Model {
        Model {
            id: 1,
            producto_id: 3,
            codigo_lote: "L-01".into(),
            fecha_creacion: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            fecha_vencimiento: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            cantidad: 40,
            defectuoso: false,
            activo: true,
        }
    }

    #[test]
    fn test_mutable_fields_pass() {
        let current = model();
        let mut dto = BatchDto::from(&current.clone().into_batch("X".into()));
        dto.quantity = 10;
        dto.defective = true;
        assert!(immutable_changes(&current, &dto).is_empty());
    }

    #[test]
    fn test_identity_fields_are_frozen() {
        let current = model();
        let mut dto = BatchDto::from(&current.clone().into_batch("X".into()));
        dto.product_id = 4;
        dto.expires_on = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        let errors = immutable_changes(&current, &dto);
        assert!(errors.contains("producto"));
        assert!(errors.contains("fecha_vencimiento"));
        assert!(!errors.contains("codigo_lote"));
    }

    async fn product(lab_name: &str, serial: &str) -> i64 {
        let lab = a001_laboratory::service::create(LaboratoryDto {
            name: lab_name.into(),
            address: None,
            phone: None,
        })
        .await
        .unwrap();
        a002_product::service::create(ProductDto {
            laboratory_id: lab.id,
            name: "Amoxicilina".into(),
            dosage_mg: 500,
            serial_code: serial.into(),
            ..Default::default()
        })
        .await
        .unwrap()
        .id
    }

    fn dto(product_id: i64, code: &str, quantity: u32) -> BatchDto {
        BatchDto {
            product_id,
            lot_code: code.into(),
            created_on: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            expires_on: NaiveDate::from_ymd_opt(2027, 2, 1).unwrap(),
            quantity,
            defective: false,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_new_batch_requires_units() {
        let _db = test_database().await;
        let product_id = product("Lab Lote Vacio", "7800002000010").await;
        let err = create(dto(product_id, "V-0", 0)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.contains("cantidad")));
    }

    #[tokio::test]
    async fn test_lot_code_is_unique_per_product() {
        let _db = test_database().await;
        let first = product("Lab Lote Unico A", "7800002000027").await;
        let second = product("Lab Lote Unico B", "7800002000034").await;
        create(dto(first, "U-1", 5)).await.unwrap();
        let err = create(dto(first, "U-1", 5)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.contains("codigo_lote")));
        create(dto(second, "U-1", 5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_depleted_batch_can_be_retired() {
        let _db = test_database().await;
        let product_id = product("Lab Lote Agotado", "7800002000041").await;
        let batch = create(dto(product_id, "A-1", 5)).await.unwrap();

        assert!(repository::take_quantity(get_connection(), batch.id, 5).await.unwrap());
        assert!(!repository::take_quantity(get_connection(), batch.id, 1).await.unwrap());
        assert_eq!(get_by_id(batch.id).await.unwrap().quantity, 0);

        let retired = partial_update(batch.id, json!({"activo": false})).await.unwrap();
        assert!(!retired.active);
        assert_eq!(retired.quantity, 0);

        let flagged = partial_update(batch.id, json!({"defectuoso": true})).await.unwrap();
        assert!(flagged.defective);
        assert!(!flagged.active);
    }

    #[tokio::test]
    async fn test_unsold_batch_can_be_deleted() {
        let _db = test_database().await;
        let product_id = product("Lab Lote Borrable", "7800002000058").await;
        let batch = create(dto(product_id, "B-1", 2)).await.unwrap();
        delete(batch.id).await.unwrap();
        assert!(matches!(get_by_id(batch.id).await, Err(ApiError::NotFound(_))));
    }
}
