use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use contracts::domain::a004_sale::aggregate::{CreateSaleRequest, PaymentMethod, Sale, SaleLine};
use contracts::shared::pagination::{Page, PAGE_SIZE};
use contracts::shared::validation::FieldErrors;
use sea_orm::{EntityTrait, TransactionTrait};
use serde::Deserialize;
use uuid::Uuid;

use super::allocation::{allocate_fefo, BatchStock};
use super::repository::{self, line, sale, NewLine, SaleQuery};
use crate::domain::{a002_product, a003_batch};
use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::listing::{
    bool_param, date_param, id_param, page_offset, parse_ordering, ListContext,
};
use crate::system::users;

pub const ORDERING_FIELDS: &[&str] = &["fecha", "total"];

/// Query parameters of the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SaleFilter {
    pub metodo_pago: Option<String>,
    pub anulada: Option<String>,
    pub usuario: Option<String>,
    #[serde(rename = "fecha__gte")]
    pub from: Option<String>,
    #[serde(rename = "fecha__lte")]
    pub to: Option<String>,
    pub ordering: Option<String>,
}

impl SaleFilter {
    fn resolve(&self) -> ApiResult<SaleQuery> {
        let payment_method = match self.metodo_pago.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) => Some(
                PaymentMethod::from_code(code)
                    .ok_or_else(|| {
                        ApiError::field("metodo_pago", "Seleccione una opción válida.")
                    })?
                    .code()
                    .to_string(),
            ),
        };
        Ok(SaleQuery {
            payment_method,
            voided: bool_param("anulada", &self.anulada)?,
            user_id: id_param("usuario", &self.usuario)?,
            from: date_param("fecha__gte", &self.from)?,
            to: date_param("fecha__lte", &self.to)?,
        })
    }
}

/// Sum quantities of repeated products, keeping first-seen order
pub fn merge_items(request: &CreateSaleRequest) -> Vec<(i64, u32)> {
    let mut merged: Vec<(i64, u32)> = Vec::new();
    for item in &request.items {
        match merged.iter_mut().find(|(id, _)| *id == item.product_id) {
            Some((_, qty)) => *qty = qty.saturating_add(item.quantity),
            None => merged.push((item.product_id, item.quantity)),
        }
    }
    merged
}

/// Build wire records from headers and their lines
async fn assemble(headers: Vec<sale::Model>) -> ApiResult<Vec<Sale>> {
    let ids: Vec<String> = headers.iter().map(|h| h.id.clone()).collect();
    let lines = repository::lines_for_sales(&ids).await?;

    let product_ids: Vec<i64> = lines.iter().map(|l| l.producto_id).collect();
    let products = a002_product::repository::names_by_ids(&product_ids).await?;
    let user_ids: Vec<i64> = headers.iter().map(|h| h.usuario_id).collect();
    let sellers = users::repository::usernames_by_ids(&user_ids).await?;

    let mut grouped: HashMap<String, Vec<SaleLine>> = HashMap::new();
    for l in lines {
        let (product_name, serial_code) = products.get(&l.producto_id).cloned().unwrap_or_default();
        grouped.entry(l.venta_id.clone()).or_default().push(to_line(l, product_name, serial_code));
    }

    headers
        .into_iter()
        .map(|h| {
            let id = Uuid::parse_str(&h.id)
                .map_err(|e| anyhow::anyhow!("Corrupt sale id {}: {}", h.id, e))?;
            Ok(Sale {
                id,
                created_at: h.fecha,
                total: h.total.max(0) as u64,
                payment_method: PaymentMethod::from_code(&h.metodo_pago).unwrap_or_default(),
                user_id: h.usuario_id,
                seller_name: sellers.get(&h.usuario_id).cloned().unwrap_or_default(),
                voided: h.anulada,
                lines: grouped.remove(&h.id).unwrap_or_default(),
            })
        })
        .collect()
}

fn to_line(l: line::Model, product_name: String, serial_code: String) -> SaleLine {
    SaleLine {
        id: l.id,
        product_id: l.producto_id,
        batch_id: l.lote_id,
        quantity: l.cantidad.max(0) as u32,
        unit_price: l.precio_unitario.max(0) as u64,
        subtotal: l.subtotal.max(0) as u64,
        product_name,
        serial_code,
    }
}

pub async fn list_page(filter: &SaleFilter, ctx: &ListContext) -> ApiResult<Page<Sale>> {
    let query = filter.resolve()?;
    let ordering = parse_ordering(filter.ordering.as_deref(), ORDERING_FIELDS);
    let count = repository::count(&query).await?;
    let page = ctx.page_number(count)?;
    let headers =
        repository::list_page(&query, ordering.as_ref(), page_offset(page), PAGE_SIZE).await?;
    Ok(ctx.page(assemble(headers).await?, count, page))
}

pub async fn get_by_id(id: &str) -> ApiResult<Sale> {
    let header = repository::get_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    assemble(vec![header])
        .await?
        .pop()
        .ok_or_else(ApiError::not_found)
}

/// Register a sale for `user_id`.
///
/// Runs in one transaction: every requested product is allocated over its
/// sellable batches (first expiry first), batch stock is decremented and the
/// lines are written with the current sale price. Any shortfall aborts the
/// whole sale with a validation error and nothing is written.
pub async fn create(user_id: i64, request: CreateSaleRequest) -> ApiResult<Sale> {
    request.validate()?;

    let today = Utc::now().date_naive();
    let txn = get_connection().begin().await?;

    let mut errors = FieldErrors::new();
    let mut lines: Vec<NewLine> = Vec::new();
    // batch id -> units taken, product name
    let mut takes: BTreeMap<i64, (i64, String)> = BTreeMap::new();

    for (product_id, requested) in merge_items(&request) {
        let product = match a002_product::repository::Entity::find_by_id(product_id)
            .one(&txn)
            .await?
        {
            Some(p) => p,
            None => {
                errors.add("items", format!("El producto {} no existe.", product_id));
                continue;
            }
        };
        if !product.activo {
            errors.add(
                "items",
                format!("El producto \"{}\" no está activo.", product.nombre),
            );
            continue;
        }

        let batches = a003_batch::repository::sellable_for_product(&txn, product_id, today).await?;
        let stock: Vec<BatchStock> = batches
            .iter()
            .map(|b| BatchStock {
                batch_id: b.id,
                expires_on: b.fecha_vencimiento,
                available: b.cantidad.clamp(0, u32::MAX as i64) as u32,
            })
            .collect();

        match allocate_fefo(&stock, requested) {
            Ok(allocations) => {
                for a in allocations {
                    takes.insert(a.batch_id, (a.quantity as i64, product.nombre.clone()));
                    lines.push(NewLine {
                        product_id,
                        batch_id: a.batch_id,
                        quantity: a.quantity as i64,
                        unit_price: product.precio_venta,
                    });
                }
            }
            Err(shortfall) => errors.add(
                "items",
                format!(
                    "Stock insuficiente para \"{}\": solicitado {}, disponible {}.",
                    product.nombre, shortfall.requested, shortfall.available
                ),
            ),
        }
    }

    if !errors.is_empty() {
        // dropping the transaction rolls it back
        return Err(ApiError::Validation(errors));
    }

    for (batch_id, (quantity, product_name)) in &takes {
        if !a003_batch::repository::take_quantity(&txn, *batch_id, *quantity).await? {
            // another sale consumed the batch after it was read
            return Err(ApiError::field(
                "items",
                format!(
                    "Stock insuficiente para \"{}\": el lote {} cambió durante la venta.",
                    product_name, batch_id
                ),
            ));
        }
    }

    let id = Uuid::new_v4().to_string();
    let total = repository::insert(
        &txn,
        &id,
        user_id,
        Utc::now(),
        request.payment_method.code(),
        &lines,
    )
    .await?;
    txn.commit().await?;

    tracing::info!(
        "Sale {} registered by user {}: {} line(s), total {}",
        id,
        user_id,
        lines.len(),
        total
    );
    get_by_id(&id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_laboratory;
    use crate::shared::data::db::testing::test_database;
    use chrono::NaiveDate;
    use contracts::domain::a001_laboratory::aggregate::LaboratoryDto;
    use contracts::domain::a002_product::aggregate::ProductDto;
    use contracts::domain::a003_batch::aggregate::BatchDto;
    use contracts::domain::a004_sale::aggregate::SaleItemRequest;
    use contracts::system::users::CreateUserDto;

    /// Seller, product at $1.500 and its batches `(code, expiry year, units)`
    async fn setup(tag: &str, batches: &[(&str, i32, u32)]) -> (i64, i64, Vec<i64>) {
        let seller = users::service::create(CreateUserDto {
            username: format!("vendedor-{}", tag),
            password: "clave123".into(),
            ..Default::default()
        })
        .await
        .unwrap();
        let lab = a001_laboratory::service::create(LaboratoryDto {
            name: format!("Lab Venta {}", tag),
            address: None,
            phone: None,
        })
        .await
        .unwrap();
        let product = a002_product::service::create(ProductDto {
            laboratory_id: lab.id,
            name: format!("Ibuprofeno {}", tag),
            dosage_mg: 400,
            serial_code: format!("VTA-{}", tag),
            sale_price: 1500,
            ..Default::default()
        })
        .await
        .unwrap();
        let mut batch_ids = Vec::new();
        for (code, year, units) in batches {
            let batch = a003_batch::service::create(BatchDto {
                product_id: product.id,
                lot_code: code.to_string(),
                created_on: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                expires_on: NaiveDate::from_ymd_opt(*year, 6, 30).unwrap(),
                quantity: *units,
                defective: false,
                active: true,
            })
            .await
            .unwrap();
            batch_ids.push(batch.id);
        }
        (seller.id, product.id, batch_ids)
    }

    fn order(product_id: i64, quantity: u32) -> CreateSaleRequest {
        CreateSaleRequest {
            payment_method: PaymentMethod::Efectivo,
            items: vec![SaleItemRequest { product_id, quantity }],
        }
    }

    #[test]
    fn test_merge_items_sums_repeated_products() {
        let request = CreateSaleRequest {
            payment_method: PaymentMethod::Debito,
            items: vec![
                SaleItemRequest { product_id: 4, quantity: 2 },
                SaleItemRequest { product_id: 9, quantity: 1 },
                SaleItemRequest { product_id: 4, quantity: 3 },
            ],
        };
        assert_eq!(merge_items(&request), vec![(4, 5), (9, 1)]);
    }

    #[test]
    fn test_filter_rejects_unknown_payment_method() {
        let filter = SaleFilter {
            metodo_pago: Some("CHEQUE".into()),
            ..Default::default()
        };
        assert!(filter.resolve().is_err());

        let filter = SaleFilter {
            metodo_pago: Some("EFECTIVO".into()),
            anulada: Some("false".into()),
            ..Default::default()
        };
        let query = filter.resolve().unwrap();
        assert_eq!(query.payment_method.as_deref(), Some("EFECTIVO"));
        assert_eq!(query.voided, Some(false));
    }

    #[tokio::test]
    async fn test_sale_consumes_earliest_expiry_first() {
        let _db = test_database().await;
        let (seller, product_id, batches) =
            setup("fefo", &[("LATE", 2031, 2), ("EARLY", 2030, 3)]).await;

        let sale = create(seller, order(product_id, 4)).await.unwrap();
        assert_eq!(sale.total, 6000);
        assert_eq!(sale.lines.len(), 2);
        let taken = |batch_id: i64| {
            sale.lines
                .iter()
                .find(|l| l.batch_id == batch_id)
                .map(|l| l.quantity)
        };
        assert_eq!(taken(batches[1]), Some(3));
        assert_eq!(taken(batches[0]), Some(1));
        assert!(sale.lines.iter().all(|l| l.unit_price == 1500));

        let early = a003_batch::service::get_by_id(batches[1]).await.unwrap();
        let late = a003_batch::service::get_by_id(batches[0]).await.unwrap();
        assert_eq!(early.quantity, 0);
        assert_eq!(late.quantity, 1);
        assert_eq!(a002_product::service::get_by_id(product_id).await.unwrap().stock_total, 1);

        // sold batches are referenced by the sale lines
        assert!(matches!(
            a003_batch::service::delete(batches[1]).await,
            Err(ApiError::Forbidden(_))
        ));
        // a depleted batch can still be retired
        let retired =
            a003_batch::service::partial_update(batches[1], serde_json::json!({"activo": false}))
                .await
                .unwrap();
        assert!(!retired.active);
    }

    #[tokio::test]
    async fn test_shortfall_rejects_whole_sale() {
        let _db = test_database().await;
        let (seller, product_id, batches) = setup("corto", &[("C-1", 2030, 2)]).await;

        let err = create(seller, order(product_id, 5)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.contains("items")));
        let batch = a003_batch::service::get_by_id(batches[0]).await.unwrap();
        assert_eq!(batch.quantity, 2);
    }
}
