use chrono::NaiveDate;
use contracts::domain::a003_batch::aggregate::{Batch, BatchDto};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{Condition, ConnectionTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared::data::db::get_connection;
use crate::shared::listing::Ordering;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_batch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub producto_id: i64,
    pub codigo_lote: String,
    pub fecha_creacion: NaiveDate,
    pub fecha_vencimiento: NaiveDate,
    pub cantidad: i64,
    pub defectuoso: bool,
    pub activo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_batch(self, product_name: String) -> Batch {
        Batch {
            id: self.id,
            product_id: self.producto_id,
            product_name,
            lot_code: self.codigo_lote,
            created_on: self.fecha_creacion,
            expires_on: self.fecha_vencimiento,
            quantity: self.cantidad.max(0) as u32,
            defective: self.defectuoso,
            active: self.activo,
        }
    }
}

/// Resolved list filter
#[derive(Debug, Clone, Default)]
pub struct BatchQuery {
    pub search: Option<String>,
    pub product_id: Option<i64>,
    pub defective: Option<bool>,
    pub active: Option<bool>,
    pub expires_from: Option<NaiveDate>,
    pub expires_to: Option<NaiveDate>,
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn condition(query: &BatchQuery) -> Condition {
    let mut cond = Condition::all();
    if let Some(term) = query.search.as_deref() {
        cond = cond.add(Column::CodigoLote.contains(term));
    }
    if let Some(product) = query.product_id {
        cond = cond.add(Column::ProductoId.eq(product));
    }
    if let Some(defective) = query.defective {
        cond = cond.add(Column::Defectuoso.eq(defective));
    }
    if let Some(active) = query.active {
        cond = cond.add(Column::Activo.eq(active));
    }
    if let Some(from) = query.expires_from {
        cond = cond.add(Column::FechaVencimiento.gte(from));
    }
    if let Some(to) = query.expires_to {
        cond = cond.add(Column::FechaVencimiento.lte(to));
    }
    cond
}

pub async fn count(query: &BatchQuery) -> anyhow::Result<u64> {
    let total = Entity::find()
        .filter(condition(query))
        .count(conn())
        .await?;
    Ok(total)
}

pub async fn list_page(
    query: &BatchQuery,
    ordering: Option<&Ordering>,
    offset: u64,
    limit: u64,
) -> anyhow::Result<Vec<Model>> {
    let column = match ordering.map(|o| o.field.as_str()) {
        Some("fecha_creacion") => Column::FechaCreacion,
        _ => Column::FechaVencimiento,
    };
    let select = Entity::find().filter(condition(query));
    let select = if ordering.map(|o| o.descending).unwrap_or(false) {
        select.order_by_desc(column)
    } else {
        select.order_by_asc(column)
    };
    let items = select
        .order_by_asc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn())
        .await?;
    Ok(items)
}

pub async fn list_all() -> anyhow::Result<Vec<Model>> {
    let items = Entity::find()
        .order_by_asc(Column::FechaVencimiento)
        .all(conn())
        .await?;
    Ok(items)
}

pub async fn search(term: &str, limit: u64) -> anyhow::Result<Vec<Model>> {
    let items = Entity::find()
        .filter(Column::CodigoLote.contains(term))
        .order_by_asc(Column::FechaVencimiento)
        .limit(limit)
        .all(conn())
        .await?;
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(conn()).await?)
}

pub async fn find_by_product_and_code(
    product_id: i64,
    lot_code: &str,
) -> anyhow::Result<Option<Model>> {
    let result = Entity::find()
        .filter(Column::ProductoId.eq(product_id))
        .filter(Column::CodigoLote.eq(lot_code.trim()))
        .one(conn())
        .await?;
    Ok(result)
}

pub async fn count_by_product(product_id: i64) -> anyhow::Result<u64> {
    let total = Entity::find()
        .filter(Column::ProductoId.eq(product_id))
        .count(conn())
        .await?;
    Ok(total)
}

/// Sum of sellable units (active, not defective, positive quantity) per product
pub async fn stock_by_products(product_ids: &[i64]) -> anyhow::Result<HashMap<i64, u64>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Entity::find()
        .filter(Column::ProductoId.is_in(product_ids.iter().copied()))
        .filter(Column::Activo.eq(true))
        .filter(Column::Defectuoso.eq(false))
        .filter(Column::Cantidad.gt(0))
        .all(conn())
        .await?;
    let mut stock: HashMap<i64, u64> = HashMap::new();
    for row in rows {
        *stock.entry(row.producto_id).or_default() += row.cantidad as u64;
    }
    Ok(stock)
}

/// Sellable, unexpired batches of a product in first-expiry order
pub async fn sellable_for_product<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    today: NaiveDate,
) -> anyhow::Result<Vec<Model>> {
    let items = Entity::find()
        .filter(Column::ProductoId.eq(product_id))
        .filter(Column::Activo.eq(true))
        .filter(Column::Defectuoso.eq(false))
        .filter(Column::Cantidad.gt(0))
        .filter(Column::FechaVencimiento.gte(today))
        .order_by_asc(Column::FechaVencimiento)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(items)
}

/// Decrement stock in place; false when the batch no longer holds `quantity`
pub async fn take_quantity<C: ConnectionTrait>(db: &C, id: i64, quantity: i64) -> anyhow::Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::Cantidad, Expr::col(Column::Cantidad).sub(quantity))
        .filter(Column::Id.eq(id))
        .filter(Column::Cantidad.gte(quantity))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

pub async fn insert(dto: &BatchDto) -> anyhow::Result<Model> {
    let active = ActiveModel {
        producto_id: Set(dto.product_id),
        codigo_lote: Set(dto.lot_code.trim().to_string()),
        fecha_creacion: Set(dto.created_on),
        fecha_vencimiento: Set(dto.expires_on),
        cantidad: Set(dto.quantity as i64),
        defectuoso: Set(dto.defective),
        activo: Set(dto.active),
        ..Default::default()
    };
    Ok(active.insert(conn()).await?)
}

/// Only the mutable columns are written
pub async fn update(id: i64, dto: &BatchDto) -> anyhow::Result<Model> {
    let active = ActiveModel {
        id: Set(id),
        cantidad: Set(dto.quantity as i64),
        defectuoso: Set(dto.defective),
        activo: Set(dto.active),
        ..Default::default()
    };
    Ok(active.update(conn()).await?)
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
