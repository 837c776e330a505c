use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, ConnectionTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;
use crate::shared::listing::Ordering;

pub mod sale {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a004_sale")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub usuario_id: i64,
        pub fecha: chrono::DateTime<chrono::Utc>,
        pub total: i64,
        pub metodo_pago: String,
        pub anulada: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod line {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a004_sale_line")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub venta_id: String,
        pub producto_id: i64,
        pub lote_id: i64,
        pub cantidad: i64,
        pub precio_unitario: i64,
        pub subtotal: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Resolved list filter
#[derive(Debug, Clone, Default)]
pub struct SaleQuery {
    pub payment_method: Option<String>,
    pub voided: Option<bool>,
    pub user_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Line to be written as part of a new sale
#[derive(Debug, Clone)]
pub struct NewLine {
    pub product_id: i64,
    pub batch_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn condition(query: &SaleQuery) -> Condition {
    let mut cond = Condition::all();
    if let Some(method) = query.payment_method.as_deref() {
        cond = cond.add(sale::Column::MetodoPago.eq(method));
    }
    if let Some(voided) = query.voided {
        cond = cond.add(sale::Column::Anulada.eq(voided));
    }
    if let Some(user) = query.user_id {
        cond = cond.add(sale::Column::UsuarioId.eq(user));
    }
    if let Some(from) = query.from.and_then(|d| d.and_hms_opt(0, 0, 0)) {
        cond = cond.add(sale::Column::Fecha.gte(from.and_utc()));
    }
    if let Some(to) = query.to.and_then(|d| d.and_hms_opt(23, 59, 59)) {
        cond = cond.add(sale::Column::Fecha.lte(to.and_utc()));
    }
    cond
}

pub async fn count(query: &SaleQuery) -> anyhow::Result<u64> {
    let total = sale::Entity::find()
        .filter(condition(query))
        .count(conn())
        .await?;
    Ok(total)
}

pub async fn list_page(
    query: &SaleQuery,
    ordering: Option<&Ordering>,
    offset: u64,
    limit: u64,
) -> anyhow::Result<Vec<sale::Model>> {
    let column = match ordering.map(|o| o.field.as_str()) {
        Some("total") => sale::Column::Total,
        _ => sale::Column::Fecha,
    };
    // newest first unless asked otherwise
    let descending = ordering.map(|o| o.descending).unwrap_or(true);
    let select = sale::Entity::find().filter(condition(query));
    let select = if descending {
        select.order_by_desc(column)
    } else {
        select.order_by_asc(column)
    };
    Ok(select.offset(offset).limit(limit).all(conn()).await?)
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<sale::Model>> {
    Ok(sale::Entity::find_by_id(id.to_string()).one(conn()).await?)
}

pub async fn lines_for_sales(sale_ids: &[String]) -> anyhow::Result<Vec<line::Model>> {
    if sale_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = line::Entity::find()
        .filter(line::Column::VentaId.is_in(sale_ids.iter().cloned()))
        .order_by_asc(line::Column::Id)
        .all(conn())
        .await?;
    Ok(rows)
}

pub async fn count_lines_by_product(product_id: i64) -> anyhow::Result<u64> {
    let total = line::Entity::find()
        .filter(line::Column::ProductoId.eq(product_id))
        .count(conn())
        .await?;
    Ok(total)
}

pub async fn count_lines_by_batch(batch_id: i64) -> anyhow::Result<u64> {
    let total = line::Entity::find()
        .filter(line::Column::LoteId.eq(batch_id))
        .count(conn())
        .await?;
    Ok(total)
}

/// Write header and lines; the caller owns the transaction
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    id: &str,
    user_id: i64,
    created_at: DateTime<Utc>,
    payment_method: &str,
    lines: &[NewLine],
) -> anyhow::Result<i64> {
    let total: i64 = lines.iter().map(|l| l.quantity * l.unit_price).sum();
    sale::ActiveModel {
        id: Set(id.to_string()),
        usuario_id: Set(user_id),
        fecha: Set(created_at),
        total: Set(total),
        metodo_pago: Set(payment_method.to_string()),
        anulada: Set(false),
    }
    .insert(db)
    .await?;

    for l in lines {
        line::ActiveModel {
            venta_id: Set(id.to_string()),
            producto_id: Set(l.product_id),
            lote_id: Set(l.batch_id),
            cantidad: Set(l.quantity),
            precio_unitario: Set(l.unit_price),
            subtotal: Set(l.quantity * l.unit_price),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(total)
}
