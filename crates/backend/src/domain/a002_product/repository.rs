use contracts::domain::a002_product::aggregate::{Product, ProductDto};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, PaginatorTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::a001_laboratory;
use crate::shared::data::db::get_connection;
use crate::shared::listing::Ordering;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub laboratorio_id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub cantidad_mg: i64,
    pub cantidad_capsulas: i64,
    pub es_bioequivalente: bool,
    pub codigo_serie: String,
    pub precio_venta: i64,
    pub activo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Wire record; the laboratory name and stock come from other tables
    pub fn into_product(self, laboratory_name: String, stock_total: u64) -> Product {
        Product {
            id: self.id,
            laboratory_id: self.laboratorio_id,
            laboratory_name,
            name: self.nombre,
            description: self.descripcion,
            dosage_mg: self.cantidad_mg.max(0) as u32,
            capsule_count: self.cantidad_capsulas.max(0) as u32,
            bioequivalent: self.es_bioequivalente,
            serial_code: self.codigo_serie,
            sale_price: self.precio_venta.max(0) as u64,
            active: self.activo,
            stock_total,
        }
    }
}

/// Resolved list filter
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub laboratory_id: Option<i64>,
    pub active: Option<bool>,
    pub bioequivalent: Option<bool>,
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

async fn condition(query: &ProductQuery) -> anyhow::Result<Condition> {
    let mut cond = Condition::all();
    if let Some(term) = query.search.as_deref() {
        let lab_ids = a001_laboratory::repository::ids_matching(term).await?;
        cond = cond.add(
            Condition::any()
                .add(Column::Nombre.contains(term))
                .add(Column::CodigoSerie.contains(term))
                .add(Column::LaboratorioId.is_in(lab_ids)),
        );
    }
    if let Some(lab) = query.laboratory_id {
        cond = cond.add(Column::LaboratorioId.eq(lab));
    }
    if let Some(active) = query.active {
        cond = cond.add(Column::Activo.eq(active));
    }
    if let Some(bio) = query.bioequivalent {
        cond = cond.add(Column::EsBioequivalente.eq(bio));
    }
    Ok(cond)
}

fn order_column(field: &str) -> Column {
    match field {
        "precio_venta" => Column::PrecioVenta,
        "cantidad_mg" => Column::CantidadMg,
        _ => Column::Nombre,
    }
}

pub async fn count(query: &ProductQuery) -> anyhow::Result<u64> {
    let total = Entity::find()
        .filter(condition(query).await?)
        .count(conn())
        .await?;
    Ok(total)
}

pub async fn list_page(
    query: &ProductQuery,
    ordering: Option<&Ordering>,
    offset: u64,
    limit: u64,
) -> anyhow::Result<Vec<Model>> {
    let mut select = Entity::find().filter(condition(query).await?);
    select = match ordering {
        Some(o) if o.descending => select.order_by_desc(order_column(&o.field)),
        Some(o) => select.order_by_asc(order_column(&o.field)),
        None => select.order_by_asc(Column::Nombre),
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
        .order_by_asc(Column::Nombre)
        .all(conn())
        .await?;
    Ok(items)
}

pub async fn search(term: &str, limit: u64) -> anyhow::Result<Vec<Model>> {
    let items = Entity::find()
        .filter(
            Condition::any()
                .add(Column::Nombre.contains(term))
                .add(Column::CodigoSerie.contains(term)),
        )
        .order_by_asc(Column::Nombre)
        .limit(limit)
        .all(conn())
        .await?;
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(conn()).await?)
}

pub async fn get_by_serial_code(code: &str) -> anyhow::Result<Option<Model>> {
    let result = Entity::find()
        .filter(Column::CodigoSerie.eq(code.trim()))
        .one(conn())
        .await?;
    Ok(result)
}

pub async fn count_by_laboratory(laboratory_id: i64) -> anyhow::Result<u64> {
    let total = Entity::find()
        .filter(Column::LaboratorioId.eq(laboratory_id))
        .count(conn())
        .await?;
    Ok(total)
}

pub async fn names_by_ids(ids: &[i64]) -> anyhow::Result<HashMap<i64, (String, String)>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Entity::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(conn())
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| (m.id, (m.nombre, m.codigo_serie)))
        .collect())
}

pub async fn insert(dto: &ProductDto) -> anyhow::Result<Model> {
    let active = ActiveModel {
        laboratorio_id: Set(dto.laboratory_id),
        nombre: Set(dto.name.trim().to_string()),
        descripcion: Set(dto.description.clone()),
        cantidad_mg: Set(dto.dosage_mg as i64),
        cantidad_capsulas: Set(dto.capsule_count as i64),
        es_bioequivalente: Set(dto.bioequivalent),
        codigo_serie: Set(dto.serial_code.trim().to_string()),
        precio_venta: Set(dto.sale_price as i64),
        activo: Set(dto.active),
        ..Default::default()
    };
    Ok(active.insert(conn()).await?)
}

pub async fn update(id: i64, dto: &ProductDto) -> anyhow::Result<Model> {
    let active = ActiveModel {
        id: Set(id),
        laboratorio_id: Set(dto.laboratory_id),
        nombre: Set(dto.name.trim().to_string()),
        descripcion: Set(dto.description.clone()),
        cantidad_mg: Set(dto.dosage_mg as i64),
        cantidad_capsulas: Set(dto.capsule_count as i64),
        es_bioequivalente: Set(dto.bioequivalent),
        codigo_serie: Set(dto.serial_code.trim().to_string()),
        precio_venta: Set(dto.sale_price as i64),
        activo: Set(dto.active),
    };
    Ok(active.update(conn()).await?)
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
