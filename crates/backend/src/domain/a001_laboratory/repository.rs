use contracts::domain::a001_laboratory::aggregate::{Laboratory, LaboratoryDto};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, PaginatorTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_laboratory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Laboratory {
    fn from(m: Model) -> Self {
        Laboratory {
            id: m.id,
            name: m.nombre,
            address: m.direccion,
            phone: m.telefono,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn search_condition(search: Option<&str>) -> Condition {
    match search {
        Some(term) => Condition::all().add(Column::Nombre.contains(term)),
        None => Condition::all(),
    }
}

pub async fn count(search: Option<&str>) -> anyhow::Result<u64> {
    let total = Entity::find()
        .filter(search_condition(search))
        .count(conn())
        .await?;
    Ok(total)
}

pub async fn list_page(
    search: Option<&str>,
    offset: u64,
    limit: u64,
) -> anyhow::Result<Vec<Laboratory>> {
    let items = Entity::find()
        .filter(search_condition(search))
        .order_by_asc(Column::Nombre)
        .offset(offset)
        .limit(limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_all() -> anyhow::Result<Vec<Laboratory>> {
    let items = Entity::find()
        .order_by_asc(Column::Nombre)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Laboratory>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Case-insensitive name lookup, used for the uniqueness rule
pub async fn find_by_name(name: &str) -> anyhow::Result<Option<Laboratory>> {
    use sea_orm::sea_query::Expr;
    let result = Entity::find()
        .filter(Expr::cust_with_values(
            "lower(nombre) = lower(?)",
            [name.trim().to_string()],
        ))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Names for a set of ids, used to decorate products
pub async fn names_by_ids(ids: &[i64]) -> anyhow::Result<std::collections::HashMap<i64, String>> {
    if ids.is_empty() {
        return Ok(Default::default());
    }
    let rows = Entity::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(conn())
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, m.nombre)).collect())
}

/// Ids of laboratories whose name contains `term`
pub async fn ids_matching(term: &str) -> anyhow::Result<Vec<i64>> {
    let rows = Entity::find()
        .filter(Column::Nombre.contains(term))
        .all(conn())
        .await?;
    Ok(rows.into_iter().map(|m| m.id).collect())
}

pub async fn search(term: &str, limit: u64) -> anyhow::Result<Vec<Laboratory>> {
    let items = Entity::find()
        .filter(Column::Nombre.contains(term))
        .order_by_asc(Column::Nombre)
        .limit(limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(dto: &LaboratoryDto) -> anyhow::Result<Laboratory> {
    let active = ActiveModel {
        nombre: Set(dto.name.trim().to_string()),
        direccion: Set(dto.address.clone()),
        telefono: Set(dto.phone.clone()),
        ..Default::default()
    };
    let model = active.insert(conn()).await?;
    Ok(model.into())
}

pub async fn update(id: i64, dto: &LaboratoryDto) -> anyhow::Result<Laboratory> {
    let active = ActiveModel {
        id: Set(id),
        nombre: Set(dto.name.trim().to_string()),
        direccion: Set(dto.address.clone()),
        telefono: Set(dto.phone.clone()),
    };
    let model = active.update(conn()).await?;
    Ok(model.into())
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
