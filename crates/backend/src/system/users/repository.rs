use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::users::{CreateUserDto, UserProfile};
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement, Value};

use crate::shared::data::db::get_connection;

const PROFILE_COLUMNS: &str = "id, username, email, first_name, last_name, rut, is_active";

fn profile_from_row(row: &QueryResult) -> Result<UserProfile> {
    Ok(UserProfile {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        first_name: row.try_get("", "first_name")?,
        last_name: row.try_get("", "last_name")?,
        rut: row.try_get("", "rut")?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
    })
}

/// Insert a user; returns the new id
pub async fn create_with_password(dto: &CreateUserDto, password_hash: &str) -> Result<i64> {
    let conn = get_connection();
    let email: Option<String> = dto
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);
    let rut: Option<String> = dto
        .rut
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_users (username, email, password_hash, first_name, last_name, rut, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, 1, ?)",
            [
                dto.username.trim().to_string().into(),
                Value::from(email),
                password_hash.to_string().into(),
                dto.first_name.trim().to_string().into(),
                dto.last_name.trim().to_string().into(),
                Value::from(rut),
                Utc::now().to_rfc3339().into(),
            ],
        ))
        .await
        .context("Failed to insert user")?;

    Ok(result.last_insert_id() as i64)
}

pub async fn get_by_id(id: i64) -> Result<Option<UserProfile>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE id = ?", PROFILE_COLUMNS),
            [id.into()],
        ))
        .await?;
    row.as_ref().map(profile_from_row).transpose()
}

/// Profile and stored password hash, for login
pub async fn get_credentials(username: &str) -> Result<Option<(UserProfile, String)>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {}, password_hash FROM sys_users WHERE username = ?",
                PROFILE_COLUMNS
            ),
            [username.into()],
        ))
        .await?;
    match row {
        Some(row) => {
            let hash: String = row.try_get("", "password_hash")?;
            Ok(Some((profile_from_row(&row)?, hash)))
        }
        None => Ok(None),
    }
}

pub async fn exists_username(username: &str) -> Result<bool> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM sys_users WHERE lower(username) = lower(?)",
            [username.trim().into()],
        ))
        .await?;
    let n: i64 = match row {
        Some(row) => row.try_get("", "n")?,
        None => 0,
    };
    Ok(n > 0)
}

pub async fn count_users() -> Result<u64> {
    let row = get_connection()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM sys_users".to_string(),
        ))
        .await?;
    let n: i64 = match row {
        Some(row) => row.try_get("", "n")?,
        None => 0,
    };
    Ok(n.max(0) as u64)
}

pub async fn list_page(offset: u64, limit: u64) -> Result<Vec<UserProfile>> {
    let rows = get_connection()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM sys_users ORDER BY username LIMIT ? OFFSET ?",
                PROFILE_COLUMNS
            ),
            [(limit as i64).into(), (offset as i64).into()],
        ))
        .await?;
    rows.iter().map(profile_from_row).collect()
}

/// Usernames keyed by id, for seller names on sales
pub async fn usernames_by_ids(ids: &[i64]) -> Result<HashMap<i64, String>> {
    let mut unique: Vec<i64> = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if unique.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; unique.len()].join(", ");
    let rows = get_connection()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT id, username FROM sys_users WHERE id IN ({})",
                placeholders
            ),
            unique.into_iter().map(Value::from),
        ))
        .await?;

    let mut names = HashMap::new();
    for row in rows {
        let id: i64 = row.try_get("", "id")?;
        let username: String = row.try_get("", "username")?;
        names.insert(id, username);
    }
    Ok(names)
}

pub async fn touch_last_login(id: i64) -> Result<()> {
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
            [Utc::now().to_rfc3339().into(), id.into()],
        ))
        .await?;
    Ok(())
}
