use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use contracts::system::auth::{TokenClaims, TokenType};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::shared::config;

/// Lifetime of a token of the given type, from `[auth]`
fn lifetime(token_type: TokenType) -> Duration {
    let auth = &config::global().auth;
    match token_type {
        TokenType::Access => Duration::minutes(auth.access_token_minutes),
        TokenType::Refresh => Duration::days(auth.refresh_token_days),
    }
}

/// Claims for a fresh token; every token gets its own `jti`
pub fn new_claims(user_id: i64, username: &str, token_type: TokenType, ttl: Duration) -> TokenClaims {
    let now = Utc::now();
    TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        token_type,
        jti: uuid::Uuid::new_v4().to_string(),
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

pub fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

/// Decode and check signature, expiry and token type
pub fn decode_claims(token: &str, secret: &str, expected: TokenType) -> Result<TokenClaims> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    if data.claims.token_type != expected {
        anyhow::bail!("Unexpected token type {:?}", data.claims.token_type);
    }
    Ok(data.claims)
}

/// Sign a token of `token_type` for the user
pub async fn issue_token(
    user_id: i64,
    username: &str,
    token_type: TokenType,
) -> Result<(String, TokenClaims)> {
    let claims = new_claims(user_id, username, token_type, lifetime(token_type));
    let secret = get_jwt_secret().await?;
    let token = encode_claims(&claims, &secret)?;
    Ok((token, claims))
}

pub async fn validate_token(token: &str, expected: TokenType) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    decode_claims(token, &secret, expected)
}

/// Configured secret, or the one kept in sys_settings (created on first use)
pub async fn get_jwt_secret() -> Result<String> {
    let configured = &config::global().auth.jwt_secret;
    if !configured.is_empty() {
        return Ok(configured.clone());
    }
    match get_jwt_secret_from_db().await {
        Ok(Some(secret)) => Ok(secret),
        Ok(None) | Err(_) => {
            let secret = generate_jwt_secret();
            if let Err(e) = save_jwt_secret_to_db(&secret).await {
                tracing::warn!("Could not persist JWT secret: {}", e);
            }
            Ok(secret)
        }
    }
}

/// 256 random bits, base64
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db() -> Result<Option<String>> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            ["jwt_secret".into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(secret: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let now = Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT OR IGNORE INTO sys_settings (key, value, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                "jwt_secret".into(),
                secret.to_string().into(),
                "Auto-generated JWT secret for authentication".into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_roundtrip_keeps_identity() {
        let claims = new_claims(7, "caja1", TokenType::Access, Duration::minutes(5));
        let token = encode_claims(&claims, SECRET).unwrap();
        let decoded = decode_claims(&token, SECRET, TokenType::Access).unwrap();
        assert_eq!(decoded.sub, "7");
        assert_eq!(decoded.username, "caja1");
        assert_eq!(decoded.jti, claims.jti);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let claims = new_claims(1, "admin", TokenType::Refresh, Duration::days(1));
        let token = encode_claims(&claims, SECRET).unwrap();
        assert!(decode_claims(&token, SECRET, TokenType::Access).is_err());
        assert!(decode_claims(&token, SECRET, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_expired_and_foreign_tokens_fail() {
        let expired = new_claims(1, "admin", TokenType::Access, Duration::minutes(-10));
        let token = encode_claims(&expired, SECRET).unwrap();
        assert!(decode_claims(&token, SECRET, TokenType::Access).is_err());

        let claims = new_claims(1, "admin", TokenType::Access, Duration::minutes(5));
        let token = encode_claims(&claims, "other").unwrap();
        assert!(decode_claims(&token, SECRET, TokenType::Access).is_err());
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let a = new_claims(1, "admin", TokenType::Refresh, Duration::days(1));
        let b = new_claims(1, "admin", TokenType::Refresh, Duration::days(1));
        assert_ne!(a.jti, b.jti);
    }
}
