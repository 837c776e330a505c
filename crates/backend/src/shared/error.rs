use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::validation::FieldErrors;
use serde_json::json;

/// Error returned by handlers, rendered with the REST error body shapes:
/// 400 `{field: [msgs]}`, everything else `{"detail": msg}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Refused operation, e.g. deleting a row that other rows reference
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ApiError::Validation(FieldErrors::single(field, message))
    }

    pub fn not_found() -> Self {
        ApiError::NotFound("No encontrado.".to_string())
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized(
            "Las credenciales de autenticación no se proveyeron.".to_string(),
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Validation(errors) => json!(errors),
            ApiError::Internal(_) => json!({"detail": "Error interno del servidor."}),
            other => json!({"detail": other.to_string()}),
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        ApiError::Internal(anyhow::Error::new(e))
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            tracing::error!("Internal error: {:#}", e);
        }
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body_is_field_map() {
        let err = ApiError::field("nombre", "Ya existe un laboratorio con este nombre.");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            json!({"nombre": ["Ya existe un laboratorio con este nombre."]})
        );
    }

    #[test]
    fn test_detail_bodies() {
        let err = ApiError::Forbidden("protegido".into());
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.body(), json!({"detail": "protegido"}));

        let internal = ApiError::Internal(anyhow::anyhow!("disk on fire"));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.body(), json!({"detail": "Error interno del servidor."}));
    }
}
