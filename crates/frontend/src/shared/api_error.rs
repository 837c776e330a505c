//! Client-side error taxonomy for API calls

use contracts::shared::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Fetch rejected or body unreadable
    #[error("No se pudo conectar con el servidor: {0}")]
    Network(String),
    /// 400 with a `{field: [messages]}` body
    #[error("Datos inválidos: {0}")]
    Validation(FieldErrors),
    #[error("Su sesión ha expirado. Inicie sesión nuevamente.")]
    Unauthorized,
    /// Typically the delete of a referenced row
    #[error("{0}")]
    Forbidden(String),
    #[error("El recurso solicitado no existe.")]
    NotFound,
    #[error("Error del servidor ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("Respuesta inesperada del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => match serde_json::from_str::<serde_json::Value>(body) {
                Ok(value) => ApiError::Validation(FieldErrors::from_json(&value)),
                Err(_) => ApiError::Validation(FieldErrors::single(
                    contracts::shared::validation::NON_FIELD_ERRORS,
                    body.trim(),
                )),
            },
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(
                detail(body).unwrap_or_else(|| "No tiene permiso para realizar esta acción.".into()),
            ),
            404 => ApiError::NotFound,
            _ => ApiError::Server {
                status,
                body: detail(body).unwrap_or_else(|| body.trim().to_string()),
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Validation errors belong to forms; everything else goes to the banner
    pub fn is_banner_error(&self) -> bool {
        !matches!(self, ApiError::Validation(_))
    }
}

/// `detail` of a DRF error body
fn detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(404, r#"{"detail":"Invalid page."}"#), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(403, r#"{"detail":"Tiene lotes asociados."}"#),
            ApiError::Forbidden("Tiene lotes asociados.".into())
        );
        assert_eq!(
            ApiError::from_status(502, "Bad Gateway"),
            ApiError::Server {
                status: 502,
                body: "Bad Gateway".into()
            }
        );
    }

    #[test]
    fn test_bad_request_carries_field_errors() {
        let err = ApiError::from_status(400, r#"{"nombre": ["required"]}"#);
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.joined("nombre").as_deref(), Some("required"));
        assert!(!err.is_banner_error());
    }

    #[test]
    fn test_bad_request_with_plain_text_body() {
        let err = ApiError::from_status(400, "algo falló");
        assert!(err
            .field_errors()
            .unwrap()
            .contains(contracts::shared::validation::NON_FIELD_ERRORS));
    }
}
