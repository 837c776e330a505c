use contracts::shared::validation::{FieldErrors, NON_FIELD_ERRORS};
use serde::{de::DeserializeOwned, Serialize};

use super::error::{ApiError, ApiResult};

/// Partial update: overlay the keys present in `patch` on the current write
/// representation and parse the result back.
pub fn merge_patch<D>(current: &D, patch: serde_json::Value) -> ApiResult<D>
where
    D: Serialize + DeserializeOwned,
{
    let serde_json::Value::Object(changes) = patch else {
        return Err(ApiError::field(NON_FIELD_ERRORS, "Se esperaba un objeto JSON."));
    };
    let mut merged = serde_json::to_value(current).map_err(anyhow::Error::new)?;
    if let serde_json::Value::Object(target) = &mut merged {
        for (key, value) in changes {
            // unknown and read-only keys are ignored
            if target.contains_key(&key) {
                target.insert(key, value);
            }
        }
    }
    parse_body(merged)
}

/// Parse a request body into a write representation.
/// A missing field is reported under its own name, anything else as non-field.
pub fn parse_body<D: DeserializeOwned>(body: serde_json::Value) -> ApiResult<D> {
    serde_json::from_value(body).map_err(|e| ApiError::Validation(body_errors(&e.to_string())))
}

fn body_errors(message: &str) -> FieldErrors {
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());
    match missing {
        Some(field) => FieldErrors::single(field, "Este campo es requerido."),
        None => FieldErrors::single(NON_FIELD_ERRORS, format!("Datos inválidos: {}", message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_product::aggregate::ProductDto;
    use serde_json::json;

    fn current() -> ProductDto {
        ProductDto {
            laboratory_id: 1,
            name: "Paracetamol".into(),
            dosage_mg: 500,
            serial_code: "780".into(),
            sale_price: 1000,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_field_maps_to_its_name() {
        let err = parse_body::<ProductDto>(json!({"nombre": "X"})).unwrap_err();
        match err {
            ApiError::Validation(errors) => assert!(errors.contains("laboratorio")),
            other => panic!("unexpected {:?}", other),
        }
        let err = parse_body::<ProductDto>(json!([1, 2])).unwrap_err();
        match err {
            ApiError::Validation(errors) => assert!(errors.contains(NON_FIELD_ERRORS)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let merged = merge_patch(
            &current(),
            json!({"precio_venta": 1500, "stock_total": 99}),
        )
        .unwrap();
        assert_eq!(merged.sale_price, 1500);
        assert_eq!(merged.name, "Paracetamol");
        assert_eq!(merged.dosage_mg, 500);
    }

    #[test]
    fn test_merge_rejects_wrong_types() {
        let err = merge_patch(&current(), json!({"precio_venta": "caro"})).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let err = merge_patch(&current(), json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
