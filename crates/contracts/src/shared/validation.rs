use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key for messages that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation errors keyed by wire field name
///
/// Serialized as `{"field": ["message", ...]}`, the body of a 400 response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Messages for one field joined for display under an input
    pub fn joined(&self, field: &str) -> Option<String> {
        self.get(field).map(|messages| messages.join(" "))
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Lenient parse of an error body.
    ///
    /// Accepts `{"f": ["a", "b"]}`, `{"f": "a"}`, `{"detail": "..."}` and
    /// nested objects (flattened to `parent.child`). Anything that is not an
    /// object becomes a single non-field message.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut errors = Self::new();
        match value {
            serde_json::Value::Object(map) => {
                for (field, messages) in map {
                    collect_messages(&mut errors, field, messages);
                }
            }
            serde_json::Value::Null => {}
            other => errors.add(NON_FIELD_ERRORS, value_to_message(other)),
        }
        errors
    }
}

fn collect_messages(errors: &mut FieldErrors, field: &str, value: &serde_json::Value) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                collect_messages(errors, field, item);
            }
        }
        serde_json::Value::Object(map) => {
            for (child, messages) in map {
                collect_messages(errors, &format!("{}.{}", field, child), messages);
            }
        }
        other => errors.add(field, value_to_message(other)),
    }
}

fn value_to_message(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_list_of_messages() {
        let errors = FieldErrors::from_json(&json!({
            "nombre": ["Este campo es requerido."],
            "codigo_serie": ["Ya existe.", "Máximo 13 caracteres."]
        }));
        assert_eq!(errors.joined("nombre").as_deref(), Some("Este campo es requerido."));
        assert_eq!(errors.get("codigo_serie").map(|m| m.len()), Some(2));
        assert!(!errors.contains("precio_venta"));
    }

    #[test]
    fn test_from_json_plain_string_and_nested() {
        let errors = FieldErrors::from_json(&json!({
            "detail": "No autorizado",
            "items": [{"cantidad": ["Stock insuficiente"]}]
        }));
        assert_eq!(errors.joined("detail").as_deref(), Some("No autorizado"));
        assert_eq!(
            errors.joined("items.cantidad").as_deref(),
            Some("Stock insuficiente")
        );
    }

    #[test]
    fn test_from_json_non_object() {
        let errors = FieldErrors::from_json(&json!(["algo salió mal"]));
        assert_eq!(
            errors.joined(NON_FIELD_ERRORS).as_deref(),
            Some("algo salió mal")
        );
    }

    #[test]
    fn test_serializes_as_drf_body() {
        let errors = FieldErrors::single("nombre", "required");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"nombre": ["required"]})
        );
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(errors.into_result().is_err());
    }
}
