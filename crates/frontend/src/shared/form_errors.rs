//! Mapping of API errors onto form inputs

use std::collections::BTreeMap;

use contracts::shared::validation::FieldErrors;

use super::api_error::ApiError;

/// Per-field messages plus a banner for everything without an input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
    banner: Option<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split validation errors: keys in `fields` go under their input,
    /// `non_field_errors`, `detail` and unknown keys go to the banner
    pub fn from_field_errors(errors: &FieldErrors, fields: &[&str]) -> Self {
        let mut form = Self::new();
        let mut banner = Vec::new();
        for (field, messages) in &errors.0 {
            let text = messages.join(" ");
            if fields.contains(&field.as_str()) {
                form.fields.insert(field.clone(), text);
            } else {
                banner.push(text);
            }
        }
        if !banner.is_empty() {
            form.banner = Some(banner.join(" "));
        }
        form
    }

    pub fn from_api_error(error: &ApiError, fields: &[&str]) -> Self {
        match error {
            ApiError::Validation(errors) => Self::from_field_errors(errors, fields),
            other => Self {
                fields: BTreeMap::new(),
                banner: Some(other.to_string()),
            },
        }
    }

    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub fn banner(&self) -> Option<String> {
        self.banner.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.banner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRODUCT_FIELDS: &[&str] = &["nombre", "codigo_serie", "laboratorio"];

    #[test]
    fn test_field_message_lands_under_its_input() {
        let err = ApiError::from_status(400, &json!({"nombre": ["required"]}).to_string());
        let form = FormErrors::from_api_error(&err, PRODUCT_FIELDS);
        assert_eq!(form.field("nombre").as_deref(), Some("required"));
        assert_eq!(form.field("codigo_serie"), None);
        assert_eq!(form.banner(), None);
    }

    #[test]
    fn test_non_field_and_unknown_keys_go_to_banner() {
        let errors = FieldErrors::from_json(&json!({
            "non_field_errors": ["Combinación duplicada."],
            "otro": ["x"],
            "codigo_serie": ["Ya existe."]
        }));
        let form = FormErrors::from_field_errors(&errors, PRODUCT_FIELDS);
        assert_eq!(form.field("codigo_serie").as_deref(), Some("Ya existe."));
        let banner = form.banner().unwrap();
        assert!(banner.contains("Combinación duplicada."));
        assert!(banner.contains("x"));
    }

    #[test]
    fn test_other_errors_become_banner() {
        let form = FormErrors::from_api_error(&ApiError::NotFound, PRODUCT_FIELDS);
        assert!(form.banner().is_some());
        assert!(form.field("nombre").is_none());
        assert!(FormErrors::new().is_empty());
    }
}
