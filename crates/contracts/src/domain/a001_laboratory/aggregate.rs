use serde::{Deserialize, Serialize};

use crate::shared::validation::FieldErrors;

pub const NAME_MAX_LEN: usize = 150;

// ============================================================================
// Record
// ============================================================================

/// Pharmaceutical laboratory (manufacturer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laboratory {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

// ============================================================================
// Write DTO
// ============================================================================

/// Body of create/update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaboratoryDto {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

impl LaboratoryDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.add("nombre", "El nombre es obligatorio.");
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.add(
                "nombre",
                format!("Máximo {} caracteres.", NAME_MAX_LEN),
            );
        }
        errors.into_result()
    }
}

impl From<&Laboratory> for LaboratoryDto {
    fn from(lab: &Laboratory) -> Self {
        Self {
            name: lab.name.clone(),
            address: lab.address.clone(),
            phone: lab.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let lab: Laboratory = serde_json::from_str(
            r#"{"id":3,"nombre":"Laboratorio Chile","direccion":null,"telefono":"+56 2 1234"}"#,
        )
        .unwrap();
        assert_eq!(lab.name, "Laboratorio Chile");
        assert_eq!(lab.address, None);
        assert_eq!(lab.phone.as_deref(), Some("+56 2 1234"));
    }

    #[test]
    fn test_validate_requires_name() {
        let dto = LaboratoryDto {
            name: "   ".into(),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.contains("nombre"));

        let long = LaboratoryDto {
            name: "x".repeat(NAME_MAX_LEN + 1),
            ..Default::default()
        };
        assert!(long.validate().is_err());
    }
}
