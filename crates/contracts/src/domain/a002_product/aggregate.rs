use serde::{Deserialize, Serialize};

use crate::shared::validation::FieldErrors;

/// Barcode/SKU length limit
pub const SERIAL_CODE_MAX_LEN: usize = 13;

// ============================================================================
// Record
// ============================================================================

/// Sellable product, always tied to a laboratory
///
/// `laboratory_name` and `stock_total` are computed by the server and ignored
/// on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "laboratorio")]
    pub laboratory_id: i64,
    #[serde(rename = "laboratorio_nombre", default)]
    pub laboratory_name: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "cantidad_mg")]
    pub dosage_mg: u32,
    #[serde(rename = "cantidad_capsulas")]
    pub capsule_count: u32,
    #[serde(rename = "es_bioequivalente")]
    pub bioequivalent: bool,
    #[serde(rename = "codigo_serie")]
    pub serial_code: String,
    #[serde(rename = "precio_venta")]
    pub sale_price: u64,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(default)]
    pub stock_total: u64,
}

// ============================================================================
// Write DTO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    #[serde(rename = "laboratorio")]
    pub laboratory_id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "cantidad_mg")]
    pub dosage_mg: u32,
    #[serde(rename = "cantidad_capsulas", default)]
    pub capsule_count: u32,
    #[serde(rename = "es_bioequivalente", default)]
    pub bioequivalent: bool,
    #[serde(rename = "codigo_serie")]
    pub serial_code: String,
    #[serde(rename = "precio_venta", default)]
    pub sale_price: u64,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for ProductDto {
    fn default() -> Self {
        Self {
            laboratory_id: 0,
            name: String::new(),
            description: String::new(),
            dosage_mg: 0,
            capsule_count: 0,
            bioequivalent: false,
            serial_code: String::new(),
            sale_price: 0,
            active: true,
        }
    }
}

impl ProductDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("nombre", "El nombre es obligatorio.");
        }
        let serial = self.serial_code.trim();
        if serial.is_empty() {
            errors.add("codigo_serie", "El código de serie es obligatorio.");
        } else if serial.chars().count() > SERIAL_CODE_MAX_LEN {
            errors.add(
                "codigo_serie",
                format!("Máximo {} caracteres.", SERIAL_CODE_MAX_LEN),
            );
        }
        if self.laboratory_id <= 0 {
            errors.add("laboratorio", "Seleccione un laboratorio.");
        }
        if self.dosage_mg == 0 {
            errors.add("cantidad_mg", "Debe ser mayor a 0.");
        }
        errors.into_result()
    }
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            laboratory_id: p.laboratory_id,
            name: p.name.clone(),
            description: p.description.clone(),
            dosage_mg: p.dosage_mg,
            capsule_count: p.capsule_count,
            bioequivalent: p.bioequivalent,
            serial_code: p.serial_code.clone(),
            sale_price: p.sale_price,
            active: p.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProductDto {
        ProductDto {
            laboratory_id: 1,
            name: "Paracetamol".into(),
            dosage_mg: 500,
            capsule_count: 20,
            serial_code: "7801234567890".into(),
            sale_price: 1990,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_each_rule_reports_its_field() {
        let dto = ProductDto {
            laboratory_id: 0,
            name: "".into(),
            dosage_mg: 0,
            serial_code: "78012345678901".into(),
            ..valid()
        };
        let errors = dto.validate().unwrap_err();
        for field in ["laboratorio", "nombre", "cantidad_mg", "codigo_serie"] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        assert!(!errors.contains("precio_venta"));
    }

    #[test]
    fn test_read_only_fields_default_when_absent() {
        let json = r#"{
            "id": 7, "laboratorio": 2, "nombre": "Ibuprofeno",
            "cantidad_mg": 400, "cantidad_capsulas": 10,
            "es_bioequivalente": true, "codigo_serie": "123",
            "precio_venta": 2500, "activo": true
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.stock_total, 0);
        assert_eq!(p.laboratory_name, "");
        assert!(p.bioequivalent);
    }
}
