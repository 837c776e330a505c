use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::validation::FieldErrors;

/// Batches expiring within this many days are flagged
pub const EXPIRY_WARNING_DAYS: i64 = 30;

// ============================================================================
// Record
// ============================================================================

/// Dated, quantified lot of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    #[serde(rename = "producto")]
    pub product_id: i64,
    #[serde(rename = "producto_nombre", default)]
    pub product_name: String,
    #[serde(rename = "codigo_lote")]
    pub lot_code: String,
    #[serde(rename = "fecha_creacion")]
    pub created_on: NaiveDate,
    #[serde(rename = "fecha_vencimiento")]
    pub expires_on: NaiveDate,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "defectuoso")]
    pub defective: bool,
    #[serde(rename = "activo")]
    pub active: bool,
}

impl Batch {
    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::evaluate(self.expires_on, today)
    }

    /// Counts towards the product's stock
    pub fn is_sellable(&self) -> bool {
        self.active && !self.defective && self.quantity > 0
    }
}

// ============================================================================
// Write DTO
// ============================================================================

/// Body of create/update requests
///
/// No ordering rule between `created_on` and `expires_on`; an already
/// expired batch is accepted and shown as expired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDto {
    #[serde(rename = "producto")]
    pub product_id: i64,
    #[serde(rename = "codigo_lote")]
    pub lot_code: String,
    #[serde(rename = "fecha_creacion")]
    pub created_on: NaiveDate,
    #[serde(rename = "fecha_vencimiento")]
    pub expires_on: NaiveDate,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "defectuoso", default)]
    pub defective: bool,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl BatchDto {
    /// Rules for any write; sales may leave a batch at 0 units
    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.check().into_result()
    }

    /// Rules for a new batch, which must arrive with stock
    pub fn validate_new(&self) -> Result<(), FieldErrors> {
        let mut errors = self.check();
        if self.quantity == 0 {
            errors.add("cantidad", "La cantidad debe ser mayor a 0.");
        }
        errors.into_result()
    }

    fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.lot_code.trim().is_empty() {
            errors.add("codigo_lote", "El código de lote es obligatorio.");
        }
        if self.product_id <= 0 {
            errors.add("producto", "Seleccione un producto.");
        }
        errors
    }

    /// A defective batch is never active
    pub fn normalized(mut self) -> Self {
        if self.defective {
            self.active = false;
        }
        self
    }
}

impl From<&Batch> for BatchDto {
    fn from(b: &Batch) -> Self {
        Self {
            product_id: b.product_id,
            lot_code: b.lot_code.clone(),
            created_on: b.created_on,
            expires_on: b.expires_on,
            quantity: b.quantity,
            defective: b.defective,
            active: b.active,
        }
    }
}

// ============================================================================
// Expiry status
// ============================================================================

/// Derived from the expiry date relative to "today"; never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Expired,
    /// Days remaining, 0..=EXPIRY_WARNING_DAYS
    ExpiringSoon(i64),
    Valid,
}

impl ExpiryStatus {
    pub fn evaluate(expires_on: NaiveDate, today: NaiveDate) -> Self {
        let days = (expires_on - today).num_days();
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= EXPIRY_WARNING_DAYS {
            ExpiryStatus::ExpiringSoon(days)
        } else {
            ExpiryStatus::Valid
        }
    }

    pub fn label(&self) -> String {
        match self {
            ExpiryStatus::Expired => "VENCIDO".to_string(),
            ExpiryStatus::ExpiringSoon(days) => format!("Por Vencer ({} días)", days),
            ExpiryStatus::Valid => "Vigente".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_expiry_status_boundaries() {
        let today = date("2025-06-15");
        assert_eq!(
            ExpiryStatus::evaluate(date("2025-06-14"), today),
            ExpiryStatus::Expired
        );
        assert_eq!(
            ExpiryStatus::evaluate(date("2025-06-15"), today),
            ExpiryStatus::ExpiringSoon(0)
        );
        assert_eq!(
            ExpiryStatus::evaluate(date("2025-07-15"), today),
            ExpiryStatus::ExpiringSoon(30)
        );
        assert_eq!(
            ExpiryStatus::evaluate(date("2025-07-16"), today),
            ExpiryStatus::Valid
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(ExpiryStatus::Expired.label(), "VENCIDO");
        assert_eq!(ExpiryStatus::ExpiringSoon(5).label(), "Por Vencer (5 días)");
        assert_eq!(ExpiryStatus::Valid.label(), "Vigente");
    }

    #[test]
    fn test_past_expiry_is_still_valid_input() {
        let dto = BatchDto {
            product_id: 4,
            lot_code: "L-2020-01".into(),
            created_on: date("2020-01-01"),
            expires_on: date("2021-01-01"),
            quantity: 10,
            defective: false,
            active: true,
        };
        assert!(dto.validate().is_ok());
        let batch = Batch {
            id: 1,
            product_id: dto.product_id,
            product_name: "Amoxicilina".into(),
            lot_code: dto.lot_code.clone(),
            created_on: dto.created_on,
            expires_on: dto.expires_on,
            quantity: dto.quantity,
            defective: false,
            active: true,
        };
        assert_eq!(batch.expiry_status(date("2025-01-01")).label(), "VENCIDO");
    }

    #[test]
    fn test_depleted_batch_stays_editable() {
        let depleted = Batch {
            id: 9,
            product_id: 2,
            product_name: "Paracetamol".into(),
            lot_code: "P-77".into(),
            created_on: date("2025-01-01"),
            expires_on: date("2026-01-01"),
            quantity: 0,
            defective: false,
            active: true,
        };
        let mut dto = BatchDto::from(&depleted);
        dto.active = false;
        assert!(dto.clone().normalized().validate().is_ok());

        dto.defective = true;
        assert!(dto.normalized().validate().is_ok());
    }

    #[test]
    fn test_new_batch_needs_units() {
        let dto = BatchDto {
            product_id: 2,
            lot_code: "P-78".into(),
            created_on: date("2025-01-01"),
            expires_on: date("2026-01-01"),
            quantity: 0,
            defective: false,
            active: true,
        };
        let errors = dto.validate_new().unwrap_err();
        assert!(errors.contains("cantidad"));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_defective_forces_inactive() {
        let dto = BatchDto {
            product_id: 1,
            lot_code: "X".into(),
            created_on: date("2025-01-01"),
            expires_on: date("2026-01-01"),
            quantity: 1,
            defective: true,
            active: true,
        }
        .normalized();
        assert!(!dto.active);
    }

    #[test]
    fn test_dates_use_iso_wire_format() {
        let json = r#"{"id":1,"producto":2,"producto_nombre":"Losartán","codigo_lote":"A1",
            "fecha_creacion":"2025-01-10","fecha_vencimiento":"2026-01-10",
            "cantidad":50,"defectuoso":false,"activo":true}"#;
        let b: Batch = serde_json::from_str(json).unwrap();
        assert_eq!(b.expires_on, date("2026-01-10"));
        assert!(b.is_sellable());
    }
}
