use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::validation::FieldErrors;

// ============================================================================
// Payment method
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Efectivo,
    Debito,
    Credito,
    Transferencia,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Efectivo,
        PaymentMethod::Debito,
        PaymentMethod::Credito,
        PaymentMethod::Transferencia,
    ];

    /// Wire code, e.g. `EFECTIVO`
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "EFECTIVO",
            PaymentMethod::Debito => "DEBITO",
            PaymentMethod::Credito => "CREDITO",
            PaymentMethod::Transferencia => "TRANSFERENCIA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "Efectivo",
            PaymentMethod::Debito => "Tarjeta Débito",
            PaymentMethod::Credito => "Tarjeta Crédito",
            PaymentMethod::Transferencia => "Transferencia",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

// ============================================================================
// Sale record
// ============================================================================

/// Completed sale with its lines; totals are computed server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
    pub total: u64,
    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "usuario")]
    pub user_id: i64,
    #[serde(rename = "vendedor_nombre", default)]
    pub seller_name: String,
    #[serde(rename = "anulada", default)]
    pub voided: bool,
    #[serde(rename = "detalles", default)]
    pub lines: Vec<SaleLine>,
}

impl Sale {
    /// First 8 characters of the id, printed on receipts
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(8).collect()
    }
}

/// One sale line; `unit_price` is frozen at sale time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: i64,
    #[serde(rename = "producto")]
    pub product_id: i64,
    #[serde(rename = "lote")]
    pub batch_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio_unitario")]
    pub unit_price: u64,
    pub subtotal: u64,
    #[serde(rename = "nombre_producto", default)]
    pub product_name: String,
    #[serde(rename = "codigo_serie", default)]
    pub serial_code: String,
}

// ============================================================================
// Create request
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItemRequest {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Body of `POST /ventas/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    #[serde(rename = "metodo_pago", default)]
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleItemRequest>,
}

impl CreateSaleRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.items.is_empty() {
            errors.add("items", "La venta debe tener al menos un producto.");
        }
        if self.items.iter().any(|i| i.quantity == 0) {
            errors.add("items", "La cantidad de cada producto debe ser mayor a 0.");
        }
        if self.items.iter().any(|i| i.product_id <= 0) {
            errors.add("items", "Producto inválido.");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_codes() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Transferencia).unwrap(),
            "\"TRANSFERENCIA\""
        );
        let m: PaymentMethod = serde_json::from_str("\"DEBITO\"").unwrap();
        assert_eq!(m, PaymentMethod::Debito);
        for m in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::from_code(m.code()), Some(m));
        }
        assert_eq!(PaymentMethod::from_code("CHEQUE"), None);
    }

    #[test]
    fn test_create_request_payload_shape() {
        let req = CreateSaleRequest {
            payment_method: PaymentMethod::Credito,
            items: vec![SaleItemRequest {
                product_id: 12,
                quantity: 2,
            }],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "metodo_pago": "CREDITO",
                "items": [{"producto_id": 12, "cantidad": 2}]
            })
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_sale_is_rejected() {
        let errors = CreateSaleRequest::default().validate().unwrap_err();
        assert!(errors.contains("items"));
    }
}
