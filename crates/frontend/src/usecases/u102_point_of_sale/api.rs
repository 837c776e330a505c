use contracts::domain::a004_sale::aggregate::{CreateSaleRequest, Sale};
use contracts::shared::pagination::Page;
use serde::Serialize;

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::list_query;
use crate::system::auth::session;

pub const SALES_PATH: &str = "/ventas/";

/// Query accepted by `GET /ventas/`; blank fields are left out
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaleFilter {
    pub metodo_pago: String,
    pub anulada: Option<bool>,
    #[serde(rename = "fecha__gte")]
    pub from: String,
    #[serde(rename = "fecha__lte")]
    pub to: String,
}

fn sales_page_path(page: u64, filter: &SaleFilter) -> String {
    format!("{}?{}", SALES_PATH, list_query(page, filter))
}

/// Register the sale; stock allocation happens server-side
pub async fn create_sale(request: &CreateSaleRequest) -> Result<Sale, ApiError> {
    log::debug!("POST {} with {} item(s)", SALES_PATH, request.items.len());
    session::post(SALES_PATH, request).await
}

pub async fn list_sales(page: u64, filter: &SaleFilter) -> Result<Page<Sale>, ApiError> {
    session::get(&sales_page_path(page, filter)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_page_path() {
        let filter = SaleFilter {
            metodo_pago: "EFECTIVO".into(),
            from: "2025-03-01".into(),
            ..Default::default()
        };
        assert_eq!(
            sales_page_path(2, &filter),
            "/ventas/?fecha__gte=2025-03-01&metodo_pago=EFECTIVO&page=2"
        );
    }
}
