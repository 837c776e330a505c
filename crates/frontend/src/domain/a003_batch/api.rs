use contracts::domain::a003_batch::aggregate::{Batch, BatchDto};
use serde::Serialize;

use crate::shared::list_controller::ListController;
use crate::shared::resource::ResourceService;

pub const SERVICE: ResourceService<Batch, BatchDto> = ResourceService::new("/lotes/");

/// Dates are `YYYY-MM-DD` strings straight from the date inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchFilter {
    pub search: String,
    pub producto: Option<i64>,
    pub activo: Option<bool>,
    pub defectuoso: Option<bool>,
    #[serde(rename = "fecha_vencimiento__gte")]
    pub expires_from: String,
    #[serde(rename = "fecha_vencimiento__lte")]
    pub expires_to: String,
}

pub type BatchListController = ListController<Batch, BatchDto, BatchFilter>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_range_query() {
        let filter = BatchFilter {
            defectuoso: Some(true),
            expires_from: "2025-01-01".into(),
            ..Default::default()
        };
        assert_eq!(
            SERVICE.page_path(2, &filter),
            "/lotes/?defectuoso=true&fecha_vencimiento__gte=2025-01-01&page=2"
        );
    }
}
