use contracts::domain::a002_product::aggregate::{Product, ProductDto};
use serde::Serialize;

use crate::shared::api_error::ApiError;
use crate::shared::list_controller::ListController;
use crate::shared::resource::ResourceService;

pub const SERVICE: ResourceService<Product, ProductDto> = ResourceService::new("/productos/");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductFilter {
    pub search: String,
    pub laboratorio: Option<i64>,
    pub activo: Option<bool>,
    pub es_bioequivalente: Option<bool>,
    pub ordering: String,
}

pub type ProductListController = ListController<Product, ProductDto, ProductFilter>;

/// First page of products matching `text`, for pickers and the POS finder
pub async fn search_products(text: &str, only_active: bool) -> Result<Vec<Product>, ApiError> {
    let filter = ProductFilter {
        search: text.trim().to_string(),
        activo: only_active.then_some(true),
        ..Default::default()
    };
    Ok(SERVICE.get_all(1, &filter).await?.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query() {
        let filter = ProductFilter {
            search: "ibu".into(),
            laboratorio: Some(2),
            es_bioequivalente: Some(false),
            ..Default::default()
        };
        assert_eq!(
            SERVICE.page_path(1, &filter),
            "/productos/?es_bioequivalente=false&laboratorio=2&page=1&search=ibu"
        );
    }
}
