//! Generic CRUD client for one REST collection

use std::marker::PhantomData;

use contracts::shared::pagination::Page;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_error::ApiError;
use super::api_utils::list_query;
use crate::system::auth::session;

/// Stateless service bound to a collection path such as `/productos/`.
///
/// `T` is the record read from the server, `D` the body written to it.
pub struct ResourceService<T, D> {
    path: &'static str,
    _marker: PhantomData<fn() -> (T, D)>,
}

impl<T, D> Clone for ResourceService<T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for ResourceService<T, D> {}

impl<T, D> ResourceService<T, D> {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("{}{}/", self.path, id)
    }

    pub fn page_path<F: Serialize>(&self, page: u64, filters: &F) -> String {
        format!("{}?{}", self.path, list_query(page, filters))
    }

    pub fn simple_list_path(&self) -> String {
        format!("{}simple_list/", self.path)
    }
}

impl<T, D> ResourceService<T, D>
where
    T: DeserializeOwned,
    D: Serialize,
{
    pub async fn get_all<F: Serialize>(&self, page: u64, filters: &F) -> Result<Page<T>, ApiError> {
        let path = self.page_path(page, filters);
        log::debug!("GET {}", path);
        session::get(&path).await
    }

    pub async fn get_all_no_pagination(&self) -> Result<Vec<T>, ApiError> {
        session::get(&self.simple_list_path()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<T, ApiError> {
        session::get(&self.item_path(id)).await
    }

    pub async fn create(&self, dto: &D) -> Result<T, ApiError> {
        session::post(self.path, dto).await
    }

    /// PATCH with any subset of the writable fields
    pub async fn update<P: Serialize>(&self, id: i64, partial: &P) -> Result<T, ApiError> {
        session::patch(&self.item_path(id), partial).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        session::delete(&self.item_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_paths() {
        let service: ResourceService<serde_json::Value, serde_json::Value> =
            ResourceService::new("/lotes/");
        assert_eq!(service.item_path(12), "/lotes/12/");
        assert_eq!(service.simple_list_path(), "/lotes/simple_list/");

        let mut filters = BTreeMap::new();
        filters.insert("activo", "true");
        assert_eq!(service.page_path(3, &filters), "/lotes/?activo=true&page=3");
    }
}
