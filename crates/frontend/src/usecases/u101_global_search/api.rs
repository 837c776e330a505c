use contracts::shared::search::GlobalSearchResponse;

use crate::shared::api_error::ApiError;
use crate::system::auth::session;

pub fn search_path(query: &str) -> String {
    format!("/global-search/?q={}", urlencoding::encode(query.trim()))
}

/// Products, batches and laboratories matching `query`
pub async fn global_search(query: &str) -> Result<GlobalSearchResponse, ApiError> {
    session::get(&search_path(query)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_encoded() {
        assert_eq!(search_path(" ácido fólico "), "/global-search/?q=%C3%A1cido%20f%C3%B3lico");
    }
}
