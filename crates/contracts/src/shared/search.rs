use serde::{Deserialize, Serialize};

/// Shortest query the global search box sends to the server
pub const MIN_QUERY_LEN: usize = 3;

/// Hits returned per entity group
pub const MAX_HITS_PER_GROUP: usize = 5;

/// One global search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "subtitulo", default)]
    pub subtitle: String,
    #[serde(default)]
    pub extra: Option<String>,
}

/// Response of `GET /global-search/?q=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSearchResponse {
    #[serde(rename = "productos", default)]
    pub products: Vec<SearchHit>,
    #[serde(rename = "lotes", default)]
    pub batches: Vec<SearchHit>,
    #[serde(rename = "laboratorios", default)]
    pub laboratories: Vec<SearchHit>,
}

impl GlobalSearchResponse {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.batches.is_empty() && self.laboratories.is_empty()
    }
}

/// Trimmed length in characters, the measure used for minimum-length checks
pub fn query_len(query: &str) -> usize {
    query.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_groups_default_to_empty() {
        let resp: GlobalSearchResponse =
            serde_json::from_str(r#"{"productos":[{"id":1,"titulo":"Paracetamol","subtitulo":"SKU: 123"}]}"#)
                .unwrap();
        assert_eq!(resp.products.len(), 1);
        assert_eq!(resp.products[0].extra, None);
        assert!(resp.batches.is_empty());
        assert!(!resp.is_empty());
    }

    #[test]
    fn test_query_len_counts_chars() {
        assert_eq!(query_len("  ab "), 2);
        assert_eq!(query_len("ñandú"), 5);
    }
}
