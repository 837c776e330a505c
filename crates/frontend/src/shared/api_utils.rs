//! URL helpers for frontend-backend communication

use std::collections::BTreeMap;

use serde::Serialize;

/// Port the API server listens on
pub const API_PORT: u16 = 3000;
/// Path prefix of every REST endpoint
pub const API_PREFIX: &str = "/api";

/// Get the base URL for API requests
///
/// Same host as the page, backend port, e.g. `http://localhost:3000/api`.
/// Empty when no window is available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}{}", protocol, hostname, API_PORT, API_PREFIX)
}

/// Full URL of an endpoint path such as `/laboratorios/`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Flatten a filter set into query pairs, dropping empty values.
///
/// The result is sorted by key, so two filter sets that are equal by value
/// always produce the same pairs.
pub fn query_pairs<F: Serialize>(filters: &F) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();
    if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(filters) {
        for (key, value) in map {
            let text = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s.trim().to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                _ => continue,
            };
            if !text.is_empty() {
                pairs.insert(key, text);
            }
        }
    }
    pairs
}

/// Query string (without `?`) for a page of a filtered list
pub fn list_query<F: Serialize>(page: u64, filters: &F) -> String {
    let mut pairs = query_pairs(filters);
    pairs.insert("page".to_string(), page.max(1).to_string());
    serde_qs::to_string(&pairs).unwrap_or_default()
}

/// Value of a yes/no/any select
pub fn tri_state(value: &str) -> Option<bool> {
    match value.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Id picked in a select; empty or invalid means no choice
pub fn selected_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Filters {
        search: String,
        activo: Option<bool>,
        laboratorio: Option<i64>,
    }

    #[test]
    fn test_empty_values_are_dropped() {
        let filters = Filters {
            search: "  ".into(),
            activo: None,
            laboratorio: Some(3),
        };
        let pairs = query_pairs(&filters);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.get("laboratorio").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_list_query_adds_page() {
        let filters = Filters {
            search: "para cetamol".into(),
            activo: Some(true),
            laboratorio: None,
        };
        let query = list_query(2, &filters);
        assert!(query.contains("page=2"));
        assert!(query.contains("activo=true"));
        assert!(query.contains("search=para"));
        assert_eq!(list_query(0, &filters), list_query(1, &filters));
    }

    #[test]
    fn test_select_values() {
        assert_eq!(tri_state("true"), Some(true));
        assert_eq!(tri_state("false"), Some(false));
        assert_eq!(tri_state(""), None);
        assert_eq!(selected_id("12"), Some(12));
        assert_eq!(selected_id(""), None);
        assert_eq!(selected_id("0"), None);
    }
}
